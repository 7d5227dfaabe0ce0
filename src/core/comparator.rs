// ============================================================================
// XliffMerge - Equivalence Comparator
// ============================================================================
//
// File: src/core/comparator.rs
// Responsibility: deciding whether two message contents or reference lists are equivalent
// Boundaries:
//   - ✅ ICU aware content equivalence
//   - ✅ Order independent source reference equivalence
//   - ❌ Should not contain normalization itself
//   - ❌ Should not mutate entries
//
// ============================================================================

use std::collections::HashSet;

use crate::models::content::MessageContent;
use crate::models::entry::SourceRef;

/// Whether two contents express the same message.
///
/// Placeholder attributes that do not change the message (like XLIFF
/// `equiv-text`) and the layout between ICU cases are ignored. A message
/// that is an ICU message is never equivalent to one that is not.
///
/// When either side references an ICU message, the native strings are
/// compared, so the check is symmetric in `a` and `b`.
pub fn content_equivalent(a: Option<&MessageContent>, b: Option<&MessageContent>) -> bool {
    let (a, b) = match (a, b) {
        (None, None) => return true,
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    let a = a.normalized();
    let b = b.normalized();

    if a.is_icu_message() != b.is_icu_message() {
        return false;
    }
    if a.is_icu_message() || a.contains_icu_reference() || b.contains_icu_reference() {
        return a.native_string().trim() == b.native_string().trim();
    }
    a.display_string().trim() == b.display_string().trim()
}

/// Whether two reference lists name the same `file:line` locations.
pub fn references_equivalent(a: Option<&[SourceRef]>, b: Option<&[SourceRef]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => reference_keys(a) == reference_keys(b),
        _ => false,
    }
}

fn reference_keys(refs: &[SourceRef]) -> HashSet<String> {
    refs.iter().map(SourceRef::key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(native: &str) -> MessageContent {
        MessageContent::from_native(native)
    }

    #[test]
    fn test_absent_contents() {
        let hello = content("Hello");
        assert!(content_equivalent(None, None));
        assert!(!content_equivalent(Some(&hello), None));
        assert!(!content_equivalent(None, Some(&hello)));
    }

    #[test]
    fn test_text_ignores_placeholder_attributes_and_outer_whitespace() {
        let a = content("  Hi <x id=\"INTERPOLATION\" equiv-text=\"{{ a }}\"/>");
        let b = content("Hi <x id=\"INTERPOLATION\" equiv-text=\"{{ other }}\"/>\n");
        assert!(content_equivalent(Some(&a), Some(&b)));
    }

    #[test]
    fn test_text_differs() {
        let a = content("Hi <x id=\"INTERPOLATION\"/>");
        let b = content("Hi <x id=\"INTERPOLATION_1\"/>");
        assert!(!content_equivalent(Some(&a), Some(&b)));
    }

    #[test]
    fn test_plural_is_never_plain_text() {
        let plural = content("{n, plural, other {items}}");
        let flattened = content("items");
        assert!(!content_equivalent(Some(&plural), Some(&flattened)));
        assert!(!content_equivalent(Some(&flattened), Some(&plural)));
    }

    #[test]
    fn test_plural_ignores_case_layout() {
        let a = content("{n, plural, =0 {none} other {many}}");
        let b = content("{n,plural,\n  =0 {none}\n  other {many}\n}");
        let c = content("{n, plural, =0 {nothing} other {many}}");
        assert!(content_equivalent(Some(&a), Some(&b)));
        assert!(!content_equivalent(Some(&a), Some(&c)));
    }

    #[test]
    fn test_icu_reference_compares_native_placeholders() {
        let a = content("Updated <x id=\"ICU\" equiv-text=\"{minutes, plural, ...}\"/>");
        let b = content("Updated <x id=\"ICU\" equiv-text=\"{hours, plural, ...}\"/>");
        let c = content("Updated <x id=\"ICU_1\"/>");
        assert!(content_equivalent(Some(&a), Some(&b)));
        assert!(!content_equivalent(Some(&a), Some(&c)));
    }

    #[test]
    fn test_reference_sets() {
        let a = vec![SourceRef::new("a.ts", 10), SourceRef::new("b.ts", 3)];
        let reordered = vec![SourceRef::new("b.ts", 3), SourceRef::new("a.ts", 10)];
        let moved = vec![SourceRef::new("a.ts", 11), SourceRef::new("b.ts", 3)];
        assert!(references_equivalent(Some(a.as_slice()), Some(reordered.as_slice())));
        assert!(!references_equivalent(Some(a.as_slice()), Some(moved.as_slice())));
        assert!(!references_equivalent(Some(a.as_slice()), None));
        assert!(references_equivalent(None, None));
        assert!(references_equivalent(Some(&[][..]), Some(&[][..])));
    }

    #[test]
    fn test_reference_subset_is_not_equivalent() {
        let one = vec![SourceRef::new("a.ts", 10)];
        let two = vec![SourceRef::new("a.ts", 10), SourceRef::new("b.ts", 5)];
        assert!(!references_equivalent(Some(one.as_slice()), Some(two.as_slice())));
        assert!(!references_equivalent(Some(two.as_slice()), Some(one.as_slice())));
    }

    #[test]
    fn test_icu_reference_on_either_side() {
        let referencing = content("Updated <x id=\"ICU\"/>");
        let plain = content("Updated <x id=\"INTERPOLATION\"/>");
        assert_eq!(
            content_equivalent(Some(&referencing), Some(&plain)),
            content_equivalent(Some(&plain), Some(&referencing))
        );
    }

    #[test]
    fn test_reference_duplicates_collapse() {
        let a = vec![SourceRef::new("a.ts", 1), SourceRef::new("a.ts", 1)];
        let b = vec![SourceRef::new("a.ts", 1)];
        assert!(references_equivalent(Some(a.as_slice()), Some(b.as_slice())));
    }
}
