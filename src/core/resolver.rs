// ============================================================================
// XliffMerge - ID Change Resolver
// ============================================================================
//
// File: src/core/resolver.rs
// Responsibility: finding the old entry of a master entry whose id changed
// Boundaries:
//   - ✅ Rename candidate lookup by equivalent source content
//   - ❌ Should not mutate catalogs
//   - ❌ Should not count or report
//
// ============================================================================

use crate::core::comparator::content_equivalent;
use crate::models::catalog::Catalog;
use crate::models::entry::Entry;

/// First entry of `target` (in catalog order) whose source content is
/// equivalent to the source content of `master_entry`.
pub fn resolve_rename<'a>(master_entry: &Entry, target: &'a Catalog) -> Option<&'a Entry> {
    let source = master_entry.source_content();
    target
        .entries()
        .iter()
        .find(|entry| content_equivalent(Some(source), Some(entry.source_content())))
}
