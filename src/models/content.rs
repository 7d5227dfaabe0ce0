// ============================================================================
// XliffMerge - Message Content Model
// ============================================================================
//
// File: src/models/content.rs
// Responsibility: rich message content (text, placeholders, ICU) and its normalization
// Boundaries:
//   - ✅ Native (raw XML fragment) content storage
//   - ✅ Placeholder recognition across the supported dialects
//   - ✅ Three-shape normalization used by the equivalence comparator
//   - ✅ Display rendering of placeholders
//   - ❌ Should not contain equivalence rules
//   - ❌ Should not contain file level parsing
//
// ============================================================================

use quick_xml::escape::{escape, partial_escape};

use crate::models::catalog::CatalogFormat;
use crate::models::icu::IcuMessage;

/// Angular placeholder names of HTML tags, as `(tag, placeholder stem)`
const TAG_PLACEHOLDERS: &[(&str, &str)] = &[
    ("a", "LINK"),
    ("b", "BOLD_TEXT"),
    ("br", "LINE_BREAK"),
    ("em", "EMPHASISED_TEXT"),
    ("h1", "HEADING_LEVEL1"),
    ("h2", "HEADING_LEVEL2"),
    ("h3", "HEADING_LEVEL3"),
    ("h4", "HEADING_LEVEL4"),
    ("h5", "HEADING_LEVEL5"),
    ("h6", "HEADING_LEVEL6"),
    ("hr", "HORIZONTAL_RULE"),
    ("i", "ITALIC_TEXT"),
    ("li", "LIST_ITEM"),
    ("link", "MEDIA_LINK"),
    ("ol", "ORDERED_LIST"),
    ("p", "PARAGRAPH"),
    ("q", "QUOTATION"),
    ("s", "STRIKETHROUGH_TEXT"),
    ("small", "SMALL_TEXT"),
    ("sub", "SUBSTRIPT"),
    ("sup", "SUPERSCRIPT"),
    ("tbody", "TABLE_BODY"),
    ("td", "TABLE_CELL"),
    ("tfoot", "TABLE_FOOTER"),
    ("th", "TABLE_HEADER_CELL"),
    ("tr", "TABLE_ROW"),
    ("tt", "MONOSPACED_TEXT"),
    ("u", "UNDERLINED_TEXT"),
    ("ul", "UNORDERED_LIST"),
];

/// Message content in the native syntax of its catalog (inner XML of a
/// `<source>`, `<target>`, `<msg>` or `<translation>` element).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageContent {
    native: String,
}

impl MessageContent {
    pub fn from_native<S: Into<String>>(native: S) -> Self {
        Self {
            native: native.into(),
        }
    }

    /// Content made of plain text only
    #[cfg(test)]
    pub fn from_text(text: &str) -> Self {
        Self {
            native: partial_escape(text).into_owned(),
        }
    }

    pub fn native(&self) -> &str {
        &self.native
    }

    pub fn is_blank(&self) -> bool {
        self.native.trim().is_empty()
    }

    /// Surround the content with plain text, used for freshly created targets.
    pub fn with_affixes(&self, prefix: &str, suffix: &str) -> Self {
        Self {
            native: format!(
                "{}{}{}",
                partial_escape(prefix),
                self.native,
                partial_escape(suffix)
            ),
        }
    }

    /// Rewrite the content for another catalog dialect.
    ///
    /// Only XMB to XTB differs: XMB placeholders carry `<ex>` examples that
    /// translation bundles do not allow.
    pub fn for_format(&self, from: CatalogFormat, to: CatalogFormat) -> Self {
        if from != CatalogFormat::Xmb || to != CatalogFormat::Xtb {
            return self.clone();
        }
        let mut native = String::new();
        for part in parse_parts(&self.native) {
            match part {
                Part::Text(text) => native.push_str(&partial_escape(&text)),
                Part::Placeholder(name) => {
                    native.push_str(&format!("<ph name=\"{}\"/>", escape(&name)))
                }
            }
        }
        Self { native }
    }

    /// Classify and canonicalize the content.
    pub fn normalized(&self) -> NormalizedContent {
        NormalizedContent::from_parts(parse_parts(&self.native))
    }
}

/// Which of the three comparison shapes a message has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// The whole message is one ICU plural/select message
    IcuMessage,
    /// Text referring to an ICU message defined elsewhere
    IcuReference,
    /// Plain text with placeholders
    Text,
}

/// Canonical forms of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    shape: ContentShape,
    native: String,
    display: String,
}

impl NormalizedContent {
    fn from_parts(parts: Vec<Part>) -> Self {
        let mut native = String::new();
        let mut display = String::new();
        let mut has_icu_reference = false;
        for part in &parts {
            match part {
                Part::Text(text) => {
                    native.push_str(text);
                    display.push_str(text);
                }
                Part::Placeholder(name) => {
                    has_icu_reference |= is_icu_reference(name);
                    native.push_str(&format!("<ph name=\"{}\"/>", name));
                    display.push_str(&display_placeholder(name));
                }
            }
        }

        if let Some(icu) = IcuMessage::parse(&native) {
            let canonical = icu.to_canonical();
            return Self {
                shape: ContentShape::IcuMessage,
                display: canonical.clone(),
                native: canonical,
            };
        }

        Self {
            shape: if has_icu_reference {
                ContentShape::IcuReference
            } else {
                ContentShape::Text
            },
            native,
            display,
        }
    }

    #[cfg(test)]
    pub fn shape(&self) -> ContentShape {
        self.shape
    }

    pub fn is_icu_message(&self) -> bool {
        self.shape == ContentShape::IcuMessage
    }

    pub fn contains_icu_reference(&self) -> bool {
        self.shape == ContentShape::IcuReference
    }

    /// Text with placeholders in the canonical `<ph name="..."/>` form; the
    /// canonical ICU rendering for ICU messages.
    pub fn native_string(&self) -> &str {
        &self.native
    }

    /// Human readable form: interpolations as `{{n}}`, tags as HTML tags
    pub fn display_string(&self) -> &str {
        &self.display
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Placeholder(String),
}

fn parse_parts(native: &str) -> Vec<Part> {
    let wrapped = format!("<m>{}</m>", native);
    let mut parts = Vec::new();
    match roxmltree::Document::parse(&wrapped) {
        Ok(doc) => collect_parts(doc.root_element(), &mut parts),
        // Not well-formed on its own, compare it as literal text
        Err(_) => parts.push(Part::Text(native.to_string())),
    }
    parts
}

fn collect_parts(node: roxmltree::Node, parts: &mut Vec<Part>) {
    for child in node.children() {
        if child.is_text() {
            push_text(parts, child.text().unwrap_or_default());
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            // XLIFF 1.2
            "x" => push_placeholder(parts, child.attribute("id")),
            // XMB / XTB use `name`, XLIFF 2.0 uses `equiv`
            "ph" => push_placeholder(
                parts,
                child
                    .attribute("name")
                    .or_else(|| child.attribute("equiv"))
                    .or_else(|| child.attribute("id")),
            ),
            // XLIFF 2.0 paired code
            "pc" => {
                push_placeholder(parts, child.attribute("equivStart"));
                collect_parts(child, parts);
                push_placeholder(parts, child.attribute("equivEnd"));
            }
            _ => collect_parts(child, parts),
        }
    }
}

fn push_text(parts: &mut Vec<Part>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Part::Text(last)) = parts.last_mut() {
        last.push_str(text);
    } else {
        parts.push(Part::Text(text.to_string()));
    }
}

fn push_placeholder(parts: &mut Vec<Part>, name: Option<&str>) {
    if let Some(name) = name {
        parts.push(Part::Placeholder(name.to_string()));
    }
}

fn is_icu_reference(name: &str) -> bool {
    name == "ICU" || name.strip_prefix("ICU_").is_some_and(is_number)
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// `NAME_3` -> (`NAME`, Some(3))
fn split_index(name: &str) -> (&str, Option<usize>) {
    match name.rsplit_once('_') {
        Some((stem, index)) if is_number(index) => (stem, index.parse().ok()),
        _ => (name, None),
    }
}

fn tag_for_stem(stem: &str) -> String {
    TAG_PLACEHOLDERS
        .iter()
        .find(|(_, placeholder)| *placeholder == stem)
        .map(|(tag, _)| tag.to_string())
        .unwrap_or_else(|| stem.to_lowercase().replace('_', "-"))
}

fn display_placeholder(name: &str) -> String {
    let (stem, index) = split_index(name);
    if stem == "INTERPOLATION" {
        return format!("{{{{{}}}}}", index.unwrap_or(0));
    }
    if stem == "ICU" {
        return format!("<ICU-Message-Ref_{}/>", index.unwrap_or(0));
    }
    if let Some(tag) = stem.strip_prefix("START_TAG_") {
        return format!("<{}>", tag_for_stem(tag));
    }
    if let Some(tag) = stem.strip_prefix("CLOSE_TAG_") {
        return format!("</{}>", tag_for_stem(tag));
    }
    if let Some(tag) = stem.strip_prefix("START_") {
        return format!("<{}>", tag_for_stem(tag));
    }
    if let Some(tag) = stem.strip_prefix("CLOSE_") {
        return format!("</{}>", tag_for_stem(tag));
    }
    if let Some(tag) = stem.strip_prefix("TAG_") {
        return format!("<{}>", tag_for_stem(tag));
    }
    if stem == "LINE_BREAK" || stem == "HORIZONTAL_RULE" {
        return format!("<{}>", tag_for_stem(stem));
    }
    format!("{{{{{}}}}}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let normalized = MessageContent::from_native("Hello &amp; bye").normalized();
        assert_eq!(normalized.shape(), ContentShape::Text);
        assert_eq!(normalized.display_string(), "Hello & bye");
    }

    #[test]
    fn test_xliff_placeholders_display() {
        let content = MessageContent::from_native(
            "Hi <x id=\"INTERPOLATION\" equiv-text=\"{{ name }}\"/>, see <x id=\"START_BOLD_TEXT\" ctype=\"x-b\"/>this<x id=\"CLOSE_BOLD_TEXT\" ctype=\"x-b\"/> and <x id=\"INTERPOLATION_1\"/>",
        );
        assert_eq!(
            content.normalized().display_string(),
            "Hi {{0}}, see <b>this</b> and {{1}}"
        );
    }

    #[test]
    fn test_equiv_text_does_not_matter() {
        let a = MessageContent::from_native("Hi <x id=\"INTERPOLATION\" equiv-text=\"{{ a }}\"/>");
        let b = MessageContent::from_native("Hi <x id=\"INTERPOLATION\" equiv-text=\"{{ b }}\"/>");
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn test_xliff2_paired_codes() {
        let content = MessageContent::from_native(
            "<pc id=\"0\" equivStart=\"START_TAG_SPAN\" equivEnd=\"CLOSE_TAG_SPAN\">red</pc><ph id=\"1\" equiv=\"LINE_BREAK\"/>",
        );
        assert_eq!(content.normalized().display_string(), "<span>red</span><br>");
    }

    #[test]
    fn test_icu_message_shape() {
        let content = MessageContent::from_native(
            "{VAR_PLURAL, plural, =0 {none} other {<x id=\"INTERPOLATION\"/> items}}",
        );
        let normalized = content.normalized();
        assert!(normalized.is_icu_message());
        assert_eq!(
            normalized.native_string(),
            "{VAR_PLURAL, plural, =0 {none} other {<ph name=\"INTERPOLATION\"/> items}}"
        );
    }

    #[test]
    fn test_icu_reference_shape() {
        let content = MessageContent::from_native("Updated <x id=\"ICU\" equiv-text=\"{minutes, plural, ...}\"/>");
        let normalized = content.normalized();
        assert!(normalized.contains_icu_reference());
        assert_eq!(normalized.display_string(), "Updated <ICU-Message-Ref_0/>");
    }

    #[test]
    fn test_xmb_to_xtb_strips_examples() {
        let xmb = MessageContent::from_native(
            "Hi <ph name=\"INTERPOLATION\"><ex>{{name}}</ex>{{name}}</ph> &amp; bye",
        );
        let xtb = xmb.for_format(CatalogFormat::Xmb, CatalogFormat::Xtb);
        assert_eq!(xtb.native(), "Hi <ph name=\"INTERPOLATION\"/> &amp; bye");
        let same = xmb.for_format(CatalogFormat::Xlf, CatalogFormat::Xlf);
        assert_eq!(same, xmb);
    }

    #[test]
    fn test_affixes_are_escaped() {
        let content = MessageContent::from_text("Hello").with_affixes("<", ">");
        assert_eq!(content.native(), "&lt;Hello&gt;");
    }

    #[test]
    fn test_malformed_fragment_is_text() {
        let normalized = MessageContent::from_native("a < b").normalized();
        assert_eq!(normalized.shape(), ContentShape::Text);
        assert_eq!(normalized.display_string(), "a < b");
    }
}
