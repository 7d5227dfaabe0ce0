// ============================================================================
// XliffMerge - XLIFF 1.2 Format
// ============================================================================
//
// File: src/formats/xliff.rs
// Responsibility: XLIFF 1.2 catalogs as written by the Angular extractor
// Boundaries:
//   - ✅ trans-unit parsing (source, target, state, locations, notes)
//   - ✅ Rendering in the Angular layout
//   - ✅ Native states and uninterpreted unit children survive a save
//   - ❌ Should not contain merge decisions
//
// ============================================================================

use encoding_rs::Encoding;
use std::path::Path;

use super::{child, inner_xml, parse_document, text_of, XmlWriter};
use crate::models::catalog::{Catalog, CatalogFormat};
use crate::models::content::MessageContent;
use crate::models::entry::{Entry, SourceRef, TargetState};
use crate::models::error::{MergeError, MergeResult};

const NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

/// XLIFF 1.2 `state` attribute to workflow state
fn state_from_native(state: Option<&str>, has_target: bool) -> TargetState {
    match state {
        Some("new") | Some("needs-translation") => TargetState::New,
        Some("final") | Some("signed-off") => TargetState::Final,
        Some(_) => TargetState::Translated,
        None if has_target => TargetState::Translated,
        None => TargetState::New,
    }
}

fn is_location_group(node: &roxmltree::Node) -> bool {
    node.is_element()
        && node.tag_name().name() == "context-group"
        && node.attribute("purpose") == Some("location")
}

/// Children of a trans-unit that the entry model reads and `render` writes
fn is_interpreted(node: &roxmltree::Node) -> bool {
    match node.tag_name().name() {
        "source" | "target" => true,
        "context-group" => is_location_group(node),
        "note" => matches!(node.attribute("from"), Some("description") | Some("meaning")),
        _ => false,
    }
}

pub fn parse(text: &str, path: &Path, encoding: &'static Encoding) -> MergeResult<Catalog> {
    let doc = parse_document(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "xliff" {
        return Err(MergeError::malformed(format!(
            "\"{}\" is not an XLIFF file, root element is <{}>",
            path.display(),
            root.tag_name().name()
        )));
    }
    if let Some(version) = root.attribute("version") {
        if version.starts_with('2') {
            return Err(MergeError::malformed(format!(
                "\"{}\" is XLIFF {}, expected XLIFF 1.2 (use i18nFormat \"xlf2\")",
                path.display(),
                version
            )));
        }
    }

    let mut catalog = Catalog::new(CatalogFormat::Xlf, path, encoding);
    if let Some(file) = child(root, "file") {
        catalog.set_source_language(file.attribute("source-language"));
        catalog.set_target_language(file.attribute("target-language"));
    }

    for unit in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "trans-unit")
    {
        let Some(id) = unit.attribute("id").filter(|id| !id.is_empty()) else {
            catalog.count_missing_id();
            continue;
        };

        let source = child(unit, "source")
            .map(|node| MessageContent::from_native(inner_xml(node, text)))
            .unwrap_or_default();
        let target_node = child(unit, "target");
        let target = target_node.map(|node| MessageContent::from_native(inner_xml(node, text)));
        let native_state = target_node.and_then(|node| node.attribute("state"));
        let state = state_from_native(native_state, target.is_some());

        let mut refs = Vec::new();
        for group in unit.children().filter(is_location_group) {
            let mut file = None;
            let mut line = None;
            for context in group.children().filter(|n| n.is_element()) {
                match context.attribute("context-type") {
                    Some("sourcefile") => file = text_of(context),
                    Some("linenumber") => {
                        line = text_of(context).and_then(|l| l.parse::<u32>().ok())
                    }
                    _ => {}
                }
            }
            if let (Some(file), Some(line)) = (file, line) {
                refs.push(SourceRef::new(file, line));
            }
        }

        let mut description = None;
        let mut meaning = None;
        for note in unit
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "note")
        {
            match note.attribute("from") {
                Some("description") => description = text_of(note),
                Some("meaning") => meaning = text_of(note),
                _ => {}
            }
        }

        let preserved = unit
            .children()
            .filter(|n| n.is_element() && !is_interpreted(n))
            .map(|n| text[n.range()].to_string())
            .collect();

        catalog.push_loaded(
            Entry::new(id, CatalogFormat::Xlf, source)
                .with_target(target, state)
                .with_native_state(
                    native_state
                        .filter(|native| *native != state.as_str())
                        .map(str::to_string),
                )
                .with_source_refs(refs)
                .with_notes(description, meaning)
                .with_preserved_markup(preserved),
        );
    }

    Ok(catalog)
}

pub fn render(catalog: &Catalog, beautify: bool) -> String {
    let mut w = XmlWriter::new(catalog.encoding(), beautify);
    w.open("xliff", &[("version", "1.2"), ("xmlns", NAMESPACE)]);

    let mut file_attrs = vec![("source-language", catalog.source_language().unwrap_or("en"))];
    if let Some(target_language) = catalog.target_language() {
        file_attrs.push(("target-language", target_language));
    }
    file_attrs.push(("datatype", "plaintext"));
    file_attrs.push(("original", "ng2.template"));
    w.open("file", &file_attrs);
    w.open("body", &[]);

    for entry in catalog.entries() {
        w.open("trans-unit", &[("id", entry.id()), ("datatype", "html")]);
        w.markup_element("source", &[], entry.source_content().native());
        if let Some(target) = entry.target_content() {
            let state = entry.native_state().unwrap_or(entry.state().as_str());
            w.markup_element("target", &[("state", state)], target.native());
        }
        for source_ref in entry.source_refs().unwrap_or_default() {
            let line = source_ref.line_number.to_string();
            w.open("context-group", &[("purpose", "location")]);
            w.text_element("context", &[("context-type", "sourcefile")], &source_ref.source_file);
            w.text_element("context", &[("context-type", "linenumber")], &line);
            w.close("context-group");
        }
        if let Some(description) = entry.description() {
            w.text_element("note", &[("priority", "1"), ("from", "description")], description);
        }
        if let Some(meaning) = entry.meaning() {
            w.text_element("note", &[("priority", "1"), ("from", "meaning")], meaning);
        }
        for markup in entry.preserved_markup() {
            w.raw(markup);
        }
        w.close("trans-unit");
    }

    w.close("body");
    w.close("file");
    w.close("xliff");
    w.finish()
}
