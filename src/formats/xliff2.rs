// ============================================================================
// XliffMerge - XLIFF 2.0 Format
// ============================================================================
//
// File: src/formats/xliff2.rs
// Responsibility: XLIFF 2.0 catalogs as written by the Angular extractor
// Boundaries:
//   - ✅ unit parsing (segment, state, notes)
//   - ✅ Rendering in the Angular layout
//   - ✅ Native segment states and translator notes survive a save
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

const NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:2.0";

fn state_from_native(state: Option<&str>, has_target: bool) -> TargetState {
    match state {
        Some("initial") => TargetState::New,
        Some("reviewed") | Some("final") => TargetState::Final,
        Some(_) => TargetState::Translated,
        None if has_target => TargetState::Translated,
        None => TargetState::New,
    }
}

fn state_to_native(state: TargetState) -> &'static str {
    match state {
        TargetState::New => "initial",
        TargetState::Translated => "translated",
        TargetState::Final => "final",
    }
}

pub fn parse(text: &str, path: &Path, encoding: &'static Encoding) -> MergeResult<Catalog> {
    let doc = parse_document(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "xliff" || !root.attribute("version").is_some_and(|v| v.starts_with('2')) {
        return Err(MergeError::malformed(format!(
            "\"{}\" is not an XLIFF 2.0 file",
            path.display()
        )));
    }

    let mut catalog = Catalog::new(CatalogFormat::Xlf2, path, encoding);
    catalog.set_source_language(root.attribute("srcLang"));
    catalog.set_target_language(root.attribute("trgLang"));

    for unit in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "unit")
    {
        let Some(id) = unit.attribute("id").filter(|id| !id.is_empty()) else {
            catalog.count_missing_id();
            continue;
        };

        let segment = child(unit, "segment");
        let source = segment
            .and_then(|s| child(s, "source"))
            .map(|node| MessageContent::from_native(inner_xml(node, text)))
            .unwrap_or_default();
        let target = segment
            .and_then(|s| child(s, "target"))
            .map(|node| MessageContent::from_native(inner_xml(node, text)));
        let native_state = segment.and_then(|s| s.attribute("state"));
        let state = state_from_native(native_state, target.is_some());

        let mut refs = Vec::new();
        let mut description = None;
        let mut meaning = None;
        let mut preserved = Vec::new();
        if let Some(notes) = child(unit, "notes") {
            for note in notes.children().filter(|n| n.is_element()) {
                match note.attribute("category") {
                    Some("description") => description = text_of(note),
                    Some("meaning") => meaning = text_of(note),
                    Some("location") => {
                        if let Some(source_ref) = text_of(note).as_deref().and_then(SourceRef::parse) {
                            refs.push(source_ref);
                        }
                    }
                    _ => preserved.push(text[note.range()].to_string()),
                }
            }
        }

        catalog.push_loaded(
            Entry::new(id, CatalogFormat::Xlf2, source)
                .with_target(target, state)
                .with_native_state(
                    native_state
                        .filter(|native| *native != state_to_native(state))
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
    let mut root_attrs = vec![
        ("version", "2.0"),
        ("xmlns", NAMESPACE),
        ("srcLang", catalog.source_language().unwrap_or("en")),
    ];
    if let Some(target_language) = catalog.target_language() {
        root_attrs.push(("trgLang", target_language));
    }
    w.open("xliff", &root_attrs);
    w.open("file", &[("original", "ng.template"), ("id", "ngi18n")]);

    for entry in catalog.entries() {
        w.open("unit", &[("id", entry.id())]);
        let refs = entry.source_refs().unwrap_or_default();
        let preserved = entry.preserved_markup();
        if entry.description().is_some()
            || entry.meaning().is_some()
            || !refs.is_empty()
            || !preserved.is_empty()
        {
            w.open("notes", &[]);
            if let Some(description) = entry.description() {
                w.text_element("note", &[("category", "description")], description);
            }
            if let Some(meaning) = entry.meaning() {
                w.text_element("note", &[("category", "meaning")], meaning);
            }
            for source_ref in refs {
                w.text_element("note", &[("category", "location")], &source_ref.key());
            }
            for markup in preserved {
                w.raw(markup);
            }
            w.close("notes");
        }
        let state = entry
            .native_state()
            .unwrap_or_else(|| state_to_native(entry.state()));
        w.open("segment", &[("state", state)]);
        w.markup_element("source", &[], entry.source_content().native());
        if let Some(target) = entry.target_content() {
            w.markup_element("target", &[], target.native());
        }
        w.close("segment");
        w.close("unit");
    }

    w.close("file");
    w.close("xliff");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<xliff version="2.0" xmlns="urn:oasis:names:tc:xliff:document:2.0" srcLang="en" trgLang="de">
  <file original="ng.template" id="ngi18n">
    <unit id="menu">
      <notes>
        <note category="description">Main menu</note>
        <note category="location">src/app/menu.component.html:7,9</note>
      </notes>
      <segment state="reviewed">
        <source>Open <pc id="0" equivStart="START_BOLD_TEXT" equivEnd="CLOSE_BOLD_TEXT" type="fmt" dispStart="&lt;b&gt;" dispEnd="&lt;/b&gt;">file</pc></source>
        <target>Öffne <pc id="0" equivStart="START_BOLD_TEXT" equivEnd="CLOSE_BOLD_TEXT" type="fmt" dispStart="&lt;b&gt;" dispEnd="&lt;/b&gt;">Datei</pc></target>
      </segment>
    </unit>
    <unit id="count">
      <segment>
        <source>{VAR_PLURAL, plural, =1 {one} other {many}}</source>
      </segment>
    </unit>
  </file>
</xliff>
"#;

    #[test]
    fn test_parse_units() {
        let catalog = parse(SAMPLE, Path::new("messages.de.xlf"), encoding_rs::UTF_8).unwrap();
        assert_eq!(catalog.source_language(), Some("en"));
        assert_eq!(catalog.target_language(), Some("de"));

        let menu = catalog.find_by_id("menu").unwrap();
        assert_eq!(menu.state(), TargetState::Final);
        assert_eq!(menu.description(), Some("Main menu"));
        assert_eq!(menu.source_refs().unwrap(), &[SourceRef::new("src/app/menu.component.html", 7)]);
        assert_eq!(
            menu.source_content().normalized().display_string(),
            "Open <b>file</b>"
        );

        let count = catalog.find_by_id("count").unwrap();
        assert_eq!(count.state(), TargetState::New);
        assert!(count.source_content().normalized().is_icu_message());
    }

    #[test]
    fn test_render_then_parse_keeps_entries() {
        let catalog = parse(SAMPLE, Path::new("messages.de.xlf"), encoding_rs::UTF_8).unwrap();
        let rendered = render(&catalog, false);
        assert!(rendered.contains("<segment state=\"reviewed\">"));
        assert!(rendered.contains("<segment state=\"initial\">"));
        let reparsed = parse(&rendered, Path::new("messages.de.xlf"), encoding_rs::UTF_8).unwrap();
        assert_eq!(reparsed.entries(), catalog.entries());
        assert_eq!(reparsed.target_language(), Some("de"));
    }

    #[test]
    fn test_translator_notes_and_state_survive_save() {
        let text = SAMPLE.replace(
            "<note category=\"description\">Main menu</note>",
            "<note category=\"description\">Main menu</note>\n        <note category=\"translator\" id=\"t1\">keep it short</note>",
        );
        let mut catalog = parse(&text, Path::new("messages.de.xlf"), encoding_rs::UTF_8).unwrap();
        let rendered = render(&catalog, true);
        assert!(rendered.contains("<note category=\"translator\" id=\"t1\">keep it short</note>"));
        let reparsed = parse(&rendered, Path::new("messages.de.xlf"), encoding_rs::UTF_8).unwrap();
        assert_eq!(reparsed.entries(), catalog.entries());

        catalog.find_by_id_mut("menu").unwrap().set_state(TargetState::Translated).unwrap();
        let rendered = render(&catalog, false);
        assert!(!rendered.contains("reviewed"));
        assert!(rendered.contains("<segment state=\"translated\">"));
        assert!(rendered.contains("keep it short"));
    }
}
