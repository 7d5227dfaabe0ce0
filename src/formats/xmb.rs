// ============================================================================
// XliffMerge - XMB / XTB Format
// ============================================================================
//
// File: src/formats/xmb.rs
// Responsibility: XMB master bundles and their XTB translation bundles
// Boundaries:
//   - ✅ messagebundle parsing and rendering
//   - ✅ translationbundle parsing and rendering
//   - ✅ Completing translation entries from their master bundle
//   - ❌ Should not contain merge decisions
//
// ============================================================================

use encoding_rs::Encoding;
use quick_xml::escape::partial_escape;
use std::path::Path;

use super::{inner_xml, inner_xml_filtered, parse_document, text_of, XmlWriter};
use crate::models::catalog::{Catalog, CatalogFormat};
use crate::models::content::MessageContent;
use crate::models::entry::{Entry, SourceRef, TargetState};
use crate::models::error::{MergeError, MergeResult};

const XMB_DOCTYPE: &str = r#"<!DOCTYPE messagebundle [
<!ELEMENT messagebundle (msg)*>
<!ATTLIST messagebundle class CDATA #IMPLIED>
<!ELEMENT msg (#PCDATA|ph|source)*>
<!ATTLIST msg id CDATA #IMPLIED>
<!ATTLIST msg desc CDATA #IMPLIED>
<!ATTLIST msg meaning CDATA #IMPLIED>
<!ELEMENT source (#PCDATA)>
<!ELEMENT ph (#PCDATA|ex)*>
<!ATTLIST ph name CDATA #REQUIRED>
<!ELEMENT ex (#PCDATA)>
]>"#;

const XTB_DOCTYPE: &str = r#"<!DOCTYPE translationbundle [
<!ELEMENT translationbundle (translation)*>
<!ATTLIST translationbundle lang CDATA #REQUIRED>
<!ELEMENT translation (#PCDATA|ph)*>
<!ATTLIST translation id CDATA #REQUIRED>
<!ELEMENT ph EMPTY>
<!ATTLIST ph name CDATA #REQUIRED>
]>"#;

fn is_source(node: &roxmltree::Node) -> bool {
    node.is_element() && node.tag_name().name() == "source"
}

pub fn parse_xmb(text: &str, path: &Path, encoding: &'static Encoding) -> MergeResult<Catalog> {
    let doc = parse_document(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "messagebundle" {
        return Err(MergeError::malformed(format!(
            "\"{}\" is not an XMB file, root element is <{}>",
            path.display(),
            root.tag_name().name()
        )));
    }

    let mut catalog = Catalog::new(CatalogFormat::Xmb, path, encoding);
    for msg in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "msg")
    {
        let Some(id) = msg.attribute("id").filter(|id| !id.is_empty()) else {
            catalog.count_missing_id();
            continue;
        };
        let refs = msg
            .children()
            .filter(is_source)
            .filter_map(|node| text_of(node).as_deref().and_then(SourceRef::parse))
            .collect();
        let content = inner_xml_filtered(msg, text, |node| !is_source(node));

        catalog.push_loaded(
            Entry::new(id, CatalogFormat::Xmb, MessageContent::from_native(content))
                .with_source_refs(refs)
                .with_notes(
                    msg.attribute("desc").map(str::to_string),
                    msg.attribute("meaning").map(str::to_string),
                ),
        );
    }

    Ok(catalog)
}

/// Parse a translation bundle; source texts and notes come from `master`.
pub fn parse_xtb(
    text: &str,
    path: &Path,
    encoding: &'static Encoding,
    master: Option<&Catalog>,
) -> MergeResult<Catalog> {
    let doc = parse_document(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "translationbundle" {
        return Err(MergeError::malformed(format!(
            "\"{}\" is not an XTB file, root element is <{}>",
            path.display(),
            root.tag_name().name()
        )));
    }

    let mut catalog = Catalog::new(CatalogFormat::Xtb, path, encoding);
    catalog.set_target_language(root.attribute("lang"));
    if let Some(master) = master {
        catalog.set_source_language(master.source_language());
    }

    for translation in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "translation")
    {
        let Some(id) = translation.attribute("id").filter(|id| !id.is_empty()) else {
            catalog.count_missing_id();
            continue;
        };

        let content = MessageContent::from_native(inner_xml(translation, text));
        let (target, state) = if content.is_blank() {
            (None, TargetState::New)
        } else {
            (Some(content), TargetState::Translated)
        };

        let entry = match master.and_then(|m| m.find_by_id(id)) {
            Some(master_entry) => master_entry
                .clone_for_format(CatalogFormat::Xtb)
                .with_target(target, state),
            None => Entry::new(id, CatalogFormat::Xtb, MessageContent::default()).with_target(target, state),
        };
        catalog.push_loaded(entry);
    }

    Ok(catalog)
}

pub fn render_xmb(catalog: &Catalog, beautify: bool) -> String {
    let mut w = XmlWriter::new(catalog.encoding(), beautify);
    w.raw(XMB_DOCTYPE);
    w.open("messagebundle", &[("handler", "angular")]);
    for entry in catalog.entries() {
        let mut attrs = vec![("id", entry.id())];
        if let Some(description) = entry.description() {
            attrs.push(("desc", description));
        }
        if let Some(meaning) = entry.meaning() {
            attrs.push(("meaning", meaning));
        }
        let mut markup = String::new();
        for source_ref in entry.source_refs().unwrap_or_default() {
            markup.push_str(&format!("<source>{}</source>", partial_escape(&source_ref.key())));
        }
        markup.push_str(entry.source_content().native());
        w.markup_element("msg", &attrs, &markup);
    }
    w.close("messagebundle");
    w.finish()
}

pub fn render_xtb(catalog: &Catalog, beautify: bool) -> String {
    let mut w = XmlWriter::new(catalog.encoding(), beautify);
    w.raw(XTB_DOCTYPE);
    w.open("translationbundle", &[("lang", catalog.target_language().unwrap_or_default())]);
    for entry in catalog.entries() {
        let markup = entry.target_content().map(MessageContent::native).unwrap_or_default();
        w.markup_element("translation", &[("id", entry.id())], markup);
    }
    w.close("translationbundle");
    w.finish()
}
