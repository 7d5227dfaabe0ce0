// ============================================================================
// XliffMerge - Catalog Formats
// ============================================================================
//
// File: src/formats/mod.rs
// Responsibility: reading and writing catalog files in their native formats
// Boundaries:
//   - ✅ Format dispatch for load and save
//   - ✅ Text encoding and decoding
//   - ✅ Shared XML reading and writing helpers
//   - ❌ Should not contain merge decisions
//   - ❌ Should not contain logging
//
// ============================================================================

pub mod xliff;
pub mod xliff2;
pub mod xmb;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use quick_xml::escape::{escape, partial_escape};
use std::path::Path;

use crate::models::catalog::{Catalog, CatalogFormat};
use crate::models::error::{MergeError, MergeResult};

/// Load a catalog file.
///
/// XTB files only carry translations; `master_path` names the XMB master
/// that provides their source texts.
pub fn load(
    format: CatalogFormat,
    path: &Path,
    encoding: &'static Encoding,
    master_path: Option<&Path>,
) -> MergeResult<Catalog> {
    let text = read_text(path, encoding)?;
    match format {
        CatalogFormat::Xlf => xliff::parse(&text, path, encoding),
        CatalogFormat::Xlf2 => xliff2::parse(&text, path, encoding),
        CatalogFormat::Xmb => xmb::parse_xmb(&text, path, encoding),
        CatalogFormat::Xtb => {
            let master = match master_path {
                Some(master_path) => Some(xmb::parse_xmb(
                    &read_text(master_path, encoding)?,
                    master_path,
                    encoding,
                )?),
                None => None,
            };
            xmb::parse_xtb(&text, path, encoding, master.as_ref())
        }
    }
}

/// Render a catalog to its file format
pub fn render(catalog: &Catalog, beautify: bool) -> String {
    match catalog.format() {
        CatalogFormat::Xlf => xliff::render(catalog, beautify),
        CatalogFormat::Xlf2 => xliff2::render(catalog, beautify),
        CatalogFormat::Xmb => xmb::render_xmb(catalog, beautify),
        CatalogFormat::Xtb => xmb::render_xtb(catalog, beautify),
    }
}

/// Write a catalog back to its path in its encoding.
pub fn save(catalog: &Catalog, beautify: bool) -> MergeResult<()> {
    let text = render(catalog, beautify);
    std::fs::write(catalog.path(), encode(&text, catalog.encoding()))?;
    Ok(())
}

/// Encoding named in the XML declaration and used for the bytes on disk
fn written_encoding(encoding: &'static Encoding) -> &'static Encoding {
    if encoding == UTF_16LE || encoding == UTF_16BE {
        encoding
    } else {
        encoding.output_encoding()
    }
}

/// encoding_rs has no UTF-16 encoder, those files are written with a BOM by hand.
/// Elsewhere unmappable characters become numeric character references.
fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let encoding = written_encoding(encoding);
    if encoding == UTF_16LE || encoding == UTF_16BE {
        let mut bytes = Vec::with_capacity(2 * (text.len() + 1));
        for unit in std::iter::once(0xFEFF_u16).chain(text.encode_utf16()) {
            if encoding == UTF_16LE {
                bytes.extend_from_slice(&unit.to_le_bytes());
            } else {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
        }
        return bytes;
    }
    encoding.encode(text).0.into_owned()
}

fn read_text(path: &Path, encoding: &'static Encoding) -> MergeResult<String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            MergeError::not_found(format!("file \"{}\" not found", path.display()))
        }
        _ => MergeError::from(e),
    })?;
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(MergeError::malformed(format!(
            "file \"{}\" is not valid {}",
            path.display(),
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Parse an XML document, DTDs allowed (XMB files carry one).
pub(crate) fn parse_document(text: &str) -> MergeResult<roxmltree::Document<'_>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    Ok(roxmltree::Document::parse_with_options(text, options)?)
}

/// Raw markup between the start and end tag of `node`, children for which
/// `keep` is false are left out.
pub(crate) fn inner_xml_filtered<F>(node: roxmltree::Node, text: &str, keep: F) -> String
where
    F: Fn(&roxmltree::Node) -> bool,
{
    node.children()
        .filter(|child| keep(child))
        .map(|child| &text[child.range()])
        .collect()
}

pub(crate) fn inner_xml(node: roxmltree::Node, text: &str) -> String {
    inner_xml_filtered(node, text, |_| true)
}

/// First child element with the given local name
pub(crate) fn child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
}

/// Trimmed text content of an element, `None` when empty
pub(crate) fn text_of(node: roxmltree::Node) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Minimal streaming XML writer producing the layout of Angular's extractor
pub(crate) struct XmlWriter {
    out: String,
    beautify: bool,
    depth: usize,
}

impl XmlWriter {
    pub fn new(encoding: &'static Encoding, beautify: bool) -> Self {
        let mut writer = Self {
            out: String::new(),
            beautify,
            depth: 0,
        };
        writer.line(&format!(
            "<?xml version=\"1.0\" encoding=\"{}\" ?>",
            written_encoding(encoding).name()
        ));
        writer
    }

    /// Emit a line of markup as is (doctype declarations)
    pub fn raw(&mut self, markup: &str) {
        self.line(markup);
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) {
        let tag = format!("<{}{}>", name, attributes(attrs));
        self.line(&tag);
        self.depth += 1;
    }

    pub fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", name));
    }

    /// Element holding plain text
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) {
        self.line(&format!(
            "<{0}{1}>{2}</{0}>",
            name,
            attributes(attrs),
            partial_escape(text)
        ));
    }

    /// Element holding already serialized markup
    pub fn markup_element(&mut self, name: &str, attrs: &[(&str, &str)], markup: &str) {
        self.line(&format!("<{0}{1}>{2}</{0}>", name, attributes(attrs), markup));
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, markup: &str) {
        if self.beautify {
            for _ in 0..self.depth {
                self.out.push_str("  ");
            }
        }
        self.out.push_str(markup);
        self.out.push('\n');
    }
}

fn attributes(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape(*value)))
        .collect()
}
