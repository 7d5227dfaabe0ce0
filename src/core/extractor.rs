// ============================================================================
// XliffMerge - ngx-translate Extractor
// ============================================================================
//
// File: src/core/extractor.rs
// Responsibility: exporting selected translations as an ngx-translate JSON file
// Boundaries:
//   - ✅ Extraction pattern validation
//   - ✅ Entry selection by explicit id or description
//   - ✅ Nested JSON key construction
//   - ❌ Should not contain merge logic
//   - ❌ Should not contain logging
//
// ============================================================================

use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;

use crate::models::catalog::Catalog;
use crate::models::entry::Entry;
use crate::models::error::{MergeError, MergeResult};

/// Pattern part selecting entries with an explicitly set id
const EXPLICIT_ID_PART: &str = "@@";

const PATTERN_SYNTAX: &str = r"^(@@|[a-zA-Z0-9_-]+)(\|(@@|[a-zA-Z0-9_-]+))*$";

/// Angular generates sha1 hex ids for XLIFF and decimal ids for XMB
fn is_generated_id(id: &str) -> bool {
    let is_sha1 = id.len() == 40 && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'));
    is_sha1 || id.chars().all(|c| c.is_ascii_digit())
}

/// Whether the id was written by a developer (`i18n="@@my.id"`)
pub fn is_explicitly_set_id(id: &str) -> bool {
    !id.is_empty() && !is_generated_id(id)
}

/// Selects translations and writes them as ngx-translate JSON
#[derive(Debug, Clone)]
pub struct NgxTranslateExtractor {
    explicit_ids: bool,
    descriptions: Vec<String>,
}

impl NgxTranslateExtractor {
    pub const DEFAULT_PATTERN: &'static str = "@@|ngx-translate";

    /// Validate an extraction pattern like `@@|ngx-translate`
    pub fn check_pattern(pattern: &str) -> Result<(), String> {
        let syntax = Regex::new(PATTERN_SYNTAX).map_err(|e| e.to_string())?;
        if syntax.is_match(pattern) {
            Ok(())
        } else {
            Err(format!(
                "extraction pattern \"{}\" must be a \"|\" separated list of \"@@\" and description names",
                pattern
            ))
        }
    }

    pub fn new(pattern: &str) -> MergeResult<Self> {
        Self::check_pattern(pattern).map_err(MergeError::config)?;
        let mut explicit_ids = false;
        let mut descriptions = Vec::new();
        for part in pattern.split('|') {
            if part == EXPLICIT_ID_PART {
                explicit_ids = true;
            } else {
                descriptions.push(part.to_string());
            }
        }
        Ok(Self {
            explicit_ids,
            descriptions,
        })
    }

    /// Export the translations of `catalog` selected by `pattern` to `output_path`.
    ///
    /// Returns warnings about entries that could not be exported.
    pub fn extract(catalog: &Catalog, pattern: &str, output_path: &Path) -> MergeResult<Vec<String>> {
        let extractor = Self::new(pattern)?;
        let (translations, warnings) = extractor.translations(catalog);
        let json = serde_json::to_string_pretty(&translations)
            .map_err(|e| MergeError::unexpected(e.to_string()))?;
        std::fs::write(output_path, json)?;
        Ok(warnings)
    }

    /// Nested translation object plus warnings
    pub fn translations(&self, catalog: &Catalog) -> (Value, Vec<String>) {
        let mut root = Map::new();
        let mut warnings = Vec::new();

        for entry in catalog.entries() {
            let Some(key) = self.key_of(entry) else {
                continue;
            };
            let Some(message) = Self::message_of(entry) else {
                continue;
            };
            if let Err(warning) = insert(&mut root, &key, message) {
                warnings.push(warning);
            }
        }

        (Value::Object(root), warnings)
    }

    /// Translation key: the explicit id, or the meaning of entries
    /// selected by description.
    fn key_of(&self, entry: &Entry) -> Option<String> {
        if self.explicit_ids && is_explicitly_set_id(entry.id()) {
            return Some(entry.id().to_string());
        }
        let description = entry.description()?;
        if self.descriptions.iter().any(|d| d == description) {
            return entry.meaning().map(str::to_string);
        }
        None
    }

    /// Display text of the translation; ICU messages cannot be exported.
    fn message_of(entry: &Entry) -> Option<String> {
        let normalized = entry.target_content()?.normalized();
        if normalized.is_icu_message() || normalized.contains_icu_reference() {
            return None;
        }
        Some(normalized.display_string().to_string())
    }
}

fn insert(root: &mut Map<String, Value>, key: &str, message: String) -> Result<(), String> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(format!("ngx-translate key \"{}\" has an empty segment, skipped", key));
    }

    let (leaf, path) = match parts.split_last() {
        Some(split) => split,
        None => return Ok(()),
    };
    let mut node = root;
    for part in path {
        let value = node
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match value {
            Value::Object(map) => map,
            _ => {
                return Err(format!(
                    "ngx-translate key \"{}\" conflicts with the message \"{}\", skipped",
                    key, part
                ))
            }
        };
    }
    if let Some(Value::Object(_)) = node.get(*leaf) {
        return Err(format!(
            "ngx-translate key \"{}\" is already used as a prefix, skipped",
            key
        ));
    }
    node.insert(leaf.to_string(), Value::String(message));
    Ok(())
}
