// ============================================================================
// XliffMerge - Catalog Model
// ============================================================================
//
// File: src/models/catalog.rs
// Responsibility: ordered entry collection of one language file
// Boundaries:
//   - ✅ Catalog format variants and their capabilities
//   - ✅ Entry lookup, removal and order aware import
//   - ✅ Catalog metadata (languages, path, encoding)
//   - ❌ Should not contain file parsing or writing
//   - ❌ Should not contain merge decisions
//
// ============================================================================

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::content::MessageContent;
use crate::models::entry::{Entry, TargetState};
use crate::models::error::{MergeError, MergeResult};

/// Which entry fields a format allows to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub target_content: bool,
    pub source_content: bool,
    pub source_references: bool,
    pub description_and_meaning: bool,
}

/// Supported catalog formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// XLIFF 1.2
    Xlf,
    /// XLIFF 2.0
    Xlf2,
    /// XML message bundle (master only)
    Xmb,
    /// XML translation bundle (paired with XMB)
    Xtb,
}

impl CatalogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogFormat::Xlf => "xlf",
            CatalogFormat::Xlf2 => "xlf2",
            CatalogFormat::Xmb => "xmb",
            CatalogFormat::Xtb => "xtb",
        }
    }

    /// Parse a master format name as used in profiles
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "xlf" | "xliff" => Ok(CatalogFormat::Xlf),
            "xlf2" | "xliff2" => Ok(CatalogFormat::Xlf2),
            "xmb" => Ok(CatalogFormat::Xmb),
            _ => Err(format!(
                "i18nFormat \"{}\" invalid, must be \"xlf\", \"xlf2\" or \"xmb\"",
                s
            )),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            CatalogFormat::Xlf | CatalogFormat::Xlf2 => Capabilities {
                target_content: true,
                source_content: true,
                source_references: true,
                description_and_meaning: true,
            },
            CatalogFormat::Xmb => Capabilities {
                target_content: false,
                source_content: true,
                source_references: true,
                description_and_meaning: true,
            },
            CatalogFormat::Xtb => Capabilities {
                target_content: true,
                source_content: false,
                source_references: false,
                description_and_meaning: false,
            },
        }
    }

    /// Format of the language files generated from a master of this format
    pub fn translation_format(&self) -> CatalogFormat {
        match self {
            CatalogFormat::Xmb => CatalogFormat::Xtb,
            other => *other,
        }
    }

    /// File extension of catalogs in this format
    pub fn file_extension(&self) -> &'static str {
        match self {
            CatalogFormat::Xlf | CatalogFormat::Xlf2 => "xlf",
            CatalogFormat::Xmb => "xmb",
            CatalogFormat::Xtb => "xtb",
        }
    }
}

impl Default for CatalogFormat {
    fn default() -> Self {
        CatalogFormat::Xlf
    }
}

impl std::fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a freshly imported entry gets its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Default language: target is the source, state final
    AutoTranslate,
    /// Target is prefix + source + suffix, state translated
    CopySource,
    /// No translation, state new
    Untranslated,
}

impl SeedPolicy {
    pub fn for_language(is_default_language: bool, use_source_as_target: bool) -> Self {
        if is_default_language {
            SeedPolicy::AutoTranslate
        } else if use_source_as_target {
            SeedPolicy::CopySource
        } else {
            SeedPolicy::Untranslated
        }
    }
}

/// Where an imported entry is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition<'a> {
    /// At the end of the catalog
    Append,
    /// Before every other entry
    First,
    /// Directly after the entry with this id (appended if it is gone)
    After(&'a str),
}

/// All entries of one language file
#[derive(Debug, Clone)]
pub struct Catalog {
    format: CatalogFormat,
    path: PathBuf,
    encoding: &'static Encoding,
    source_language: Option<String>,
    target_language: Option<String>,
    entries: Vec<Entry>,
    missing_id_count: usize,
    warnings: Vec<String>,
    new_target_prefix: String,
    new_target_suffix: String,
}

impl Catalog {
    pub fn new<P: Into<PathBuf>>(format: CatalogFormat, path: P, encoding: &'static Encoding) -> Self {
        Self {
            format,
            path: path.into(),
            encoding,
            source_language: None,
            target_language: None,
            entries: Vec::new(),
            missing_id_count: 0,
            warnings: Vec::new(),
            new_target_prefix: String::new(),
            new_target_suffix: String::new(),
        }
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn set_source_language<S: Into<String>>(&mut self, language: Option<S>) {
        self.source_language = language.map(Into::into);
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    pub fn set_target_language<S: Into<String>>(&mut self, language: Option<S>) {
        self.target_language = language.map(Into::into);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries found without an id while loading
    pub fn missing_id_count(&self) -> usize {
        self.missing_id_count
    }

    /// Problems noticed while loading
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<Entry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Text put around the target of entries created by `import_entry`.
    pub fn set_new_entry_affixes<S: Into<String>>(&mut self, prefix: S, suffix: S) {
        self.new_target_prefix = prefix.into();
        self.new_target_suffix = suffix.into();
    }

    /// Add an entry while loading; duplicates are dropped with a warning.
    pub fn push_loaded(&mut self, entry: Entry) {
        if self.position(entry.id()).is_some() {
            self.warnings.push(format!(
                "duplicate trans-unit id \"{}\" in \"{}\", keeping the first one",
                entry.id(),
                self.path.display()
            ));
            return;
        }
        self.entries.push(entry);
    }

    pub fn count_missing_id(&mut self) {
        self.missing_id_count += 1;
    }

    /// Copy `foreign` (an entry of the master catalog) into this catalog.
    pub fn import_entry(
        &mut self,
        foreign: &Entry,
        seed: SeedPolicy,
        position: InsertPosition<'_>,
    ) -> MergeResult<&mut Entry> {
        if self.position(foreign.id()).is_some() {
            return Err(MergeError::unexpected(format!(
                "trans-unit \"{}\" already exists in \"{}\"",
                foreign.id(),
                self.path.display()
            )));
        }

        let mut entry = foreign.clone_for_format(self.format);
        match seed {
            SeedPolicy::AutoTranslate => {
                let content = entry.source_content().clone();
                entry.translate(content)?;
                entry.set_state(TargetState::Final)?;
            }
            SeedPolicy::CopySource => {
                let content = entry
                    .source_content()
                    .with_affixes(&self.new_target_prefix, &self.new_target_suffix);
                entry.translate(content)?;
                entry.set_state(TargetState::Translated)?;
            }
            SeedPolicy::Untranslated => {
                if !self.new_target_prefix.is_empty() || !self.new_target_suffix.is_empty() {
                    let content = MessageContent::default()
                        .with_affixes(&self.new_target_prefix, &self.new_target_suffix);
                    entry.translate(content)?;
                }
                entry.set_state(TargetState::New)?;
            }
        }

        let index = match position {
            InsertPosition::Append => self.entries.len(),
            InsertPosition::First => 0,
            InsertPosition::After(id) => self
                .position(id)
                .map(|index| index + 1)
                .unwrap_or(self.entries.len()),
        };
        self.entries.insert(index, entry);
        Ok(&mut self.entries[index])
    }

    /// New catalog for `language` holding every entry of this (master) catalog.
    pub fn create_for_language<S: Into<String>, P: Into<PathBuf>>(
        &self,
        language: S,
        path: P,
        seed: SeedPolicy,
        prefix: &str,
        suffix: &str,
    ) -> MergeResult<Catalog> {
        let mut catalog = Catalog::new(self.format.translation_format(), path, self.encoding);
        catalog.set_source_language(self.source_language.clone());
        catalog.set_target_language(Some(language));
        catalog.set_new_entry_affixes(prefix, suffix);
        for entry in &self.entries {
            catalog.import_entry(entry, seed, InsertPosition::Append)?;
        }
        Ok(catalog)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master() -> Catalog {
        let mut catalog = Catalog::new(CatalogFormat::Xlf, "messages.xlf", encoding_rs::UTF_8);
        catalog.set_source_language(Some("en"));
        for (id, text) in [("1", "Hello"), ("2", "Bye")] {
            catalog.push_loaded(Entry::new(id, CatalogFormat::Xlf, MessageContent::from_text(text)));
        }
        catalog
    }

    #[test]
    fn test_pairing_rule() {
        assert_eq!(CatalogFormat::Xmb.translation_format(), CatalogFormat::Xtb);
        assert_eq!(CatalogFormat::Xlf.translation_format(), CatalogFormat::Xlf);
        assert_eq!(CatalogFormat::Xlf2.translation_format(), CatalogFormat::Xlf2);
        assert!(CatalogFormat::from_str("xtb").is_err());
        assert_eq!(CatalogFormat::from_str("XLF2"), Ok(CatalogFormat::Xlf2));
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let mut catalog = master();
        catalog.push_loaded(Entry::new("1", CatalogFormat::Xlf, MessageContent::from_text("Other")));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.warnings().len(), 1);
        assert_eq!(
            catalog.find_by_id("1").unwrap().source_content().native(),
            "Hello"
        );
    }

    #[test]
    fn test_import_positions() {
        let source = master();
        let mut target = Catalog::new(CatalogFormat::Xlf, "messages.de.xlf", encoding_rs::UTF_8);
        target
            .import_entry(&source.entries()[1], SeedPolicy::Untranslated, InsertPosition::Append)
            .unwrap();
        target
            .import_entry(&source.entries()[0], SeedPolicy::Untranslated, InsertPosition::First)
            .unwrap();
        let third = Entry::new("3", CatalogFormat::Xlf, MessageContent::from_text("Third"));
        target
            .import_entry(&third, SeedPolicy::Untranslated, InsertPosition::After("1"))
            .unwrap();
        let ids: Vec<_> = target.entries().iter().map(Entry::id).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);
        assert!(target
            .import_entry(&third, SeedPolicy::Untranslated, InsertPosition::Append)
            .is_err());
    }

    #[test]
    fn test_seed_policies() {
        let source = master();
        let mut target = Catalog::new(CatalogFormat::Xlf, "messages.de.xlf", encoding_rs::UTF_8);
        target.set_new_entry_affixes("[", "]");

        let copied = target
            .import_entry(&source.entries()[0], SeedPolicy::CopySource, InsertPosition::Append)
            .unwrap();
        assert_eq!(copied.target_content().unwrap().native(), "[Hello]");
        assert_eq!(copied.state(), TargetState::Translated);

        let untranslated = target
            .import_entry(&source.entries()[1], SeedPolicy::Untranslated, InsertPosition::Append)
            .unwrap();
        assert_eq!(untranslated.target_content().unwrap().native(), "[]");
        assert_eq!(untranslated.state(), TargetState::New);
    }

    #[test]
    fn test_create_for_default_language() {
        let created = master()
            .create_for_language("en", "messages.en.xlf", SeedPolicy::AutoTranslate, "", "")
            .unwrap();
        assert_eq!(created.target_language(), Some("en"));
        assert_eq!(created.len(), 2);
        for entry in created.entries() {
            assert_eq!(entry.state(), TargetState::Final);
            assert_eq!(entry.target_content(), Some(entry.source_content()));
        }
    }
}
