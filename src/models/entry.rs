// ============================================================================
// XliffMerge - Catalog Entry Model
// ============================================================================
//
// File: src/models/entry.rs
// Responsibility: a single translatable unit and its workflow state
// Boundaries:
//   - ✅ Entry fields and getters
//   - ✅ Capability guarded setters
//   - ✅ Workflow state enumeration
//   - ❌ Should not contain merge decisions
//   - ❌ Should not contain serialization
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::catalog::{Capabilities, CatalogFormat};
use crate::models::content::MessageContent;
use crate::models::error::{MergeError, MergeResult};

/// Translation workflow state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    /// No human translation yet
    New,
    /// Translated, not reviewed
    Translated,
    /// Reviewed and locked
    Final,
}

impl TargetState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetState::New => "new",
            TargetState::Translated => "translated",
            TargetState::Final => "final",
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Location of a message in the application sources
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef {
    /// Source file path
    pub source_file: String,
    /// Line number inside the file
    pub line_number: u32,
}

impl SourceRef {
    pub fn new<S: Into<String>>(source_file: S, line_number: u32) -> Self {
        Self {
            source_file: source_file.into(),
            line_number,
        }
    }

    /// Canonical `file:line` key
    pub fn key(&self) -> String {
        format!("{}:{}", self.source_file, self.line_number)
    }

    /// Parse `file:line`; Angular may write line ranges like `file:10,12`.
    pub fn parse(value: &str) -> Option<Self> {
        let (file, line) = value.trim().rsplit_once(':')?;
        let line = line.split(',').next()?.trim().parse().ok()?;
        Some(Self::new(file, line))
    }
}

/// One translatable unit of a catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    id: String,
    format: CatalogFormat,
    source: MessageContent,
    target: Option<MessageContent>,
    state: TargetState,
    source_refs: Vec<SourceRef>,
    description: Option<String>,
    meaning: Option<String>,
    /// State value as found in the file, written back until the state changes
    native_state: Option<String>,
    /// Child elements the tool does not interpret (translator notes, custom
    /// context groups), kept as raw XML
    preserved_markup: Vec<String>,
}

impl Entry {
    pub fn new<S: Into<String>>(id: S, format: CatalogFormat, source: MessageContent) -> Self {
        Self {
            id: id.into(),
            format,
            source,
            target: None,
            state: TargetState::New,
            source_refs: Vec::new(),
            description: None,
            meaning: None,
            native_state: None,
            preserved_markup: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: Option<MessageContent>, state: TargetState) -> Self {
        self.target = target;
        self.state = state;
        self
    }

    pub fn with_source_refs(mut self, refs: Vec<SourceRef>) -> Self {
        self.source_refs = refs;
        self
    }

    pub fn with_notes(mut self, description: Option<String>, meaning: Option<String>) -> Self {
        self.description = description;
        self.meaning = meaning;
        self
    }

    pub fn with_native_state(mut self, native_state: Option<String>) -> Self {
        self.native_state = native_state;
        self
    }

    pub fn with_preserved_markup(mut self, markup: Vec<String>) -> Self {
        self.preserved_markup = markup;
        self
    }

    /// Copy of this entry as a fresh, untranslated entry of another catalog format
    pub fn clone_for_format(&self, format: CatalogFormat) -> Self {
        Self {
            id: self.id.clone(),
            format,
            source: self.source.for_format(self.format, format),
            target: None,
            state: TargetState::New,
            source_refs: self.source_refs.clone(),
            description: self.description.clone(),
            meaning: self.meaning.clone(),
            native_state: None,
            preserved_markup: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    pub fn capabilities(&self) -> Capabilities {
        self.format.capabilities()
    }

    pub fn source_content(&self) -> &MessageContent {
        &self.source
    }

    pub fn target_content(&self) -> Option<&MessageContent> {
        self.target.as_ref()
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    /// Source references, `None` when the format does not carry them
    pub fn source_refs(&self) -> Option<&[SourceRef]> {
        self.capabilities()
            .source_references
            .then_some(self.source_refs.as_slice())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    /// State attribute value read from the file, `None` once the state was set
    pub fn native_state(&self) -> Option<&str> {
        self.native_state.as_deref()
    }

    pub fn preserved_markup(&self) -> &[String] {
        &self.preserved_markup
    }

    pub fn set_source_content(&mut self, content: MessageContent) -> MergeResult<()> {
        self.require(self.capabilities().source_content, "source content")?;
        self.source = content;
        Ok(())
    }

    /// Set the target content (the translation).
    pub fn translate(&mut self, content: MessageContent) -> MergeResult<()> {
        self.require(self.capabilities().target_content, "target content")?;
        self.target = Some(content);
        Ok(())
    }

    pub fn set_state(&mut self, state: TargetState) -> MergeResult<()> {
        self.require(self.capabilities().target_content, "target state")?;
        self.state = state;
        self.native_state = None;
        Ok(())
    }

    pub fn set_source_refs(&mut self, refs: Vec<SourceRef>) -> MergeResult<()> {
        self.require(self.capabilities().source_references, "source references")?;
        self.source_refs = refs;
        Ok(())
    }

    pub fn set_description_and_meaning(
        &mut self,
        description: Option<String>,
        meaning: Option<String>,
    ) -> MergeResult<()> {
        self.require(
            self.capabilities().description_and_meaning,
            "description and meaning",
        )?;
        self.description = description;
        self.meaning = meaning;
        Ok(())
    }

    fn require(&self, supported: bool, field: &str) -> MergeResult<()> {
        if supported {
            Ok(())
        } else {
            Err(MergeError::unexpected(format!(
                "{} of trans-unit \"{}\" cannot be changed in {} format",
                field, self.id, self.format
            )))
        }
    }
}
