// ============================================================================
// XliffMerge - Merge Engine
// ============================================================================
//
// File: src/core/merger.rs
// Responsibility: reconciling a language catalog with the master catalog
// Boundaries:
//   - ✅ New, changed, renamed and orphaned entry handling
//   - ✅ Workflow state transitions
//   - ✅ Order preserving insertion
//   - ✅ Change counting
//   - ❌ Should not contain file I/O
//   - ❌ Should not contain logging
//
// ============================================================================

use std::collections::HashSet;
use std::path::PathBuf;

use crate::core::comparator::{content_equivalent, references_equivalent};
use crate::core::resolver::resolve_rename;
use crate::models::catalog::{Catalog, InsertPosition, SeedPolicy};
use crate::models::entry::{Entry, TargetState};
use crate::models::error::MergeResult;

/// Settings of one language merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    /// The language is the default (source) language
    pub is_default_language: bool,
    /// New entries get the source text as target
    pub use_source_as_target: bool,
    /// Look for renamed entries before creating new ones
    pub allow_id_change: bool,
    /// Delete entries that are no longer in the master
    pub remove_unused_ids: bool,
    /// Insert new entries where the master has them
    pub preserve_order: bool,
    pub target_prefix: String,
    pub target_suffix: String,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            is_default_language: false,
            use_source_as_target: true,
            allow_id_change: false,
            remove_unused_ids: true,
            preserve_order: true,
            target_prefix: String::new(),
            target_suffix: String::new(),
        }
    }
}

impl MergePolicy {
    fn seed(&self) -> SeedPolicy {
        SeedPolicy::for_language(self.is_default_language, self.use_source_as_target)
    }
}

/// What a merge changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub new: usize,
    pub source_content_changed: usize,
    pub source_ref_changed: usize,
    pub description_or_meaning_changed: usize,
    pub id_changed: usize,
    /// Orphans, whether they were deleted or kept
    pub removed: usize,
}

impl MergeReport {
    /// Nothing changed, the file must not be rewritten
    pub fn is_noop(&self) -> bool {
        *self == MergeReport::default()
    }
}

/// Applies the master catalog to language catalogs
pub struct MergeEngine<'a> {
    master: &'a Catalog,
    policy: &'a MergePolicy,
}

impl<'a> MergeEngine<'a> {
    pub fn new(master: &'a Catalog, policy: &'a MergePolicy) -> Self {
        Self { master, policy }
    }

    /// Bring `target` in line with the master, in place.
    pub fn reconcile(&self, target: &mut Catalog) -> MergeResult<MergeReport> {
        let mut report = MergeReport::default();
        target.set_new_entry_affixes(
            self.policy.target_prefix.as_str(),
            self.policy.target_suffix.as_str(),
        );

        let mut last_processed: Option<String> = None;
        for master_entry in self.master.entries() {
            if let Some(entry) = target.find_by_id_mut(master_entry.id()) {
                self.update_existing(entry, master_entry, &mut report)?;
                last_processed = Some(master_entry.id().to_string());
                continue;
            }

            let position = match (&last_processed, self.policy.preserve_order) {
                (_, false) => InsertPosition::Append,
                (None, true) => InsertPosition::First,
                (Some(id), true) => InsertPosition::After(id.as_str()),
            };

            if self.policy.allow_id_change {
                let renamed_target = resolve_rename(master_entry, target)
                    .map(|old| old.target_content().cloned());
                if let Some(old_target) = renamed_target {
                    let imported = target.import_entry(master_entry, SeedPolicy::Untranslated, position)?;
                    if let Some(content) = old_target {
                        imported.translate(content)?;
                        imported.set_state(TargetState::Translated)?;
                    }
                    report.id_changed += 1;
                    last_processed = Some(master_entry.id().to_string());
                    continue;
                }
            }

            target.import_entry(master_entry, self.policy.seed(), position)?;
            report.new += 1;
            last_processed = Some(master_entry.id().to_string());
        }

        report.removed = self.remove_unused(target);
        Ok(report)
    }

    fn update_existing(
        &self,
        entry: &mut Entry,
        master_entry: &Entry,
        report: &mut MergeReport,
    ) -> MergeResult<()> {
        let capabilities = entry.capabilities();

        if capabilities.source_content
            && !content_equivalent(Some(master_entry.source_content()), Some(entry.source_content()))
        {
            let source = master_entry.source_content().for_format(master_entry.format(), entry.format());
            entry.set_source_content(source.clone())?;
            if self.policy.is_default_language {
                entry.translate(source)?;
                entry.set_state(TargetState::Final)?;
            } else if entry.state() == TargetState::Final {
                entry.set_state(TargetState::Translated)?;
            }
            report.source_content_changed += 1;
        }

        if capabilities.source_references
            && !references_equivalent(master_entry.source_refs(), entry.source_refs())
        {
            let refs = master_entry.source_refs().unwrap_or_default().to_vec();
            entry.set_source_refs(refs)?;
            report.source_ref_changed += 1;
        }

        if capabilities.description_and_meaning
            && (master_entry.description() != entry.description()
                || master_entry.meaning() != entry.meaning())
        {
            entry.set_description_and_meaning(
                master_entry.description().map(str::to_string),
                master_entry.meaning().map(str::to_string),
            )?;
            report.description_or_meaning_changed += 1;
        }

        Ok(())
    }

    /// Count entries missing from the master, deleting them when configured.
    fn remove_unused(&self, target: &mut Catalog) -> usize {
        let master_ids: HashSet<&str> = self.master.entries().iter().map(Entry::id).collect();
        let orphans: Vec<String> = target
            .entries()
            .iter()
            .filter(|entry| !master_ids.contains(entry.id()))
            .map(|entry| entry.id().to_string())
            .collect();

        if self.policy.remove_unused_ids {
            for id in &orphans {
                target.remove_by_id(id);
            }
        }
        orphans.len()
    }
}

/// Build the catalog of a language that has no file yet.
pub fn create_catalog_for_language<P: Into<PathBuf>>(
    master: &Catalog,
    language: &str,
    path: P,
    policy: &MergePolicy,
) -> MergeResult<Catalog> {
    master.create_for_language(
        language,
        path,
        policy.seed(),
        &policy.target_prefix,
        &policy.target_suffix,
    )
}
