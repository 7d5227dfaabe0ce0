// ============================================================================
// XliffMerge - English Message Table
// ============================================================================
//
// File: src/messages/en_us.rs
// Responsibility: English message texts
// Boundaries:
//   - ✅ Message key/template pairs
//   - ❌ Should not contain formatting logic
//   - ❌ Should not contain business logic
//
// ============================================================================

/// English message table
pub const MESSAGES: &[(&str, &str)] = &[
    // Merge run
    ("merge.version", "xliffmerge version {}"),
    ("merge.master_count", "master contains {} trans-units"),
    (
        "merge.missing_ids",
        "master contains {} trans-units, but there are {} without id",
    ),
    (
        "merge.source_language_mismatch",
        "master says to have source-language=\"{}\", should be \"{}\" (your defaultLanguage)",
    ),
    (
        "merge.source_language_changed",
        "changed master source-language=\"{}\" to \"{}\"",
    ),
    ("merge.processing_language", "processing language {}"),
    (
        "merge.created_file",
        "created new file \"{}\" for target-language=\"{}\"",
    ),
    (
        "merge.please_translate",
        "please translate file \"{}\" to target-language=\"{}\"",
    ),
    (
        "merge.new_entries",
        "merged {} trans-units from master to \"{}\"",
    ),
    (
        "merge.source_content_changed",
        "transferred {} changed source content from master to \"{}\"",
    ),
    (
        "merge.source_refs_changed",
        "transferred {} source references from master to \"{}\"",
    ),
    ("merge.id_changed", "found {} changed id's in \"{}\""),
    (
        "merge.descriptions_changed",
        "transferred {} changed descriptions/meanings from master to \"{}\"",
    ),
    ("merge.removed_unused", "removed {} unused trans-units in \"{}\""),
    (
        "merge.kept_unused",
        "keeping {} unused trans-units in \"{}\", because removeUnused is disabled",
    ),
    ("merge.up_to_date", "file for \"{}\" was up to date"),
    (
        "merge.updated_file",
        "updated file \"{}\" for target-language=\"{}\"",
    ),
    (
        "merge.ngx_exported",
        "exported ngx-translate file \"{}\" for \"{}\"",
    ),
    ("merge.oops", "file \"{}\", oops {}"),
    // Scheduler
    ("scheduler.task_start", "Start processing: {}"),
    ("scheduler.task_success", "Finished {} in {}s"),
    ("scheduler.task_failed", "Failed {} after {}s"),
    (
        "scheduler.batch_start",
        "Processing {} languages with at most {} in parallel",
    ),
    ("scheduler.batch_complete", "{} of {} languages processed"),
    ("scheduler.task_join_error", "Task {} aborted: {}"),
    // Parameters
    ("parameters.header", "xliffmerge uses the following parameters:"),
    ("parameters.no_profile", "(no profile)"),
    ("parameters.value", "  {} = {}"),
    // Init command
    ("init.start", "Creating xliffmerge profile..."),
    ("init.config_exists", "Profile already exists: {}"),
    (
        "init.use_force_hint",
        "Use --force to overwrite the existing profile",
    ),
    ("init.config_created", "Profile created: {}"),
    (
        "init.next_steps",
        "Edit the languages in the profile, then run xliffmerge",
    ),
    ("init.create_failed", "Failed to create profile: {}"),
    // Summary
    ("summary.title", "Merge summary"),
    ("summary.created", "created"),
    ("summary.updated", "updated"),
    ("summary.up_to_date", "up to date"),
    ("summary.failed", "failed"),
    (
        "summary.counts",
        "{} new, {} changed, {} removed",
    ),
    ("summary.totals", "{} languages, {} failed"),
];
