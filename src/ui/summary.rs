// ============================================================================
// XliffMerge - Run Summary
// ============================================================================
//
// File: src/ui/summary.rs
// Responsibility: end of run summary display
// Boundaries:
//   - ✅ Per language result lines
//   - ✅ Totals line
//   - ❌ Should not contain merge logic
//   - ❌ Should not contain file operations
//
// ============================================================================

use colored::Colorize;
use std::io::{self, Write};

use crate::core::orchestrator::{LanguageAction, LanguageOutcome, RunOutcome};
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// Print the summary of a finished run
pub fn render_run_summary(outcome: &RunOutcome) {
    if outcome.languages.is_empty() {
        return;
    }
    for line in summary_lines(outcome) {
        Logger::info(line);
    }

    let _ = io::stdout().flush();
}

fn summary_lines(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("{} {}", icons::SUMMARY, t!("summary.title").bold()),
        "═══════════════════════════════════════".to_string(),
    ];
    lines.extend(outcome.languages.iter().map(language_line));

    let failed = outcome
        .languages
        .iter()
        .filter(|l| l.action == LanguageAction::Failed)
        .count();
    lines.push(tf!("summary.totals", outcome.languages.len(), failed));
    lines
}

fn language_line(outcome: &LanguageOutcome) -> String {
    let (icon, label) = match outcome.action {
        LanguageAction::Created => (icons::CREATED.cyan(), t!("summary.created").cyan()),
        LanguageAction::Updated => (icons::UPDATED.yellow(), t!("summary.updated").yellow()),
        LanguageAction::UpToDate => (icons::UP_TO_DATE.green(), t!("summary.up_to_date").green()),
        LanguageAction::Failed => (icons::ERROR.red(), t!("summary.failed").red()),
    };

    let report = &outcome.report;
    let changed = report.source_content_changed
        + report.source_ref_changed
        + report.description_or_meaning_changed
        + report.id_changed;
    let mut line = format!(
        "{} {:<8} {} {} ({})",
        icon,
        outcome.language.bold(),
        icons::ARROW,
        outcome.file.display(),
        label
    );
    if outcome.action == LanguageAction::Updated {
        line.push_str(": ");
        line.push_str(&tf!("summary.counts", report.new, changed, report.removed));
    }
    line
}
