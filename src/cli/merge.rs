// ============================================================================
// XliffMerge - Merge Command
// ============================================================================
//
// File: src/cli/merge.rs
// Responsibility: the default command, one merge run
// Boundaries:
//   - ✅ Parameter resolution from profile and CLI
//   - ✅ Logger setup
//   - ✅ Run and summary
//   - ❌ Should not contain merge rules
//
// ============================================================================

use anyhow::Result;

use crate::core::orchestrator::XliffMerge;
use crate::models::config::RuntimeArgs;
use crate::models::parameters::MergeParameters;
use crate::ui::summary::render_run_summary;
use crate::utils::logger::Logger;

/// Run the merge, returning 0 on success and -1 on reported failures
pub async fn handle_merge(args: RuntimeArgs) -> Result<i32> {
    let parameters = MergeParameters::from_runtime_args(&args);
    Logger::init(parameters.verbose, parameters.quiet);

    let quiet = parameters.quiet;
    let outcome = XliffMerge::new(parameters).run().await?;
    if !quiet {
        render_run_summary(&outcome);
    }
    Ok(outcome.status)
}
