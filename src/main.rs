// ============================================================================
// XliffMerge - Entry Point
// ============================================================================
//
// File: src/main.rs
// Responsibility: program entry, module declarations, exit status
// Boundaries:
//   - ✅ Runtime startup
//   - ✅ Fatal error reporting
//   - ❌ Should not contain command logic
//
// ============================================================================

mod cli;
mod core;
mod formats;
mod messages;
mod models;
mod ui;
mod utils;

use colored::Colorize;

#[tokio::main]
async fn main() {
    match cli::run_cli().await {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("{} {:#}", "Fatal error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
