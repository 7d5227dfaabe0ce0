// ============================================================================
// XliffMerge - CLI Module
// ============================================================================
//
// File: src/cli/mod.rs
// Responsibility: command line interface definition and routing
// Boundaries:
//   - ✅ CLI structure and command enum
//   - ✅ Runtime argument construction
//   - ✅ Command routing
//   - ❌ Should not contain merge logic
//   - ❌ Should not contain profile format definitions
//
// ============================================================================

pub mod init;
pub mod merge;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::config::RuntimeArgs;
use crate::utils::constants::VERSION;
use init::{handle_init, InitArgs};
use merge::handle_merge;

/// XliffMerge - merge Angular i18n master files into language files
#[derive(Debug, Parser)]
#[command(name = "xliffmerge")]
#[command(about = "Merge the extracted XLIFF/XMB master file into per language translation files")]
#[command(version = VERSION)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Profile to read (xliffmerge.toml/.json/.yaml or package.json)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Show all parameters and debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum number of languages merged in parallel
    #[arg(short = 'j', long)]
    pub max_concurrency: Option<usize>,

    /// Languages to process, overrides the profile
    pub languages: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a default profile
    Init(InitArgs),
}

/// Parse the command line and run. Returns the process exit status.
pub async fn run_cli() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init(ref args)) => {
            handle_init(args)?;
            Ok(0)
        }
        None => handle_merge(build_runtime_args(&cli)).await,
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        profile: cli.profile.clone(),
        languages: cli.languages.clone(),
        verbose: if cli.verbose { Some(true) } else { None },
        quiet: if cli.quiet { Some(true) } else { None },
        max_concurrency: cli.max_concurrency,
    }
}
