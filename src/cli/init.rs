// ============================================================================
// XliffMerge - Init Command
// ============================================================================
//
// File: src/cli/init.rs
// Responsibility: default profile creation
// Boundaries:
//   - ✅ Init command arguments
//   - ✅ Existing profile check
//   - ❌ Should not contain profile format definitions
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::models::config::Profile;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// Init command arguments
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Profile path, the extension selects toml, json or yaml
    #[arg(short, long, default_value = "xliffmerge.toml")]
    pub profile: PathBuf,

    /// Overwrite an existing profile
    #[arg(short, long)]
    pub force: bool,
}

/// Handle the init command
pub fn handle_init(args: &InitArgs) -> Result<()> {
    Logger::init(false, false);
    Logger::info(t!("init.start"));

    if args.profile.exists() && !args.force {
        Logger::warn(tf!("init.config_exists", args.profile.display()));
        Logger::info(t!("init.use_force_hint"));
        return Ok(());
    }

    match Profile::create_default_profile_file(&args.profile) {
        Ok(_) => {
            Logger::info(tf!("init.config_created", args.profile.display()));
            Logger::info(t!("init.next_steps"));
        }
        Err(e) => {
            Logger::error(tf!("init.create_failed", e));
            return Err(e);
        }
    }

    Ok(())
}
