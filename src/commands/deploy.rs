use anyhow::Result;
use std::path::Path;

use crate::ExecutionMode;
use crate::commands::{self, Context, Operation};
use crate::exec::SystemExecutor;
use crate::logging::Logger;

/// Run the non-interactive deploy flow.
///
/// Copies dotfiles to `base_path`, and with `install_packages` also installs
/// the declared packages afterwards.
///
/// # Errors
///
/// Returns an error if configuration loading, copying, or package
/// installation fails.
pub fn run(base_path: &Path, dry_run: bool, install_packages: bool, log: &Logger) -> Result<()> {
    let version = option_env!("DOTDEPLOY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("dotdeploy {version}"));

    let executor = SystemExecutor;
    let ctx = Context::from_working_dir(&executor, log)?;

    let operation = if install_packages {
        Operation::CompleteInstall
    } else {
        Operation::CopyOnly
    };
    let mode = if dry_run {
        ExecutionMode::DryRun
    } else {
        ExecutionMode::Apply
    };

    commands::run_operation(&ctx, operation, Some(base_path), mode)
}
