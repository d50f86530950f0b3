pub mod completions;
pub mod deploy;
pub mod menu;

use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};

use crate::ExecutionMode;
use crate::config;
use crate::copier;
use crate::exec::Executor;
use crate::logging::{Logger, StepStatus};
use crate::packages::{self, AUR_HELPER};

/// Directory next to the configuration document holding the dotfile sources.
pub const SOURCE_DIR: &str = "files";

/// A named, independently invokable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Copy dotfiles and install packages.
    CompleteInstall,
    /// Copy dotfiles only.
    CopyOnly,
    /// Install packages only.
    InstallOnly,
}

impl Operation {
    /// Human-readable name used for stage headers and prompts.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CompleteInstall => "Complete installation",
            Self::CopyOnly => "Copy dotfiles",
            Self::InstallOnly => "Install packages",
        }
    }

    /// Whether the operation copies dotfiles (and therefore needs a base path).
    #[must_use]
    pub const fn copies_files(self) -> bool {
        matches!(self, Self::CompleteInstall | Self::CopyOnly)
    }

    /// Whether the operation installs packages.
    #[must_use]
    pub const fn installs_packages(self) -> bool {
        matches!(self, Self::CompleteInstall | Self::InstallOnly)
    }
}

/// Shared state for running operations.
///
/// Bundles the configuration location, the dotfile source tree, and the
/// executor so that each operation does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct Context<'a> {
    /// Path of the configuration document.
    pub config_path: PathBuf,
    /// Directory the declared dotfile sources are read from.
    pub source_root: PathBuf,
    /// Executor for package-manager and bootstrap processes.
    pub executor: &'a dyn Executor,
    /// Logger for console/file output and the step summary.
    pub log: &'a Logger,
}

impl<'a> Context<'a> {
    /// Build a context rooted in the current working directory, where the
    /// configuration document sits next to the `files/` source tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn from_working_dir(executor: &'a dyn Executor, log: &'a Logger) -> Result<Self> {
        let cwd = std::env::current_dir().context("determining the working directory")?;
        Ok(Self {
            config_path: cwd.join(config::CONFIG_FILE),
            source_root: cwd.join(SOURCE_DIR),
            executor,
            log,
        })
    }
}

/// Run one operation end to end and print the step summary.
///
/// The summary is printed even when the operation fails part-way, so the
/// steps that did run are still accounted for.
///
/// # Errors
///
/// Returns an error if configuration loading, copying, or package
/// installation fails, or if `base_path` is missing for an operation that
/// copies files.
pub fn run_operation(
    ctx: &Context<'_>,
    operation: Operation,
    base_path: Option<&Path>,
    mode: ExecutionMode,
) -> Result<()> {
    ctx.log.stage(operation.title());
    if mode.is_dry_run() {
        ctx.log.info("dry-run mode: no changes will be made");
    }

    let outcome = execute(ctx, operation, base_path, mode);

    ctx.log.print_summary();

    if outcome.is_ok() {
        if mode.is_dry_run() {
            ctx.log.success("dry run complete, no changes were made");
        } else {
            ctx.log.success("all steps completed");
        }
    }
    outcome
}

/// The fixed step sequence behind [`run_operation`]: load configuration,
/// then copy and/or install per the operation. Fail-fast between steps.
fn execute(
    ctx: &Context<'_>,
    operation: Operation,
    base_path: Option<&Path>,
    mode: ExecutionMode,
) -> Result<()> {
    ctx.log.stage("Loading configuration");
    let loaded = config::load(&ctx.config_path)?;
    ctx.log.info(&format!(
        "loaded {} dotfiles, {} packages",
        loaded.dotfiles.len(),
        loaded.packages.all().len()
    ));

    if operation.copies_files() {
        let base = base_path.context("a base path is required to copy dotfiles")?;
        ctx.log.stage("Copying dotfiles");
        match copier::copy_all(&loaded.dotfiles, &ctx.source_root, base, mode, ctx.log) {
            Ok(report) => {
                let status = if mode.is_dry_run() {
                    StepStatus::DryRun
                } else {
                    StepStatus::Ok
                };
                ctx.log.record_step(
                    "Copy dotfiles",
                    status,
                    Some(&format!(
                        "{} copied, {} skipped",
                        report.copied.len(),
                        report.skipped.len()
                    )),
                );
            }
            Err(e) => {
                ctx.log
                    .record_step("Copy dotfiles", StepStatus::Failed, Some(&e.to_string()));
                return Err(e.into());
            }
        }
    }

    if operation.installs_packages() {
        ctx.log.stage("Installing packages");
        match packages::install(&loaded.packages, mode, ctx.executor, ctx.log) {
            Ok(report) if report.official.is_empty() && report.aur.is_empty() => {
                ctx.log.record_step(
                    "Install packages",
                    StepStatus::Skipped,
                    Some("nothing to install"),
                );
            }
            Ok(report) => {
                let status = if mode.is_dry_run() {
                    StepStatus::DryRun
                } else {
                    StepStatus::Ok
                };
                let mut detail = format!(
                    "{} official, {} AUR",
                    report.official.len(),
                    report.aur.len()
                );
                if report.bootstrapped {
                    detail.push_str(&format!(", {AUR_HELPER} bootstrapped"));
                }
                ctx.log.record_step("Install packages", status, Some(&detail));
            }
            Err(e) => {
                ctx.log
                    .record_step("Install packages", StepStatus::Failed, Some(&e.to_string()));
                return Err(e.into());
            }
        }
    }

    Ok(())
}
