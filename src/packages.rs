//! Package classification and installation.
//!
//! Declared packages are partitioned into an official bucket (installed with
//! pacman) and an AUR bucket (installed with yay). When AUR packages are
//! required and yay is not on PATH it is bootstrapped first by building its
//! AUR recipe with makepkg.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::ExecutionMode;
use crate::config::PackageSet;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::logging::Logger;

/// AUR helper used for community packages.
pub const AUR_HELPER: &str = "yay";

/// AUR package recipe the helper is bootstrapped from.
pub const AUR_HELPER_REPO: &str = "https://aur.archlinux.org/yay.git";

/// Default number of parallel jobs for makepkg if nproc detection fails.
const DEFAULT_NPROC: &str = "4";

/// Packages split into installation buckets.
///
/// Order within a bucket follows the declaration; duplicates are kept as
/// declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Packages routed to the official repositories.
    pub official: Vec<String>,
    /// Packages routed to the AUR.
    pub aur: Vec<String>,
}

/// Outcome of an install run.
///
/// In dry-run mode the buckets list what would have been installed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Packages installed (or reported) via pacman.
    pub official: Vec<String>,
    /// Packages installed (or reported) via the AUR helper.
    pub aur: Vec<String>,
    /// Whether the AUR helper was bootstrapped (or would have been).
    pub bootstrapped: bool,
}

/// Partition `all` into official and AUR buckets.
///
/// A package named in `declared_official` is always official. Anything else
/// is checked against the live repositories with `pacman -Si` in apply mode,
/// so a stale declaration still routes correctly. Dry-run trusts the
/// declaration instead and performs no queries at all.
///
/// # Errors
///
/// Returns [`InstallError::Query`] when the repository query cannot be
/// spawned. A query that merely reports "not found" is not an error; the
/// package is routed to the AUR bucket.
pub fn classify(
    all: &[String],
    declared_official: &[String],
    mode: ExecutionMode,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<Partition, InstallError> {
    let mut partition = Partition::default();

    for pkg in all {
        if declared_official.iter().any(|declared| declared == pkg) {
            partition.official.push(pkg.clone());
            continue;
        }
        if mode.is_dry_run() {
            partition.aur.push(pkg.clone());
            continue;
        }

        let query = executor
            .run_unchecked("pacman", &["-Si", pkg])
            .map_err(|e| InstallError::Query {
                package: pkg.clone(),
                reason: format!("{e:#}"),
            })?;
        if query.success {
            partition.official.push(pkg.clone());
        } else {
            log.debug(&format!(
                "{pkg} not found in the official repositories, routing to {AUR_HELPER}"
            ));
            partition.aur.push(pkg.clone());
        }
    }

    Ok(partition)
}

/// Install every declared package.
///
/// Classifies the combined declaration, bootstraps the AUR helper when the
/// AUR bucket is non-empty and the helper is absent, then runs one batch
/// install per non-empty bucket (pacman first). In dry-run mode the would-be
/// commands are reported and nothing is executed.
///
/// # Errors
///
/// Fails on a classification query that cannot be spawned, on any bootstrap
/// step failing, or on a backend batch exiting non-zero. A pacman failure
/// aborts the run before the AUR batch is attempted.
pub fn install(
    packages: &PackageSet,
    mode: ExecutionMode,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<InstallReport, InstallError> {
    if packages.is_empty() {
        log.info("nothing to install");
        return Ok(InstallReport::default());
    }

    let all = packages.all();
    let partition = classify(&all, &packages.official, mode, executor, log)?;
    log.debug(&format!(
        "partitioned {} packages: {} official, {} AUR",
        all.len(),
        partition.official.len(),
        partition.aur.len()
    ));

    let mut bootstrapped = false;
    if !partition.aur.is_empty() && !executor.which(AUR_HELPER) {
        if mode.is_dry_run() {
            log.dry_run(&format!("bootstrap {AUR_HELPER} from {AUR_HELPER_REPO}"));
        } else {
            bootstrap_aur_helper(executor, log)?;
        }
        bootstrapped = true;
    }

    if !partition.official.is_empty() {
        install_official(&partition.official, mode, executor, log)?;
    }
    if !partition.aur.is_empty() {
        install_aur(&partition.aur, mode, executor, log)?;
    }

    Ok(InstallReport {
        official: partition.official,
        aur: partition.aur,
        bootstrapped,
    })
}

/// Install the official bucket with a single batch pacman call.
fn install_official(
    packages: &[String],
    mode: ExecutionMode,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<(), InstallError> {
    let mut args: Vec<&str> = vec!["pacman", "-S", "--needed", "--noconfirm"];
    args.extend(packages.iter().map(String::as_str));

    if mode.is_dry_run() {
        log.dry_run(&format!("sudo {}", args.join(" ")));
        return Ok(());
    }

    log.info(&format!("installing {} packages with pacman", packages.len()));
    executor
        .run("sudo", &args)
        .map_err(|e| InstallError::Backend {
            backend: "pacman".to_string(),
            packages: packages.to_vec(),
            reason: format!("{e:#}"),
        })?;
    Ok(())
}

/// Install the AUR bucket with a single batch call to the helper.
fn install_aur(
    packages: &[String],
    mode: ExecutionMode,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<(), InstallError> {
    let mut args: Vec<&str> = vec!["-S", "--needed", "--noconfirm"];
    args.extend(packages.iter().map(String::as_str));

    if mode.is_dry_run() {
        log.dry_run(&format!("{AUR_HELPER} {}", args.join(" ")));
        return Ok(());
    }

    log.info(&format!(
        "installing {} packages with {AUR_HELPER}",
        packages.len()
    ));
    executor
        .run(AUR_HELPER, &args)
        .map_err(|e| InstallError::Backend {
            backend: AUR_HELPER.to_string(),
            packages: packages.to_vec(),
            reason: format!("{e:#}"),
        })?;
    Ok(())
}

/// Build and install the AUR helper from its AUR recipe.
fn bootstrap_aur_helper(executor: &dyn Executor, log: &Logger) -> Result<(), InstallError> {
    log.info(&format!("bootstrapping {AUR_HELPER} from the AUR"));

    install_build_prerequisites(executor, log)
        .map_err(|e| bootstrap_error("installing build prerequisites", &e))?;
    let tmp = prepare_build_directory(log)
        .map_err(|e| bootstrap_error("preparing the build directory", &e))?;
    clone_helper_recipe(executor, log, &tmp)
        .map_err(|e| bootstrap_error("cloning the build recipe", &e))?;
    build_helper(executor, log, &tmp).map_err(|e| bootstrap_error("building with makepkg", &e))?;
    cleanup_build_directory(&tmp);

    log.info(&format!("{AUR_HELPER} installed successfully"));
    Ok(())
}

fn bootstrap_error(step: &str, source: &anyhow::Error) -> InstallError {
    InstallError::Bootstrap {
        helper: AUR_HELPER.to_string(),
        step: step.to_string(),
        reason: format!("{source:#}"),
    }
}

/// Install the tools needed to build from an AUR recipe.
fn install_build_prerequisites(executor: &dyn Executor, log: &Logger) -> Result<()> {
    log.debug("installing build prerequisites: git, base-devel");
    executor
        .run(
            "sudo",
            &["pacman", "-S", "--needed", "--noconfirm", "git", "base-devel"],
        )
        .context("installing build prerequisites")?;
    Ok(())
}

/// Prepare a clean build directory for the helper.
fn prepare_build_directory(log: &Logger) -> Result<PathBuf> {
    let tmp = std::env::temp_dir().join(format!("{AUR_HELPER}-build"));
    if tmp.exists() {
        log.debug("removing previous helper build directory");
        std::fs::remove_dir_all(&tmp).context("removing previous helper build directory")?;
    }
    Ok(tmp)
}

/// Clone the helper's AUR recipe.
fn clone_helper_recipe(executor: &dyn Executor, log: &Logger, tmp: &Path) -> Result<()> {
    log.debug(&format!("cloning {AUR_HELPER_REPO}"));
    executor
        .run("git", &["clone", AUR_HELPER_REPO, &tmp.to_string_lossy()])
        .context("cloning the helper recipe from the AUR")?;
    Ok(())
}

/// Build the helper using makepkg with parallel compilation.
fn build_helper(executor: &dyn Executor, log: &Logger, tmp: &Path) -> Result<()> {
    let nproc = executor.run("nproc", &[]).map_or_else(
        |_| DEFAULT_NPROC.to_string(),
        |r| r.stdout.trim().to_string(),
    );

    let makeflags = format!("-j{nproc}");
    log.debug(&format!("building with MAKEFLAGS={makeflags}"));
    executor
        .run_in_with_env(
            tmp,
            "makepkg",
            &["-si", "--noconfirm"],
            &[("MAKEFLAGS", &makeflags)],
        )
        .context("building the helper with makepkg")?;
    Ok(())
}

/// Remove the build directory (best effort, ignores errors).
fn cleanup_build_directory(tmp: &Path) {
    std::fs::remove_dir_all(tmp).ok();
}
