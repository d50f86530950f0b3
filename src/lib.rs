//! Arch Linux dotfiles and package provisioning tool.
//!
//! Copies a declared set of dotfiles from a `files/` source tree into target
//! locations under a base path, and installs declared packages through two
//! backends: official repositories via `pacman`, and the AUR via `yay`
//! (bootstrapped from source when absent). Every operation supports a dry-run
//! mode that reports intended actions without touching the filesystem or
//! spawning package-manager processes.
//!
//! The crate is organised into four layers:
//!
//! - **[`config`]** — parse `dotfiles.json` (current and legacy shapes)
//! - **[`copier`]** / **[`packages`]** — the two provisioning primitives
//! - **[`commands`]** — operation orchestration, direct CLI, and the menu
//! - **[`exec`]** / **[`logging`]** — process execution and console/file output
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod copier;
pub mod error;
pub mod exec;
pub mod logging;
pub mod packages;

/// How an operation should treat side effects.
///
/// Threaded through every component call as an explicit parameter; never
/// stored as ambient state. In [`DryRun`](ExecutionMode::DryRun) mode no
/// filesystem entry is created, modified, or deleted and no external process
/// is spawned — intended actions are only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Report intended actions without performing them.
    DryRun,
    /// Perform the actions.
    Apply,
}

impl ExecutionMode {
    /// Whether this mode suppresses side effects.
    #[must_use]
    pub const fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}
