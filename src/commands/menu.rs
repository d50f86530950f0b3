use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};
use std::path::PathBuf;

use crate::ExecutionMode;
use crate::commands::{self, Context, Operation};
use crate::exec::SystemExecutor;
use crate::logging::Logger;

/// Label shown for the menu entry that leaves the loop.
const EXIT_CHOICE: &str = "Exit";

/// Run the interactive menu loop.
///
/// Each operation is offered in an apply and a dry-run variant. Mutating
/// selections ask for confirmation first; a failed operation is reported and
/// the menu is shown again. Cancelling a prompt (Esc or Ctrl-C) leaves the
/// loop.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined or the
/// terminal prompt fails for a reason other than cancellation.
pub fn run(log: &Logger) -> Result<()> {
    let executor = SystemExecutor;
    let ctx = Context::from_working_dir(&executor, log)?;

    loop {
        let selection = match Select::new("Select an operation", menu_choices()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let Some((operation, mode)) = resolve_choice(selection) else {
            break;
        };

        let base_path = if operation.copies_files() {
            match prompt_base_path() {
                Some(path) => Some(path),
                None => continue,
            }
        } else {
            None
        };

        if !mode.is_dry_run() && !confirm_apply(operation) {
            continue;
        }

        if let Err(e) = commands::run_operation(&ctx, operation, base_path.as_deref(), mode) {
            log.error(&format!("{e:#}"));
        }
    }

    Ok(())
}

/// The fixed menu, one apply and one dry-run entry per operation.
fn menu_choices() -> Vec<&'static str> {
    vec![
        "Complete installation",
        "Complete installation (dry run)",
        "Copy dotfiles only",
        "Copy dotfiles only (dry run)",
        "Install packages only",
        "Install packages only (dry run)",
        EXIT_CHOICE,
    ]
}

/// Map a menu label to its operation and mode; `None` means exit.
fn resolve_choice(choice: &str) -> Option<(Operation, ExecutionMode)> {
    match choice {
        "Complete installation" => Some((Operation::CompleteInstall, ExecutionMode::Apply)),
        "Complete installation (dry run)" => {
            Some((Operation::CompleteInstall, ExecutionMode::DryRun))
        }
        "Copy dotfiles only" => Some((Operation::CopyOnly, ExecutionMode::Apply)),
        "Copy dotfiles only (dry run)" => Some((Operation::CopyOnly, ExecutionMode::DryRun)),
        "Install packages only" => Some((Operation::InstallOnly, ExecutionMode::Apply)),
        "Install packages only (dry run)" => Some((Operation::InstallOnly, ExecutionMode::DryRun)),
        _ => None,
    }
}

/// Ask for the destination root, defaulting to the invoking user's home.
/// Returns `None` when the prompt is cancelled.
fn prompt_base_path() -> Option<PathBuf> {
    Text::new("Base path for dotfiles")
        .with_default(&home_dir())
        .prompt()
        .ok()
        .map(PathBuf::from)
}

/// Ask for confirmation before a mutating operation; default is no.
fn confirm_apply(operation: Operation) -> bool {
    Confirm::new(&format!("Run '{}' now?", operation.title()))
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

fn home_dir() -> String {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string())
}
