use clap::{Parser, Subcommand};

/// Version string embedded by the build script (a `git describe` value),
/// falling back to the crate version.
const VERSION: &str = match option_env!("DOTDEPLOY_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the dotdeploy provisioning tool.
///
/// Invoked with a base path it copies the declared dotfiles there (and,
/// with `--install-packages`, installs the declared packages). The
/// subcommands cover the interactive menu and shell completions.
#[derive(Parser, Debug)]
#[command(
    name = "dotdeploy",
    about = "Arch Linux dotfiles and package provisioning tool",
    version = VERSION,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Destination root for copied dotfiles
    pub base_path: Option<std::path::PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Install declared packages after copying dotfiles
    #[arg(long)]
    pub install_packages: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick an operation from an interactive menu
    Menu,
    /// Generate a shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
