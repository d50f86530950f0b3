use anyhow::Result;
use clap::Parser;

use dotdeploy::cli::{Cli, Command};
use dotdeploy::commands;
use dotdeploy::logging::{self, Logger};

fn main() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Some(Command::Completions { shell }) => {
            // No subscriber: the completion script must reach stdout unmixed.
            commands::completions::run(shell);
            Ok(())
        }
        Some(Command::Menu) => {
            logging::init_subscriber(args.verbose, "menu");
            let log = Logger::new("menu");
            commands::menu::run(&log)
        }
        None => {
            let Some(base_path) = args.base_path else {
                anyhow::bail!(
                    "a base path is required; run 'dotdeploy <BASE_PATH>' or 'dotdeploy menu'"
                );
            };
            logging::init_subscriber(args.verbose, "deploy");
            let log = Logger::new("deploy");
            commands::deploy::run(&base_path, args.dry_run, args.install_packages, &log)
        }
    }
}
