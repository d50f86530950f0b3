use clap::CommandFactory as _;

use crate::cli::Cli;

/// Print the completion script for `shell` to stdout.
pub fn run(shell: clap_complete::Shell) {
    write_script(shell, &mut std::io::stdout());
}

fn write_script(shell: clap_complete::Shell, writer: &mut impl std::io::Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "dotdeploy", writer);
}
