//! `tqm completions` – emit a shell completion script to stdout.

use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

pub fn run_completions(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "tqm", &mut io::stdout());
}
