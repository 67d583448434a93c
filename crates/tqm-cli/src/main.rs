use tqm_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging needs a writable state dir; fall back to stderr without it.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("tqm error: {:#}", err);
        std::process::exit(1);
    }
}
