//! CLI for the tqm sweep tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tqm_core::config;

use commands::{run_completions, run_status, run_sweep};

/// Top-level CLI for the tqm Transmission queue manager.
#[derive(Debug, Parser)]
#[command(name = "tqm")]
#[command(about = "tqm: policy sweeps for Transmission daemons", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sweep every configured instance once: purge dead torrents, stop stale
    /// and slow ones, then refill the active set.
    Run,

    /// Show the torrent table of every configured instance.
    Status,

    /// Emit a completion script for the given shell.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run => {
                let cfg = config::load_or_init()?;
                run_sweep(&cfg)?;
            }
            CliCommand::Status => {
                let cfg = config::load_or_init()?;
                run_status(&cfg)?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}
