//! CLI command handlers. Each command is in its own file.

mod completions;
mod run;
mod status;

pub use completions::run_completions;
pub use run::run_sweep;
pub use status::run_status;
