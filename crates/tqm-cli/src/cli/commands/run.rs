//! `tqm run` – sweep every configured instance once.

use anyhow::Result;
use tqm_core::config::{self, TqmConfig};
use tqm_core::sweep;

pub fn run_sweep(cfg: &TqmConfig) -> Result<()> {
    if cfg.instances.is_empty() {
        let path = config::config_path()?;
        println!(
            "No instances configured. Add [[instances]] entries to {}.",
            path.display()
        );
        return Ok(());
    }

    tracing::debug!(instances = cfg.instances.len(), "starting sweep");
    let outcomes = sweep::sweep_all(cfg);
    for outcome in &outcomes {
        match &outcome.result {
            Ok(summary) => println!(
                "{}: purged {}, stopped {} stale / {} slow, activated {}, {} failed calls",
                outcome.host,
                summary.purged,
                summary.stopped_stale,
                summary.stopped_slow,
                summary.activated,
                summary.failed_calls
            ),
            Err(error) => println!("{}: sweep failed: {}", outcome.host, error),
        }
    }
    println!("Swept {} instance(s).", outcomes.len());
    Ok(())
}
