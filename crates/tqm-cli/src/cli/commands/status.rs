//! `tqm status` – show the torrent table of every configured instance.

use anyhow::Result;
use tqm_core::config::TqmConfig;
use tqm_core::rpc::TransmissionClient;
use tqm_core::sweep::{unix_now, JobSource};

pub fn run_status(cfg: &TqmConfig) -> Result<()> {
    if cfg.instances.is_empty() {
        println!("No instances configured.");
        return Ok(());
    }

    let now = unix_now();
    for instance in &cfg.instances {
        println!("{}:{}", instance.host, instance.port);
        let mut client = match TransmissionClient::connect(instance) {
            Ok(client) => client,
            Err(error) => {
                println!("  unreachable: {error}");
                continue;
            }
        };
        let mut torrents = match client.list_jobs() {
            Ok(torrents) => torrents,
            Err(error) => {
                println!("  listing failed: {error}");
                continue;
            }
        };
        if torrents.is_empty() {
            println!("  no torrents");
            continue;
        }
        torrents.sort_by_key(|t| t.id);
        println!(
            "  {:<6} {:<14} {:>6} {:>8} {:>7} {}",
            "ID", "STATUS", "DONE", "STALLED", "AGE(D)", "NAME"
        );
        for t in &torrents {
            println!(
                "  {:<6} {:<14} {:>5.1}% {:>8} {:>7} {}",
                t.id,
                t.status.as_str(),
                t.percent_done * 100.0,
                if t.is_stalled { "yes" } else { "no" },
                t.age_secs(now) / 86_400,
                t.name
            );
        }
    }
    Ok(())
}
