//! One sweep pass per daemon: classify every torrent and act on the verdict,
//! then refill the active set from the idle pool.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::config::{InstanceConfig, TqmConfig, SECS_PER_DAY};
use crate::policy::{classify, plan_admissions, SweepThresholds, Verdict};
use crate::rpc::{RpcError, TransmissionClient};

use super::report::{InstanceOutcome, SweepSummary};
use super::source::JobSource;

/// Current time as Unix seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Sweeps every configured instance in order. A failing instance is logged
/// and recorded in its outcome; the remaining instances still run.
pub fn sweep_all(config: &TqmConfig) -> Vec<InstanceOutcome> {
    let mut rng = rand::rng();
    let mut outcomes = Vec::with_capacity(config.instances.len());
    for instance in &config.instances {
        let result = sweep_one(instance, &mut rng);
        match &result {
            Ok(summary) => tracing::info!(
                host = %instance.host,
                purged = summary.purged,
                stopped_stale = summary.stopped_stale,
                stopped_slow = summary.stopped_slow,
                skipped = summary.skipped_stopped,
                activated = summary.activated,
                failed_calls = summary.failed_calls,
                "instance sweep complete"
            ),
            Err(error) => {
                tracing::error!(host = %instance.host, error = %error, "instance sweep failed")
            }
        }
        outcomes.push(InstanceOutcome {
            host: instance.host.clone(),
            result,
        });
    }
    outcomes
}

fn sweep_one<R: Rng + ?Sized>(
    instance: &InstanceConfig,
    rng: &mut R,
) -> Result<SweepSummary, RpcError> {
    tracing::info!(host = %instance.host, port = instance.port, "sweeping instance");
    let mut client = TransmissionClient::connect(instance)?;
    sweep_instance(
        &mut client,
        &instance.host,
        &instance.thresholds(),
        instance.active_limit,
        unix_now(),
        rng,
    )
}

/// One full sweep against a single job source.
///
/// First pass: classify every torrent and stop or purge per verdict. A failed
/// control call is logged and counted; the pass moves on to the next torrent.
/// Second pass: fetch the table again so admission sees what the first pass
/// changed, then start randomly chosen idle torrents up to `active_limit`.
/// Only a failed snapshot fetch aborts the sweep.
pub fn sweep_instance<S, R>(
    source: &mut S,
    host: &str,
    thresholds: &SweepThresholds,
    active_limit: usize,
    now_unix: i64,
    rng: &mut R,
) -> Result<SweepSummary, RpcError>
where
    S: JobSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut summary = SweepSummary::default();

    let torrents = source.list_jobs()?;
    tracing::debug!(host, torrents = torrents.len(), "fetched torrent snapshot");
    for torrent in &torrents {
        match classify(torrent, now_unix, thresholds) {
            Verdict::Purge => {
                let age_days = torrent.age_secs(now_unix) / SECS_PER_DAY;
                match source.purge(torrent.id, true) {
                    Ok(()) => {
                        summary.purged += 1;
                        tracing::info!(host, id = torrent.id, name = %torrent.name, age_days, "purged dead torrent");
                    }
                    Err(error) => {
                        summary.failed_calls += 1;
                        tracing::error!(host, id = torrent.id, name = %torrent.name, error = %error, "purge failed");
                    }
                }
            }
            Verdict::StopStale => {
                let age_days = torrent.age_secs(now_unix) / SECS_PER_DAY;
                match source.stop(torrent.id) {
                    Ok(()) => {
                        summary.stopped_stale += 1;
                        tracing::info!(host, id = torrent.id, name = %torrent.name, age_days, "stopped stale torrent");
                    }
                    Err(error) => {
                        summary.failed_calls += 1;
                        tracing::error!(host, id = torrent.id, name = %torrent.name, error = %error, "stop failed");
                    }
                }
            }
            Verdict::StopSlow => match source.stop(torrent.id) {
                Ok(()) => {
                    summary.stopped_slow += 1;
                    tracing::info!(
                        host,
                        id = torrent.id,
                        name = %torrent.name,
                        seconds_downloading = torrent.seconds_downloading,
                        progress = torrent.percent_done,
                        "stopped slow torrent"
                    );
                }
                Err(error) => {
                    summary.failed_calls += 1;
                    tracing::error!(host, id = torrent.id, name = %torrent.name, error = %error, "stop failed");
                }
            },
            Verdict::SkipStopped => {
                summary.skipped_stopped += 1;
                tracing::debug!(host, id = torrent.id, name = %torrent.name, "torrent already stopped");
            }
            Verdict::Keep => {}
        }
    }

    // The stops and purges above changed the active set, so admission works
    // from a fresh snapshot rather than the pre-pass one.
    let torrents = source.list_jobs()?;
    let plan = plan_admissions(&torrents, active_limit, rng);
    tracing::debug!(
        host,
        active = plan.active,
        candidates = plan.candidates,
        selected = plan.selected.len(),
        "admission plan"
    );
    for &id in &plan.selected {
        let name = torrents
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
            .unwrap_or("");
        match source.activate(id) {
            Ok(()) => {
                summary.activated += 1;
                tracing::info!(host, id, name, "activated idle torrent");
            }
            Err(error) => {
                summary.failed_calls += 1;
                tracing::error!(host, id, name, error = %error, "activation failed");
            }
        }
    }

    Ok(summary)
}
