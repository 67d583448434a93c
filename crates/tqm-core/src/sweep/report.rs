//! Counters describing what a sweep did.

use crate::rpc::RpcError;

/// Tally of one instance sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    /// Torrents removed together with their data.
    pub purged: usize,
    /// Stalled torrents stopped.
    pub stopped_stale: usize,
    /// Slow early-phase torrents stopped.
    pub stopped_slow: usize,
    /// Already-stopped torrents left alone.
    pub skipped_stopped: usize,
    /// Idle torrents started to refill the active set.
    pub activated: usize,
    /// Control calls that failed and were skipped over.
    pub failed_calls: usize,
}

impl SweepSummary {
    /// Number of torrents the sweep actually touched.
    pub fn actions(&self) -> usize {
        self.purged + self.stopped_stale + self.stopped_slow + self.activated
    }
}

/// Result of sweeping one configured instance. Failures are carried rather
/// than propagated so one broken daemon cannot stop the others.
#[derive(Debug)]
pub struct InstanceOutcome {
    /// Host of the instance, as configured.
    pub host: String,
    pub result: Result<SweepSummary, RpcError>,
}
