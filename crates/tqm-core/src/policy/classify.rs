//! Per-torrent classification against the sweep thresholds.

use std::time::Duration;

use crate::torrent::Torrent;

/// Progress fraction below which a long-running download counts as slow.
pub const SLOW_PROGRESS_CUTOFF: f64 = 0.1;

/// Age/time thresholds one instance is swept with.
///
/// Passed explicitly into [`classify`] at call time; there is no
/// process-wide policy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepThresholds {
    /// Stalled torrents at least this old are stopped.
    pub stale_after: Duration,
    /// Stalled torrents at least this old are purged together with their
    /// data. Never below `stale_after`.
    pub delete_after: Duration,
    /// Minimum cumulative download time before the slow rule applies.
    pub slow_after: Duration,
}

/// What the sweep decided for one torrent. At most one rule fires; rules are
/// checked in severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Stalled past the delete threshold: remove the torrent and its data.
    Purge,
    /// Stalled past the stale threshold: halt transfer, keep data.
    StopStale,
    /// Downloading but under the progress cutoff for too long: halt transfer.
    StopSlow,
    /// Already stopped; left untouched, logged for visibility.
    SkipStopped,
    /// No rule matched.
    Keep,
}

/// Classifies one torrent.
///
/// Stall+age outranks slow progress: a stalled torrent with enough age is a
/// stronger un-recoverability signal than a merely slow one. Purge is gated
/// behind the longer `delete_after` window so stalled torrents get a grace
/// period before data loss.
pub fn classify(torrent: &Torrent, now_unix: i64, thresholds: &SweepThresholds) -> Verdict {
    let age = torrent.age_secs(now_unix);
    if torrent.is_stalled && age >= thresholds.delete_after.as_secs() {
        return Verdict::Purge;
    }
    if torrent.is_stalled && age >= thresholds.stale_after.as_secs() {
        return Verdict::StopStale;
    }
    if torrent.is_downloading()
        && torrent.percent_done < SLOW_PROGRESS_CUTOFF
        && torrent.seconds_downloading > thresholds.slow_after.as_secs() as i64
    {
        return Verdict::StopSlow;
    }
    if torrent.is_stopped() {
        return Verdict::SkipStopped;
    }
    Verdict::Keep
}
