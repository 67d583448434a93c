//! Snapshot model of one torrent as reported by a Transmission daemon.

use serde::{Deserialize, Serialize};

/// Torrent identifier assigned by the daemon, stable for the torrent's lifetime.
pub type TorrentId = i64;

/// Daemon activity state, mapped from the numeric `status` field of the RPC
/// protocol. Codes the daemon may add later are preserved as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TorrentStatus {
    Stopped,
    QueuedToVerify,
    Verifying,
    QueuedToDownload,
    Downloading,
    QueuedToSeed,
    Seeding,
    Unknown(i64),
}

impl From<i64> for TorrentStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => TorrentStatus::Stopped,
            1 => TorrentStatus::QueuedToVerify,
            2 => TorrentStatus::Verifying,
            3 => TorrentStatus::QueuedToDownload,
            4 => TorrentStatus::Downloading,
            5 => TorrentStatus::QueuedToSeed,
            6 => TorrentStatus::Seeding,
            other => TorrentStatus::Unknown(other),
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::QueuedToVerify => 1,
            TorrentStatus::Verifying => 2,
            TorrentStatus::QueuedToDownload => 3,
            TorrentStatus::Downloading => 4,
            TorrentStatus::QueuedToSeed => 5,
            TorrentStatus::Seeding => 6,
            TorrentStatus::Unknown(other) => other,
        }
    }
}

impl TorrentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TorrentStatus::Stopped => "stopped",
            TorrentStatus::QueuedToVerify => "check-wait",
            TorrentStatus::Verifying => "checking",
            TorrentStatus::QueuedToDownload => "download-wait",
            TorrentStatus::Downloading => "downloading",
            TorrentStatus::QueuedToSeed => "seed-wait",
            TorrentStatus::Seeding => "seeding",
            TorrentStatus::Unknown(_) => "unknown",
        }
    }
}

/// One torrent from a `torrent-get` snapshot.
///
/// Field names follow the daemon's camelCase wire form so the struct
/// deserializes straight out of the RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Torrent {
    pub id: TorrentId,
    /// Display name; the daemon does not guarantee uniqueness.
    pub name: String,
    pub status: TorrentStatus,
    /// Fraction complete in [0.0, 1.0]; 0.0 means no payload data yet.
    pub percent_done: f64,
    /// Cumulative seconds spent actively downloading.
    pub seconds_downloading: i64,
    /// Daemon-reported flag: running but no transfer progress for a while.
    pub is_stalled: bool,
    /// Unix timestamp of when the torrent was added; immutable.
    pub added_date: i64,
}

impl Torrent {
    /// Seconds since the torrent was added, clamped to zero for clock skew.
    pub fn age_secs(&self, now_unix: i64) -> u64 {
        now_unix.saturating_sub(self.added_date).max(0) as u64
    }

    pub fn is_downloading(&self) -> bool {
        self.status == TorrentStatus::Downloading
    }

    pub fn is_stopped(&self) -> bool {
        self.status == TorrentStatus::Stopped
    }
}
