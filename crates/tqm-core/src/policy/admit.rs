//! Admission of idle torrents into the active set.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::torrent::{Torrent, TorrentId};

/// Outcome of one admission round for an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionPlan {
    /// Torrents already counting against the limit (progressing downloads).
    pub active: usize,
    /// Idle torrents eligible for admission (no payload data yet).
    pub candidates: usize,
    /// Ids picked for activation; never more than the deficit.
    pub selected: Vec<TorrentId>,
}

/// Picks which idle torrents to start so the active set approaches
/// `active_limit`.
///
/// Selection is uniform without replacement so that large candidate pools do
/// not starve later-added torrents across repeated runs; callers inject the
/// rng, so tests can seed one. Admission only grows the active set — running
/// torrents are never stopped to make room.
pub fn plan_admissions<R: Rng + ?Sized>(
    torrents: &[Torrent],
    active_limit: usize,
    rng: &mut R,
) -> AdmissionPlan {
    let active = torrents
        .iter()
        .filter(|t| t.percent_done > 0.0 && t.is_downloading())
        .count();
    let candidate_ids: Vec<TorrentId> = torrents
        .iter()
        .filter(|t| t.percent_done == 0.0)
        .map(|t| t.id)
        .collect();

    let deficit = active_limit.saturating_sub(active);
    let wanted = deficit.min(candidate_ids.len());
    let selected = candidate_ids
        .choose_multiple(rng, wanted)
        .copied()
        .collect();

    AdmissionPlan {
        active,
        candidates: candidate_ids.len(),
        selected,
    }
}
