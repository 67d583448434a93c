//! Seam between the sweep and the daemon it drives.

use crate::rpc::RpcError;
use crate::torrent::{Torrent, TorrentId};

/// The control surface of one Transmission daemon, as much of it as a sweep
/// needs. [`TransmissionClient`](crate::rpc::TransmissionClient) implements
/// this over RPC; tests substitute an in-memory table.
pub trait JobSource {
    /// Snapshot of every torrent the daemon knows about.
    fn list_jobs(&mut self) -> Result<Vec<Torrent>, RpcError>;
    /// Stop a torrent, leaving it and its data in place.
    fn stop(&mut self, id: TorrentId) -> Result<(), RpcError>;
    /// Remove a torrent, deleting its downloaded data when asked.
    fn purge(&mut self, id: TorrentId, delete_data: bool) -> Result<(), RpcError>;
    /// Start a torrent immediately, bypassing the daemon's own queue.
    fn activate(&mut self, id: TorrentId) -> Result<(), RpcError>;
}
