//! Request and response envelopes of the Transmission RPC protocol.
//!
//! Every call is a JSON object `{"method": ..., "arguments": ...}` POSTed to
//! the RPC endpoint; every reply is `{"result": ..., "arguments": ...}` where
//! `result` is the literal string `success` or a daemon error message.

use serde::{Deserialize, Serialize};

use crate::torrent::{Torrent, TorrentId};

/// Fields requested from `torrent-get`; exactly the set the sweep reads.
pub const TORRENT_FIELDS: [&str; 7] = [
    "id",
    "name",
    "status",
    "percentDone",
    "secondsDownloading",
    "isStalled",
    "addedDate",
];

/// Outgoing request envelope.
#[derive(Debug, Serialize)]
pub struct Request<A> {
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<A>,
}

/// Incoming response envelope. `arguments` is kept raw here; callers that
/// expect a payload decode it into their own type.
#[derive(Debug, Deserialize)]
pub struct Response {
    pub result: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }
}

/// Arguments of `torrent-get`.
#[derive(Debug, Serialize)]
pub struct TorrentGetArgs {
    pub fields: Vec<&'static str>,
}

/// Arguments of calls addressed by id only (`torrent-stop`,
/// `torrent-start-now`).
#[derive(Debug, Serialize)]
pub struct IdsArgs {
    pub ids: Vec<TorrentId>,
}

/// Arguments of `torrent-remove`.
#[derive(Debug, Serialize)]
pub struct RemoveArgs {
    pub ids: Vec<TorrentId>,
    #[serde(rename = "delete-local-data")]
    pub delete_local_data: bool,
}

/// Payload of a `torrent-get` reply.
#[derive(Debug, Deserialize)]
pub struct TorrentList {
    pub torrents: Vec<Torrent>,
}
