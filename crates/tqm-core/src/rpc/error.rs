//! Error type for Transmission RPC round trips.

use thiserror::Error;

/// Error raised by one RPC call. `Transport` and `Http` cover the plumbing;
/// `Daemon` means the daemon itself rejected the request.
#[derive(Debug, Error)]
pub enum RpcError {
    /// curl-level failure: DNS, refused connection, timeout.
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// Endpoint answered with an unexpected HTTP status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Response body was not the expected JSON shape.
    #[error("protocol: {0}")]
    Protocol(#[from] serde_json::Error),
    /// The daemon processed the request and reported failure.
    #[error("daemon: {0}")]
    Daemon(String),
}
