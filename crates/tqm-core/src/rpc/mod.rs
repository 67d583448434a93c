//! Transmission RPC over HTTP.
//!
//! JSON envelopes POSTed to `/transmission/rpc`, with the daemon's
//! session-id handshake and optional basic auth. All calls block in the
//! current thread.

mod client;
mod error;
mod protocol;

pub use client::TransmissionClient;
pub use error::RpcError;
