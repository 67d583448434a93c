pub mod config;
pub mod logging;

pub mod policy;
pub mod rpc;
pub mod sweep;
pub mod torrent;
