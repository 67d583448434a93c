//! Blocking HTTP client for one Transmission daemon.

use std::str;
use std::time::Duration;

use curl::easy::{Easy, List};
use serde::Serialize;

use crate::config::InstanceConfig;
use crate::sweep::JobSource;
use crate::torrent::{Torrent, TorrentId};

use super::error::RpcError;
use super::protocol::{
    IdsArgs, RemoveArgs, Request, Response, TorrentGetArgs, TorrentList, TORRENT_FIELDS,
};

/// Header carrying the CSRF token the daemon issues via 409 responses.
const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single daemon's RPC endpoint.
///
/// Holds the session id across calls and re-negotiates it transparently when
/// the daemon rotates it. Each call builds a fresh curl handle; the RPC
/// bodies are small JSON documents, so there is nothing worth pooling.
pub struct TransmissionClient {
    url: String,
    username: Option<String>,
    password: Option<String>,
    session_id: Option<String>,
}

/// One raw HTTP exchange, before the envelope is decoded.
struct Exchange {
    code: u32,
    body: Vec<u8>,
    session_id: Option<String>,
}

impl TransmissionClient {
    /// Connects to an instance and verifies it with a `session-get` round
    /// trip, so unreachable hosts and bad credentials fail before any sweep
    /// work starts.
    pub fn connect(instance: &InstanceConfig) -> Result<Self, RpcError> {
        let mut client = TransmissionClient {
            url: format!(
                "http://{}:{}/transmission/rpc",
                instance.host, instance.port
            ),
            username: instance.username.clone(),
            password: instance.password.clone(),
            session_id: None,
        };
        client.call("session-get", None::<()>)?;
        Ok(client)
    }

    /// One RPC call. A 409 means the session id is missing or stale; the
    /// daemon sends a fresh one in the same response, so retry once with it.
    fn call<A: Serialize>(
        &mut self,
        method: &'static str,
        arguments: Option<A>,
    ) -> Result<Response, RpcError> {
        let body = serde_json::to_vec(&Request { method, arguments })?;

        let mut exchange = self.perform(&body)?;
        if exchange.code == 409 {
            if let Some(id) = exchange.session_id.take() {
                tracing::debug!(url = %self.url, "session id renewed");
                self.session_id = Some(id);
                exchange = self.perform(&body)?;
            }
        }
        if exchange.code != 200 {
            return Err(RpcError::Http(exchange.code));
        }

        let response: Response = serde_json::from_slice(&exchange.body)?;
        if !response.is_success() {
            return Err(RpcError::Daemon(response.result));
        }
        Ok(response)
    }

    fn perform(&self, body: &[u8]) -> Result<Exchange, RpcError> {
        let mut easy = Easy::new();
        easy.url(&self.url)?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;
        easy.connect_timeout(CONNECT_TIMEOUT)?;
        easy.timeout(REQUEST_TIMEOUT)?;
        if let Some(username) = &self.username {
            easy.username(username)?;
        }
        if let Some(password) = &self.password {
            easy.password(password)?;
        }

        let mut list = List::new();
        list.append("Content-Type: application/json")?;
        if let Some(id) = &self.session_id {
            list.append(&format!("{SESSION_ID_HEADER}: {id}"))?;
        }
        easy.http_headers(list)?;

        let mut response_body = Vec::new();
        let mut session_id = None;
        {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                if let Ok(line) = str::from_utf8(line) {
                    if let Some((name, value)) = line.split_once(':') {
                        if name.trim().eq_ignore_ascii_case(SESSION_ID_HEADER) {
                            session_id = Some(value.trim().to_string());
                        }
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                response_body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok(Exchange {
            code,
            body: response_body,
            session_id,
        })
    }
}

impl JobSource for TransmissionClient {
    fn list_jobs(&mut self) -> Result<Vec<Torrent>, RpcError> {
        let response = self.call(
            "torrent-get",
            Some(TorrentGetArgs {
                fields: TORRENT_FIELDS.to_vec(),
            }),
        )?;
        let list: TorrentList = serde_json::from_value(response.arguments)?;
        Ok(list.torrents)
    }

    fn stop(&mut self, id: TorrentId) -> Result<(), RpcError> {
        self.call("torrent-stop", Some(IdsArgs { ids: vec![id] }))?;
        Ok(())
    }

    fn purge(&mut self, id: TorrentId, delete_data: bool) -> Result<(), RpcError> {
        self.call(
            "torrent-remove",
            Some(RemoveArgs {
                ids: vec![id],
                delete_local_data: delete_data,
            }),
        )?;
        Ok(())
    }

    fn activate(&mut self, id: TorrentId) -> Result<(), RpcError> {
        // start-now rather than start: admission already enforced the
        // concurrency bound, so the daemon queue must not hold these back.
        self.call("torrent-start-now", Some(IdsArgs { ids: vec![id] }))?;
        Ok(())
    }
}
