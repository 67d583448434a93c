//! Minimal Transmission RPC daemon for integration tests.
//!
//! Speaks just enough of the protocol: the 409 session-id handshake,
//! `session-get`, `torrent-get`, `torrent-stop`, `torrent-start-now`, and
//! `torrent-remove`, all against an in-memory torrent table.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tqm_core::torrent::{Torrent, TorrentStatus};

#[derive(Debug, Clone, Copy, Default)]
pub struct DaemonOptions {
    /// If true, every request is answered 401 (simulates bad credentials).
    pub reject_auth: bool,
    /// Rotate the session id after this many successful responses, forcing
    /// clients to re-negotiate mid-run.
    pub rotate_session_after: Option<usize>,
}

struct DaemonState {
    torrents: Vec<Torrent>,
    session_id: String,
    generation: usize,
    served: usize,
    removed: Vec<(i64, bool)>,
    handshakes: usize,
    opts: DaemonOptions,
}

/// Handle to a daemon running on a background thread. The server runs until
/// the process exits.
pub struct FakeDaemon {
    pub port: u16,
    state: Arc<Mutex<DaemonState>>,
}

impl FakeDaemon {
    /// Current torrent table.
    pub fn torrents(&self) -> Vec<Torrent> {
        self.state.lock().unwrap().torrents.clone()
    }

    /// Ids removed so far, with the delete-local-data flag each carried.
    pub fn removed(&self) -> Vec<(i64, bool)> {
        self.state.lock().unwrap().removed.clone()
    }

    /// Number of 409 handshake rounds served.
    pub fn handshakes(&self) -> usize {
        self.state.lock().unwrap().handshakes
    }
}

pub fn start(torrents: Vec<Torrent>) -> FakeDaemon {
    start_with_options(torrents, DaemonOptions::default())
}

pub fn start_with_options(torrents: Vec<Torrent>, opts: DaemonOptions) -> FakeDaemon {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(DaemonState {
        torrents,
        session_id: "session-0".to_string(),
        generation: 0,
        served: 0,
        removed: Vec::new(),
        handshakes: 0,
        opts,
    }));
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &state));
        }
    });
    FakeDaemon { port, state }
}

fn handle(mut stream: TcpStream, state: &Mutex<DaemonState>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let Some((headers, body)) = read_request(&mut stream) else {
        return;
    };

    let mut state = state.lock().unwrap();
    if state.opts.reject_auth {
        respond(&mut stream, "401 Unauthorized", &state.session_id, "");
        return;
    }

    let presented = header_value(&headers, "X-Transmission-Session-Id");
    if presented.as_deref() != Some(state.session_id.as_str()) {
        state.handshakes += 1;
        let session = state.session_id.clone();
        respond(&mut stream, "409 Conflict", &session, "");
        return;
    }

    let request: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => {
            let session = state.session_id.clone();
            respond(&mut stream, "400 Bad Request", &session, "");
            return;
        }
    };
    let method = request["method"].as_str().unwrap_or("");
    let reply = dispatch(&mut state, method, &request["arguments"]);

    state.served += 1;
    if let Some(after) = state.opts.rotate_session_after {
        if state.served == after {
            state.generation += 1;
            state.session_id = format!("session-{}", state.generation);
        }
    }
    let session = state.session_id.clone();
    respond(&mut stream, "200 OK", &session, &reply.to_string());
}

fn dispatch(state: &mut DaemonState, method: &str, arguments: &Value) -> Value {
    match method {
        "session-get" => json!({"result": "success", "arguments": {"rpc-version": 17}}),
        "torrent-get" => {
            json!({"result": "success", "arguments": {"torrents": state.torrents}})
        }
        "torrent-stop" => {
            for id in ids(arguments) {
                if let Some(t) = state.torrents.iter_mut().find(|t| t.id == id) {
                    t.status = TorrentStatus::Stopped;
                    t.is_stalled = false;
                }
            }
            json!({"result": "success", "arguments": {}})
        }
        "torrent-start-now" => {
            for id in ids(arguments) {
                if let Some(t) = state.torrents.iter_mut().find(|t| t.id == id) {
                    t.status = TorrentStatus::Downloading;
                }
            }
            json!({"result": "success", "arguments": {}})
        }
        "torrent-remove" => {
            let delete = arguments["delete-local-data"].as_bool().unwrap_or(false);
            for id in ids(arguments) {
                state.torrents.retain(|t| t.id != id);
                state.removed.push((id, delete));
            }
            json!({"result": "success", "arguments": {}})
        }
        _ => json!({"result": "method name not recognized"}),
    }
}

/// The `ids` argument as plain integers; Transmission also accepts other
/// selector forms, but the sweep only ever sends id lists.
fn ids(arguments: &Value) -> Vec<i64> {
    arguments["ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}

fn header_value(headers: &str, name: &str) -> Option<String> {
    for line in headers.lines().skip(1) {
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case(name) {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

/// Reads one HTTP/1.1 request: headers up to the blank line, then exactly
/// Content-Length bytes of body.
fn read_request(stream: &mut TcpStream) -> Option<(String, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        if data.len() > 64 * 1024 {
            return None;
        }
    };
    let headers = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let content_length = header_value(&headers, "Content-Length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let body = data.get(body_start..body_start + content_length)?.to_vec();
    Some((headers, body))
}

fn respond(stream: &mut TcpStream, status: &str, session_id: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nX-Transmission-Session-Id: {}\r\nContent-Length: {}\r\n\r\n{}",
        status,
        session_id,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
