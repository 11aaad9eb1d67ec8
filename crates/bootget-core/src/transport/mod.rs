//! Boundary between the download core and the HTTP/TCP engine.
//!
//! The engine owns DNS, the connection, request framing and response
//! parsing. The core hands it a `GetRequest` through `HttpEngine::begin`, then
//! the engine's event loop (`HttpEngine::poll`) calls back into a
//! `ResponseSink`: zero or more `on_chunk` calls in body order, then exactly
//! one `on_complete`.

mod classify;
mod curl_engine;

pub use classify::classify_curl_error;
pub use curl_engine::CurlEngine;

use std::fmt;
use thiserror::Error;

/// What the core asks the engine to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetRequest<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
}

impl GetRequest<'_> {
    /// Absolute URL with an explicit port, e.g. `http://example.com:80/file.bin`.
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

/// Answer to a chunk delivery: keep the connection going or tear it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    Continue,
    Abort,
}

/// Receive window of the transport. Bytes not reported here are never
/// released, so the sender stalls.
pub trait FlowControl {
    fn consumed(&mut self, len: usize);
}

/// Flow-control window that only counts acknowledged bytes; the engine
/// inspects it after each delivery.
#[derive(Debug, Default)]
pub struct AckCounter {
    acked: usize,
}

impl AckCounter {
    pub fn acked(&self) -> usize {
        self.acked
    }
}

impl FlowControl for AckCounter {
    fn consumed(&mut self, len: usize) {
        self.acked += len;
    }
}

/// Why a transfer ended badly, as classified by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unknown,
    /// Connection refused or reset before a response arrived.
    Connection,
    /// Host name did not resolve.
    Hostname,
    /// Peer closed the connection mid-response.
    Closed,
    Timeout,
    /// Server answered with a non-success HTTP status.
    ServerResponse(u32),
    OutOfMemory,
    /// The receiving side aborted the transfer.
    LocalAbort,
    /// Fewer body bytes arrived than the response advertised.
    ContentLength,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unknown => write!(f, "unknown error"),
            FailureKind::Connection => write!(f, "connection failed"),
            FailureKind::Hostname => write!(f, "host name lookup failed"),
            FailureKind::Closed => write!(f, "connection closed by peer"),
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::ServerResponse(status) => write!(f, "server responded with HTTP {}", status),
            FailureKind::OutOfMemory => write!(f, "out of memory"),
            FailureKind::LocalAbort => write!(f, "aborted by receiver"),
            FailureKind::ContentLength => write!(f, "body shorter than Content-Length"),
        }
    }
}

/// Failure reported by the engine at completion, with its native error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} (transport code {code})")]
pub struct TransferFailure {
    pub kind: FailureKind,
    pub code: i32,
}

/// Final word from the engine on one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferResult {
    /// Body fully received; `rx_content_len` is the engine's own byte count.
    Completed { rx_content_len: u64 },
    Failed(TransferFailure),
}

/// Receiver of engine events for one request.
pub trait ResponseSink {
    /// One delivery of body bytes, possibly split over several segments.
    /// `None` marks the end of the body and carries nothing to copy.
    fn on_chunk(&mut self, chain: Option<&[&[u8]]>, window: &mut dyn FlowControl) -> ChunkStatus;

    /// Called once when the transfer ends, after every chunk.
    fn on_complete(&mut self, result: TransferResult);
}

/// Whether the engine still has work after a `poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Active,
    Idle,
}

/// Synchronous refusal to start a request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine already has a request in progress")]
    Busy,

    #[error("cannot start request for {url}")]
    Setup {
        url: String,
        #[source]
        source: curl::Error,
    },
}

/// An HTTP/TCP engine driven by a cooperative event loop.
pub trait HttpEngine {
    /// Queue a GET. Returns as soon as the request is accepted; nothing is
    /// delivered to a sink until `poll`.
    fn begin(&mut self, request: &GetRequest<'_>) -> Result<(), EngineError>;

    /// Run one turn of the event loop, delivering events to `sink`.
    fn poll(&mut self, sink: &mut dyn ResponseSink) -> EngineState;
}
