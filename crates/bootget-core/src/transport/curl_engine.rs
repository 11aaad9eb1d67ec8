//! HTTP engine backed by libcurl (easy interface).
//!
//! `begin` only validates and stores a configured handle; `poll` runs the
//! whole transfer, feeding each curl write callback to the sink as one chunk.
//! Whatever the sink acknowledges is what the write callback returns, so an
//! unacknowledged chunk makes curl abort with a write error.

use super::classify::classify_curl_error;
use super::{
    AckCounter, ChunkStatus, EngineError, EngineState, FailureKind, GetRequest, HttpEngine,
    ResponseSink, TransferFailure, TransferResult,
};
use crate::config::TransportConfig;
use std::cell::Cell;
use std::time::Duration;

const USER_AGENT: &str = concat!("bootget/", env!("CARGO_PKG_VERSION"));

/// One-request-at-a-time engine over `curl::easy::Easy`.
pub struct CurlEngine {
    config: TransportConfig,
    pending: Option<curl::easy::Easy>,
}

impl CurlEngine {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    fn configure(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        // Plain GET of exactly one resource: no redirects.
        easy.follow_location(false)?;
        easy.fail_on_error(true)?;
        easy.useragent(USER_AGENT)?;
        easy.connect_timeout(Duration::from_secs(self.config.connect_timeout_secs))?;
        easy.low_speed_limit(self.config.low_speed_limit)?;
        easy.low_speed_time(Duration::from_secs(self.config.low_speed_time_secs))?;
        easy.timeout(Duration::from_secs(self.config.timeout_secs))?;
        Ok(easy)
    }
}

impl HttpEngine for CurlEngine {
    fn begin(&mut self, request: &GetRequest<'_>) -> Result<(), EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::Busy);
        }
        let url = request.url();
        let easy = self
            .configure(&url)
            .map_err(|source| EngineError::Setup {
                url: url.clone(),
                source,
            })?;
        tracing::debug!(%url, "GET queued");
        self.pending = Some(easy);
        Ok(())
    }

    fn poll(&mut self, sink: &mut dyn ResponseSink) -> EngineState {
        let Some(mut easy) = self.pending.take() else {
            return EngineState::Idle;
        };
        let result = perform(&mut easy, sink);
        sink.on_complete(result);
        EngineState::Idle
    }
}

/// Runs the transfer, delivering chunks to `sink`, and classifies the end.
fn perform(easy: &mut curl::easy::Easy, sink: &mut dyn ResponseSink) -> TransferResult {
    let received = Cell::new(0u64);

    let performed = {
        let mut transfer = easy.transfer();
        let installed = transfer.write_function(|data| {
            let mut window = AckCounter::default();
            match sink.on_chunk(Some(&[data][..]), &mut window) {
                ChunkStatus::Continue => {
                    let acked = window.acked();
                    if acked != data.len() {
                        tracing::warn!(acked, len = data.len(), "chunk not fully acknowledged");
                    }
                    received.set(received.get() + acked as u64);
                    Ok(acked)
                }
                ChunkStatus::Abort => Ok(0),
            }
        });
        installed.and_then(|()| transfer.perform())
    };

    let status = easy.response_code().unwrap_or(0);
    if let Err(e) = performed {
        return TransferResult::Failed(classify_curl_error(&e, status));
    }
    if !(200..300).contains(&status) {
        return TransferResult::Failed(TransferFailure {
            kind: FailureKind::ServerResponse(status),
            code: 0,
        });
    }

    let mut window = AckCounter::default();
    sink.on_chunk(None, &mut window);
    TransferResult::Completed {
        rx_content_len: received.get(),
    }
}
