//! One HTTP GET into a caller-owned destination.
//!
//! `Download` is the session handle: it owns the write cursor, the result
//! channel and the lifecycle state. `request` parses the URL and hands the
//! GET to an engine; the engine then drives the download through its
//! `ResponseSink` impl (see `receive`). Each `Download` is independent, so
//! running several at once just means several handles.

mod receive;
mod run;
mod state;

pub use run::run_to_completion;
pub use state::{DownloadState, Outcome};

use crate::env::{ResultChannel, FILEADDR};
use crate::error::WgetError;
use crate::session::Session;
use crate::transport::{GetRequest, HttpEngine};
use crate::url_model::parse_url;

pub struct Download<'buf, R> {
    session: Session<'buf>,
    results: R,
    state: DownloadState,
}

impl<'buf, R: ResultChannel> Download<'buf, R> {
    /// `dest` receives the body; `base_address` is the address it is known by
    /// (published as `fileaddr`).
    pub fn new(dest: &'buf mut [u8], base_address: u64, results: R) -> Self {
        Self {
            session: Session::new(dest, base_address),
            results,
            state: DownloadState::Idle,
        }
    }

    pub fn state(&self) -> &DownloadState {
        &self.state
    }

    pub fn session(&self) -> &Session<'buf> {
        &self.session
    }

    pub fn results(&self) -> &R {
        &self.results
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, DownloadState::Terminated(_))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            DownloadState::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Start fetching `url` with `engine`.
    ///
    /// Returns once the engine has accepted the request; the body arrives
    /// later, when the engine is polled. A parse error or engine refusal
    /// terminates the request here. A destination that does not fit below
    /// `u64::MAX` is refused before anything else, leaving the state as is. If `fileaddr` cannot be published the
    /// request stays with the engine, but the error is still returned.
    pub fn request<E>(&mut self, url: &str, engine: &mut E) -> Result<(), WgetError>
    where
        E: HttpEngine + ?Sized,
    {
        if self.state.is_in_flight() {
            return Err(WgetError::Busy);
        }
        if self.session.end_address().is_none() {
            let err = WgetError::AddressRange {
                base: self.session.base_address(),
                capacity: self.session.capacity(),
            };
            tracing::error!(error = %err, "refusing request");
            return Err(err);
        }

        self.state = DownloadState::Parsing;
        let parsed = match parse_url(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(url, error = %e, "cannot parse URL");
                self.state = DownloadState::Terminated(Outcome::BadUrl(e.clone()));
                return Err(e.into());
            }
        };

        self.session.reset();
        tracing::info!(
            "downloading {} to addr 0x{:x}",
            url,
            self.session.base_address()
        );

        self.state = DownloadState::Requesting;
        let request = GetRequest {
            host: &parsed.host,
            port: parsed.port,
            path: parsed.path,
        };
        if let Err(e) = engine.begin(&request) {
            tracing::error!(error = %e, "HTTP engine rejected request");
            self.state = DownloadState::Terminated(Outcome::Rejected(error_chain(&e)));
            return Err(e.into());
        }

        if let Err(e) = self.results.publish(FILEADDR, self.session.base_address()) {
            tracing::error!(error = %e, "cannot publish destination address");
            return Err(e.into());
        }
        Ok(())
    }
}

/// `error: cause: cause...`, for keeping a non-`Clone` error in the outcome.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
