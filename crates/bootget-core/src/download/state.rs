//! Request lifecycle states and the terminal outcome.

use crate::error::{FailureReason, EXIT_BAD_URL, EXIT_ENGINE_REJECTED, EXIT_OK};
use crate::url_model::UrlError;
use std::fmt;

/// `Idle → Parsing → Requesting → Transferring → Terminated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadState {
    Idle,
    Parsing,
    /// Handed to the engine, no body bytes yet.
    Requesting,
    /// At least one chunk delivered.
    Transferring,
    Terminated(Outcome),
}

impl DownloadState {
    /// Between hand-off to the engine and completion.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            DownloadState::Parsing | DownloadState::Requesting | DownloadState::Transferring
        )
    }
}

/// How a request ended. Latched once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { bytes: u64 },
    BadUrl(UrlError),
    /// Engine refused to start; the message is the engine's reason.
    Rejected(String),
    Failed(FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// `0` on success, a negative errno-style code otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success { .. } => EXIT_OK,
            Outcome::BadUrl(_) => EXIT_BAD_URL,
            Outcome::Rejected(_) => EXIT_ENGINE_REJECTED,
            Outcome::Failed(reason) => reason.exit_code(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { bytes } => write!(f, "{} bytes downloaded", bytes),
            Outcome::BadUrl(e) => write!(f, "bad URL: {}", e),
            Outcome::Rejected(reason) => write!(f, "request rejected: {}", reason),
            Outcome::Failed(reason) => write!(f, "download failed: {}", reason),
        }
    }
}
