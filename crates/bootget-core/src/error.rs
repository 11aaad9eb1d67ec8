//! Error and exit-code taxonomy for a download request.
//!
//! Synchronous failures come back from `Download::request` as `WgetError`.
//! Failures that end a transfer already in flight are recorded in the
//! download's `Outcome` instead. Both map onto the same negative exit codes.

use crate::env::PublishError;
use crate::session::DestinationFull;
use crate::transport::{EngineError, TransferFailure};
use crate::url_model::UrlError;
use thiserror::Error;

pub const EXIT_OK: i32 = 0;
/// Engine refused to start the request (`-EPERM`).
pub const EXIT_ENGINE_REJECTED: i32 = -1;
/// URL did not parse (`-ENOENT`).
pub const EXIT_BAD_URL: i32 = -2;
/// Transport reported a failure (`-EIO`).
pub const EXIT_TRANSFER_FAILED: i32 = -5;
/// A result variable could not be published (`-EACCES`).
pub const EXIT_PUBLISH_FAILED: i32 = -13;
/// Session already has a request in flight (`-EBUSY`).
pub const EXIT_BUSY: i32 = -16;
/// No request was ever issued on the session (`-EINVAL`).
pub const EXIT_NOT_REQUESTED: i32 = -22;
/// Body did not fit in the destination (`-ENOSPC`).
pub const EXIT_DESTINATION_FULL: i32 = -28;
/// Destination region runs past the end of the address space (`-ERANGE`).
pub const EXIT_ADDRESS_RANGE: i32 = -34;

/// Why a transfer that reached the engine did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("{0}")]
    Transport(TransferFailure),

    #[error("{0}")]
    DestinationFull(DestinationFull),

    #[error("{0}")]
    Publish(PublishError),
}

impl FailureReason {
    pub fn exit_code(&self) -> i32 {
        match self {
            FailureReason::Transport(_) => EXIT_TRANSFER_FAILED,
            FailureReason::DestinationFull(_) => EXIT_DESTINATION_FULL,
            FailureReason::Publish(_) => EXIT_PUBLISH_FAILED,
        }
    }
}

/// Errors returned synchronously to whoever issues a request.
#[derive(Debug, Error)]
pub enum WgetError {
    #[error("bad URL: {0}")]
    BadUrl(#[from] UrlError),

    #[error("HTTP engine rejected the request")]
    EngineRejected(#[from] EngineError),

    /// `fileaddr` could not be published. The request has already been handed
    /// to the engine when this is returned.
    #[error("request started but {0}")]
    Publish(#[from] PublishError),

    #[error("a download is already in flight on this session")]
    Busy,

    #[error("destination 0x{base:x} + {capacity} bytes runs past the end of the address space")]
    AddressRange { base: u64, capacity: usize },

    #[error("no request has been issued")]
    NotRequested,
}

impl WgetError {
    pub fn exit_code(&self) -> i32 {
        match self {
            WgetError::BadUrl(_) => EXIT_BAD_URL,
            WgetError::EngineRejected(_) => EXIT_ENGINE_REJECTED,
            WgetError::Publish(_) => EXIT_PUBLISH_FAILED,
            WgetError::Busy => EXIT_BUSY,
            WgetError::AddressRange { .. } => EXIT_ADDRESS_RANGE,
            WgetError::NotRequested => EXIT_NOT_REQUESTED,
        }
    }
}
