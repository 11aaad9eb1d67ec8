//! Map curl errors onto transfer failure kinds.

use super::{FailureKind, TransferFailure};

/// Classify a failed curl transfer. `status` is the HTTP status curl saw, 0 if
/// none.
pub fn classify_curl_error(e: &curl::Error, status: u32) -> TransferFailure {
    let kind = if e.is_http_returned_error() {
        FailureKind::ServerResponse(status)
    } else if e.is_couldnt_resolve_host() {
        FailureKind::Hostname
    } else if e.is_couldnt_connect() {
        FailureKind::Connection
    } else if e.is_operation_timedout() {
        FailureKind::Timeout
    } else if e.is_partial_file() {
        FailureKind::ContentLength
    } else if e.is_got_nothing() || e.is_recv_error() || e.is_send_error() || e.is_read_error() {
        FailureKind::Closed
    } else if e.is_write_error() || e.is_aborted_by_callback() {
        FailureKind::LocalAbort
    } else if e.is_out_of_memory() {
        FailureKind::OutOfMemory
    } else {
        FailureKind::Unknown
    };
    TransferFailure {
        kind,
        code: i32::try_from(e.code()).unwrap_or(i32::MAX),
    }
}
