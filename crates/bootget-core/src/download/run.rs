//! Event loop driver: poll the engine until the download terminates.

use super::{Download, Outcome};
use crate::env::ResultChannel;
use crate::error::WgetError;
use crate::transport::{EngineState, FailureKind, HttpEngine, ResponseSink, TransferFailure, TransferResult};

/// Polls `engine` until `download` reaches its terminal outcome.
///
/// An engine that goes idle while the download is still in flight has lost
/// the request; that is reported as an `Unknown` transport failure so the
/// download still terminates exactly once.
pub fn run_to_completion<E, R>(
    engine: &mut E,
    download: &mut Download<'_, R>,
) -> Result<Outcome, WgetError>
where
    E: HttpEngine + ?Sized,
    R: ResultChannel,
{
    while download.state().is_in_flight() {
        if engine.poll(download) == EngineState::Idle && !download.is_terminated() {
            tracing::error!("HTTP engine went idle without completing the request");
            download.on_complete(TransferResult::Failed(TransferFailure {
                kind: FailureKind::Unknown,
                code: 0,
            }));
        }
    }
    download.outcome().cloned().ok_or(WgetError::NotRequested)
}
