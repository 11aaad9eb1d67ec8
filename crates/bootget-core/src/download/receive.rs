//! Engine callbacks: chunk receiver and completion handler.

use super::{Download, DownloadState, Outcome};
use crate::env::{ResultChannel, FILESIZE};
use crate::error::FailureReason;
use crate::transport::{ChunkStatus, FlowControl, ResponseSink, TransferResult};

impl<R: ResultChannel> ResponseSink for Download<'_, R> {
    fn on_chunk(&mut self, chain: Option<&[&[u8]]>, window: &mut dyn FlowControl) -> ChunkStatus {
        match self.state {
            DownloadState::Requesting => self.state = DownloadState::Transferring,
            DownloadState::Transferring => {}
            _ => {
                tracing::warn!(state = ?self.state, "chunk delivered outside a transfer, aborting");
                return ChunkStatus::Abort;
            }
        }

        let Some(chain) = chain else {
            tracing::debug!("end of body");
            return ChunkStatus::Continue;
        };

        let addr = self.session.write_cursor();
        match self.session.append(chain) {
            Ok(len) => {
                tracing::debug!("downloaded chunk size {}, to addr 0x{:x}", len, addr);
                window.consumed(len);
                ChunkStatus::Continue
            }
            Err(full) => {
                tracing::error!(error = %full, "aborting transfer");
                self.state = DownloadState::Terminated(Outcome::Failed(
                    FailureReason::DestinationFull(full),
                ));
                ChunkStatus::Abort
            }
        }
    }

    fn on_complete(&mut self, result: TransferResult) {
        match &self.state {
            DownloadState::Requesting | DownloadState::Transferring => {}
            // Overflow already latched the outcome; the engine is just
            // reporting the abort it was asked for.
            DownloadState::Terminated(Outcome::Failed(FailureReason::DestinationFull(_))) => {
                tracing::debug!(?result, "completion after local abort");
                return;
            }
            state => {
                tracing::warn!(?state, ?result, "completion outside a transfer ignored");
                return;
            }
        }

        let outcome = match result {
            TransferResult::Completed { rx_content_len } => {
                let bytes = self.session.total_bytes() as u64;
                if rx_content_len != bytes {
                    tracing::warn!(
                        rx_content_len,
                        bytes,
                        "engine byte count differs from bytes written"
                    );
                }
                match self.results.publish(FILESIZE, bytes) {
                    Ok(()) => {
                        tracing::info!("{} bytes successfully downloaded.", bytes);
                        Outcome::Success { bytes }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "download finished but size not recorded");
                        Outcome::Failed(FailureReason::Publish(e))
                    }
                }
            }
            TransferResult::Failed(failure) => {
                tracing::error!(
                    "http error: {} after {} bytes",
                    failure,
                    self.session.total_bytes()
                );
                Outcome::Failed(FailureReason::Transport(failure))
            }
        };
        self.state = DownloadState::Terminated(outcome);
    }
}
