//! HTTP engine that replays a fixed script of events, one per poll.

use bootget_core::transport::{
    AckCounter, ChunkStatus, EngineError, EngineState, FailureKind, GetRequest, HttpEngine,
    ResponseSink, TransferFailure, TransferResult,
};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub enum Step {
    /// One delivery, possibly split into several segments.
    Chunk(Vec<Vec<u8>>),
    /// Null payload marking the end of the body.
    EndOfData,
    Complete(TransferResult),
}

/// Records what the core asked for and how it answered.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    template: Vec<Step>,
    script: VecDeque<Step>,
    in_flight: bool,
    reject: bool,
    /// Keep delivering after the sink asks to abort (a misbehaving transport).
    pub ignore_abort: bool,
    /// `(host, port, path)` of every accepted request.
    pub requests: Vec<(String, u16, String)>,
    /// Bytes acknowledged for each delivered chunk.
    pub acked: Vec<usize>,
    pub statuses: Vec<ChunkStatus>,
    pub polls: usize,
}

impl ScriptedEngine {
    /// Replays `script` for every accepted request.
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            template: script,
            ..Self::default()
        }
    }

    /// Delivers `chunks` in order, the end-of-data signal, then success.
    pub fn serving(chunks: &[Vec<u8>]) -> Self {
        let total: usize = chunks.iter().map(Vec::len).sum();
        let mut script: Vec<Step> = chunks.iter().map(|c| Step::Chunk(vec![c.clone()])).collect();
        script.push(Step::EndOfData);
        script.push(Step::Complete(TransferResult::Completed {
            rx_content_len: total as u64,
        }));
        Self::new(script)
    }

    /// Refuses every request in `begin`.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    fn finish_aborted(&mut self, sink: &mut dyn ResponseSink) {
        self.in_flight = false;
        self.script.clear();
        sink.on_complete(TransferResult::Failed(TransferFailure {
            kind: FailureKind::LocalAbort,
            code: -1,
        }));
    }
}

impl HttpEngine for ScriptedEngine {
    fn begin(&mut self, request: &GetRequest<'_>) -> Result<(), EngineError> {
        if self.reject || self.in_flight {
            return Err(EngineError::Busy);
        }
        self.requests
            .push((request.host.to_string(), request.port, request.path.to_string()));
        self.script = self.template.iter().cloned().collect();
        self.in_flight = true;
        Ok(())
    }

    fn poll(&mut self, sink: &mut dyn ResponseSink) -> EngineState {
        self.polls += 1;
        if !self.in_flight {
            return EngineState::Idle;
        }
        let Some(step) = self.script.pop_front() else {
            self.in_flight = false;
            return EngineState::Idle;
        };
        match step {
            Step::Chunk(segments) => {
                let chain: Vec<&[u8]> = segments.iter().map(Vec::as_slice).collect();
                let mut window = AckCounter::default();
                let status = sink.on_chunk(Some(chain.as_slice()), &mut window);
                self.acked.push(window.acked());
                self.statuses.push(status);
                if status == ChunkStatus::Abort && !self.ignore_abort {
                    self.finish_aborted(sink);
                    return EngineState::Idle;
                }
            }
            Step::EndOfData => {
                let mut window = AckCounter::default();
                let status = sink.on_chunk(None, &mut window);
                self.statuses.push(status);
            }
            Step::Complete(result) => {
                self.in_flight = false;
                sink.on_complete(result);
                return EngineState::Idle;
            }
        }
        EngineState::Active
    }
}
