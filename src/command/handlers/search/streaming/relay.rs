use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use tracing::{debug, error, trace};

use crate::engine::errors::UpstreamQueryError;
use crate::engine::types::StreamChunk;

use super::event::FramedEvent;

const LOG_TARGET: &str = "snel_search::relay";

/// Re-emits streamed chunks as event-stream records, one per line.
///
/// Single pass: an upstream failure turns into exactly one error event, after
/// which the stream ends.
pub struct StreamRelay;

struct RelayState<S> {
    chunks: S,
    pending: VecDeque<FramedEvent>,
    transcript: String,
    chunk_count: usize,
    finished: bool,
}

impl<S> RelayState<S> {
    fn absorb(&mut self, chunk: StreamChunk) {
        trace!(target: LOG_TARGET, sequence = chunk.sequence, bytes = chunk.text.len(), "Relaying chunk");
        self.chunk_count += 1;
        self.pending
            .extend(chunk.text.split('\n').map(FramedEvent::data));
        self.transcript.push_str(&chunk.text);
    }

    fn fail(&mut self, err: UpstreamQueryError) {
        error!(
            target: LOG_TARGET,
            error = %err,
            chunks = self.chunk_count,
            "Upstream failed mid-stream"
        );
        self.pending.push_back(FramedEvent::error(err.to_string()));
        self.finished = true;
    }

    fn complete(&mut self) {
        debug!(
            target: LOG_TARGET,
            chunks = self.chunk_count,
            bytes = self.transcript.len(),
            "Stream relay completed"
        );
        self.finished = true;
    }
}

impl StreamRelay {
    pub fn relay<S>(chunks: S) -> impl Stream<Item = FramedEvent> + Send
    where
        S: Stream<Item = Result<StreamChunk, UpstreamQueryError>> + Unpin + Send,
    {
        let state = RelayState {
            chunks,
            pending: VecDeque::new(),
            transcript: String::new(),
            chunk_count: 0,
            finished: false,
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if let Some(event) = state.pending.pop_front() {
                    return Some((event, state));
                }
                if state.finished {
                    return None;
                }

                match state.chunks.next().await {
                    Some(Ok(chunk)) => state.absorb(chunk),
                    Some(Err(err)) => state.fail(err),
                    None => state.complete(),
                }
            }
        })
    }
}
