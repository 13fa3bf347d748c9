use crate::engine::errors::UpstreamQueryError;
use crate::engine::search::SearchQuery;
use crate::engine::tools::WorkerResponse;
use crate::engine::transport::{ChunkStream, WorkerTransport};
use crate::engine::types::{StreamChunk, WorkerId};
use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Clone)]
enum Outcome {
    Respond(WorkerResponse),
    Fail(UpstreamQueryError),
}

#[derive(Clone)]
struct StreamScript {
    chunks: Vec<Result<String, UpstreamQueryError>>,
    hang: bool,
}

/// In-memory worker transport answering from a script.
pub struct ScriptedTransport {
    outcomes: HashMap<WorkerId, Outcome>,
    streams: HashMap<WorkerId, StreamScript>,
    delays: HashMap<WorkerId, Duration>,
    unreachable: HashSet<WorkerId>,
    calls: Mutex<Vec<WorkerId>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            streams: HashMap::new(),
            delays: HashMap::new(),
            unreachable: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, worker: u32, response: WorkerResponse) -> Self {
        self.outcomes
            .insert(WorkerId(worker), Outcome::Respond(response));
        self
    }

    pub fn fail(mut self, worker: u32, reason: &str) -> Self {
        self.outcomes.insert(
            WorkerId(worker),
            Outcome::Fail(UpstreamQueryError::Transport {
                worker: WorkerId(worker),
                reason: reason.to_string(),
            }),
        );
        self
    }

    pub fn delay(mut self, worker: u32, delay: Duration) -> Self {
        self.delays.insert(WorkerId(worker), delay);
        self
    }

    pub fn stream(mut self, worker: u32, chunks: Vec<Result<&str, &str>>) -> Self {
        self.streams.insert(WorkerId(worker), Self::script(worker, chunks, false));
        self
    }

    /// Streams `chunks`, then never finishes.
    pub fn stream_then_hang(mut self, worker: u32, chunks: Vec<Result<&str, &str>>) -> Self {
        self.streams.insert(WorkerId(worker), Self::script(worker, chunks, true));
        self
    }

    pub fn unreachable(mut self, worker: u32) -> Self {
        self.unreachable.insert(WorkerId(worker));
        self
    }

    /// Workers queried so far, in call order.
    pub fn calls(&self) -> Vec<WorkerId> {
        self.calls.lock().clone()
    }

    fn script(worker: u32, chunks: Vec<Result<&str, &str>>, hang: bool) -> StreamScript {
        StreamScript {
            chunks: chunks
                .into_iter()
                .map(|chunk| {
                    chunk
                        .map(str::to_string)
                        .map_err(|reason| UpstreamQueryError::Transport {
                            worker: WorkerId(worker),
                            reason: reason.to_string(),
                        })
                })
                .collect(),
            hang,
        }
    }

    async fn pause(&self, worker: WorkerId) {
        if let Some(delay) = self.delays.get(&worker) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl WorkerTransport for ScriptedTransport {
    async fn query(
        &self,
        worker: WorkerId,
        _query: &SearchQuery,
    ) -> Result<WorkerResponse, UpstreamQueryError> {
        self.calls.lock().push(worker);
        self.pause(worker).await;
        match self.outcomes.get(&worker) {
            Some(Outcome::Respond(response)) => Ok(response.clone()),
            Some(Outcome::Fail(error)) => Err(error.clone()),
            None => Ok(WorkerResponse::default()),
        }
    }

    async fn query_stream(
        &self,
        worker: WorkerId,
        _query: &SearchQuery,
    ) -> Result<ChunkStream, UpstreamQueryError> {
        self.calls.lock().push(worker);
        self.pause(worker).await;
        if let Some(Outcome::Fail(error)) = self.outcomes.get(&worker) {
            return Err(error.clone());
        }

        let script = self.streams.get(&worker).cloned().unwrap_or(StreamScript {
            chunks: Vec::new(),
            hang: false,
        });

        let chunks = futures::stream::iter(script.chunks.into_iter().enumerate().map(
            |(sequence, chunk)| chunk.map(|text| StreamChunk::new(sequence as u64, text)),
        ));

        if script.hang {
            Ok(chunks.chain(futures::stream::pending()).boxed())
        } else {
            Ok(chunks.boxed())
        }
    }

    async fn is_reachable(&self, worker: WorkerId) -> bool {
        !self.unreachable.contains(&worker)
    }
}
