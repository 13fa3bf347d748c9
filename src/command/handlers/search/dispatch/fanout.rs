use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::errors::UpstreamQueryError;
use crate::engine::search::SearchQuery;
use crate::engine::selector::WorkerSelector;
use crate::engine::tools::WorkerResponse;
use crate::engine::transport::{ChunkStream, WorkerTransport};

use super::traits::QueryExecutor;

const LOG_TARGET: &str = "snel_search::dispatch";

/// Picks workers from the selector and fans the query out over a transport.
pub struct FanoutExecutor {
    selector: Arc<WorkerSelector>,
    transport: Arc<dyn WorkerTransport>,
    workers_per_query: usize,
}

impl FanoutExecutor {
    pub fn new(
        selector: Arc<WorkerSelector>,
        transport: Arc<dyn WorkerTransport>,
        workers_per_query: usize,
    ) -> Self {
        Self {
            selector,
            transport,
            workers_per_query: workers_per_query.max(1),
        }
    }
}

#[async_trait]
impl QueryExecutor for FanoutExecutor {
    async fn stream(&self, query: &SearchQuery) -> Result<ChunkStream, UpstreamQueryError> {
        let worker = self.selector.draw()?;
        info!(
            target: LOG_TARGET,
            worker = %worker,
            tools = query.tools.len(),
            "Dispatching streaming query to worker"
        );
        self.transport.query_stream(worker, query).await
    }

    async fn collect(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<WorkerResponse>, UpstreamQueryError> {
        let workers = self.selector.draw_many(self.workers_per_query)?;
        info!(
            target: LOG_TARGET,
            workers = ?workers,
            tools = query.tools.len(),
            "Dispatching buffered query to workers"
        );

        let transport = &self.transport;
        let mut pending: FuturesUnordered<_> = workers
            .iter()
            .map(|&worker| async move { (worker, transport.query(worker, query).await) })
            .collect();

        let mut responses = Vec::with_capacity(workers.len());
        let mut failures = 0;
        while let Some((worker, result)) = pending.next().await {
            match result {
                Ok(response) => responses.push(response),
                Err(e) => {
                    failures += 1;
                    warn!(target: LOG_TARGET, worker = %worker, error = %e, "Worker failed, skipping its results");
                }
            }
        }

        if responses.is_empty() && failures > 0 {
            return Err(UpstreamQueryError::AllWorkersFailed {
                attempted: workers.len(),
            });
        }

        Ok(responses)
    }
}
