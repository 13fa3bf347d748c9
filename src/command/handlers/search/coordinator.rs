use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::sync::Arc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::engine::errors::SearchError;
use crate::engine::search::SearchQuery;
use crate::engine::transport::ChunkStream;

use super::dispatch::QueryExecutor;
use super::merge::{MergedResultMap, ToolResultMerger};
use super::scope::ToolScope;
use super::streaming::{FramedEvent, StreamRelay, guard_execution};

const LOG_TARGET: &str = "snel_search::coordinator";

/// Entry point for both query modes.
pub struct QueryCoordinator {
    executor: Arc<dyn QueryExecutor>,
    merger: ToolResultMerger,
}

impl QueryCoordinator {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            merger: ToolResultMerger::new(),
        }
    }

    /// Streaming mode. The returned stream is lazy: nothing is dispatched until
    /// it is first polled, and it always ends with a well-formed record.
    pub fn stream(&self, query: SearchQuery, cancel: CancellationToken) -> BoxStream<'static, FramedEvent> {
        let executor = Arc::clone(&self.executor);
        let limit = query.max_execution_time();

        debug!(
            target: LOG_TARGET,
            tools = ?query.tools,
            model = ?query.model,
            limit = ?limit,
            "Starting streaming query"
        );

        let chunks: ChunkStream = stream::once(async move { executor.stream(&query).await })
            .flat_map(|opened| match opened {
                Ok(chunks) => chunks,
                Err(e) => stream::iter(vec![Err(e)]).boxed(),
            })
            .boxed();

        StreamRelay::relay(guard_execution(chunks, limit, cancel)).boxed()
    }

    /// Aggregating mode. Either every worker answer is merged or the call
    /// fails as a whole.
    pub async fn aggregate(
        &self,
        query: &SearchQuery,
        scope: ToolScope,
        cancel: &CancellationToken,
    ) -> Result<MergedResultMap, SearchError> {
        let tools = scope.resolve(&query.tools);
        let scoped = query.with_tools(tools.clone());
        let limit = scoped.max_execution_time();

        debug!(
            target: LOG_TARGET,
            tools = ?tools,
            model = ?scoped.model,
            limit = ?limit,
            "Starting aggregating query"
        );

        let responses = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            result = timeout(limit, self.executor.collect(&scoped)) => match result {
                Ok(responses) => responses?,
                Err(_) => return Err(SearchError::Timeout(limit)),
            },
        };

        let merged = self.merger.merge(&responses, &tools);
        info!(
            target: LOG_TARGET,
            responses = responses.len(),
            tools = merged.len(),
            "Aggregated worker results"
        );
        Ok(merged)
    }
}
