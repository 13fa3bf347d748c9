use async_trait::async_trait;

use crate::engine::errors::UpstreamQueryError;
use crate::engine::search::SearchQuery;
use crate::engine::tools::WorkerResponse;
use crate::engine::transport::ChunkStream;

/// Runs a query against the worker network on behalf of the coordinator.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Starts a streaming execution and hands back its chunk producer.
    async fn stream(&self, query: &SearchQuery) -> Result<ChunkStream, UpstreamQueryError>;

    /// Waits for the final answers of every worker picked for `query`,
    /// in completion order.
    async fn collect(&self, query: &SearchQuery)
    -> Result<Vec<WorkerResponse>, UpstreamQueryError>;
}
