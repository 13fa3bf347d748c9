use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::engine::errors::UpstreamQueryError;
use crate::engine::search::SearchQuery;
use crate::engine::tools::WorkerResponse;
use crate::engine::types::{StreamChunk, WorkerId};

/// Lazily produced output of one streaming query execution.
pub type ChunkStream = BoxStream<'static, Result<StreamChunk, UpstreamQueryError>>;

/// Wire-level access to remote workers.
#[async_trait]
pub trait WorkerTransport: Send + Sync {
    /// Runs `query` on `worker` and waits for its final structured answer.
    async fn query(
        &self,
        worker: WorkerId,
        query: &SearchQuery,
    ) -> Result<WorkerResponse, UpstreamQueryError>;

    /// Runs `query` on `worker` and yields its output as it arrives.
    async fn query_stream(
        &self,
        worker: WorkerId,
        query: &SearchQuery,
    ) -> Result<ChunkStream, UpstreamQueryError>;

    /// Cheap liveness probe used by the membership refresher.
    async fn is_reachable(&self, worker: WorkerId) -> bool;
}
