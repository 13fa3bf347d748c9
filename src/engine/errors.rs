use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::engine::tools::ToolName;
use crate::engine::types::WorkerId;

/// Errors raised while drawing workers from the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No workers known: the worker pool is exhausted")]
    ExhaustedPool,
}

/// Failures of a worker or of the query-execution collaborator.
#[derive(Debug, Clone, Error)]
pub enum UpstreamQueryError {
    #[error("Worker {worker} is not addressable")]
    UnknownWorker { worker: WorkerId },

    #[error("Transport error talking to worker {worker}: {reason}")]
    Transport { worker: WorkerId, reason: String },

    #[error("Worker {worker} answered with status {status}")]
    Status { worker: WorkerId, status: u16 },

    #[error("Worker {worker} sent an undecodable response: {reason}")]
    Decode { worker: WorkerId, reason: String },

    #[error("Worker {worker} did not answer within {timeout:?}")]
    WorkerTimeout { worker: WorkerId, timeout: Duration },

    #[error("Query exceeded the maximum execution time of {limit:?}")]
    Deadline { limit: Duration },

    #[error("All {attempted} workers failed to answer")]
    AllWorkersFailed { attempted: usize },

    #[error("Worker selection failed: {0}")]
    Selection(#[from] SelectionError),
}

/// Error returned by the query coordinator to its callers.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Worker selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("Upstream query failed: {0}")]
    Upstream(UpstreamQueryError),

    #[error("Query exceeded the maximum execution time of {0:?}")]
    Timeout(Duration),

    #[error("Query was cancelled by the caller")]
    Cancelled,
}

impl From<UpstreamQueryError> for SearchError {
    fn from(err: UpstreamQueryError) -> Self {
        match err {
            UpstreamQueryError::Selection(e) => SearchError::Selection(e),
            other => SearchError::Upstream(other),
        }
    }
}

impl SearchError {
    pub fn log_error(&self) {
        match self {
            SearchError::Selection(e) => {
                error!(target: "snel_search::coordinator", "Worker selection failed: {}", e);
            }
            SearchError::Upstream(e) => {
                error!(target: "snel_search::coordinator", "Upstream query failed: {}", e);
                debug!(target: "snel_search::coordinator", "Upstream error details: {:?}", e);
            }
            SearchError::Timeout(limit) => {
                warn!(target: "snel_search::coordinator", limit = ?limit, "Query timed out");
            }
            SearchError::Cancelled => {
                debug!(target: "snel_search::coordinator", "Query cancelled by caller");
            }
        }
    }
}

/// Startup validation failures of the static tool field table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolTableError {
    #[error("No result field registered for tool '{0}'")]
    MissingTool(ToolName),

    #[error("Tool '{0}' is registered more than once")]
    DuplicateTool(ToolName),
}
