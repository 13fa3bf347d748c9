use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::engine::errors::UpstreamQueryError;
use crate::engine::transport::ChunkStream;

const LOG_TARGET: &str = "snel_search::relay";

/// Bounds a chunk stream by a deadline and a cancellation token.
///
/// Running past `limit` yields one `Deadline` error and ends the stream;
/// cancellation ends it silently and drops the producer.
pub fn guard_execution(
    chunks: ChunkStream,
    limit: Duration,
    cancel: CancellationToken,
) -> ChunkStream {
    let deadline = Instant::now() + limit;

    stream::unfold(Some((chunks, cancel)), move |state| async move {
        let (mut chunks, cancel) = state?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(target: LOG_TARGET, "Stream cancelled by caller");
                None
            }
            next = timeout_at(deadline, chunks.next()) => match next {
                Ok(Some(item)) => Some((item, Some((chunks, cancel)))),
                Ok(None) => None,
                Err(_) => {
                    warn!(target: LOG_TARGET, limit = ?limit, "Stream exceeded maximum execution time");
                    Some((Err(UpstreamQueryError::Deadline { limit }), None))
                }
            },
        }
    })
    .boxed()
}
