use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use http_body_util::{BodyExt, BodyStream, Empty, Full};
use hyper::{Method, Request, StatusCode, header};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::engine::errors::UpstreamQueryError;
use crate::engine::search::SearchQuery;
use crate::engine::tools::WorkerResponse;
use crate::engine::types::{StreamChunk, WorkerId};

use super::traits::{ChunkStream, WorkerTransport};
use super::utf8::Utf8Carry;

const LOG_TARGET: &str = "snel_search::transport";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// Talks JSON over HTTP/1.1 to workers listed in an address book.
pub struct HttpWorkerTransport {
    query_client: Client<HttpConnector, Full<Bytes>>,
    probe_client: Client<HttpConnector, Empty<Bytes>>,
    addresses: HashMap<WorkerId, String>,
    timeout: Duration,
}

impl HttpWorkerTransport {
    pub fn new(addresses: HashMap<WorkerId, String>, timeout: Duration) -> Self {
        Self {
            query_client: Client::builder(TokioExecutor::new()).build_http(),
            probe_client: Client::builder(TokioExecutor::new()).build_http(),
            addresses,
            timeout,
        }
    }

    pub fn address_of(&self, worker: WorkerId) -> Option<&str> {
        self.addresses.get(&worker).map(String::as_str)
    }

    fn endpoint(&self, worker: WorkerId, path: &str) -> Result<String, UpstreamQueryError> {
        let base = self
            .address_of(worker)
            .ok_or(UpstreamQueryError::UnknownWorker { worker })?;
        Ok(format!("{}{}", base.trim_end_matches('/'), path))
    }

    async fn post_json(
        &self,
        worker: WorkerId,
        path: &str,
        query: &SearchQuery,
    ) -> Result<hyper::Response<hyper::body::Incoming>, UpstreamQueryError> {
        let uri = self.endpoint(worker, path)?;
        let body = serde_json::to_vec(query).map_err(|e| UpstreamQueryError::Transport {
            worker,
            reason: e.to_string(),
        })?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| UpstreamQueryError::Transport {
                worker,
                reason: e.to_string(),
            })?;

        debug!(target: LOG_TARGET, worker = %worker, uri = %uri, "Sending query to worker");

        let response = tokio::time::timeout(self.timeout, self.query_client.request(request))
            .await
            .map_err(|_| UpstreamQueryError::WorkerTimeout {
                worker,
                timeout: self.timeout,
            })?
            .map_err(|e| UpstreamQueryError::Transport {
                worker,
                reason: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            return Err(UpstreamQueryError::Status {
                worker,
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl WorkerTransport for HttpWorkerTransport {
    async fn query(
        &self,
        worker: WorkerId,
        query: &SearchQuery,
    ) -> Result<WorkerResponse, UpstreamQueryError> {
        let response = self.post_json(worker, "/query", query).await?;

        let body = tokio::time::timeout(self.timeout, response.into_body().collect())
            .await
            .map_err(|_| UpstreamQueryError::WorkerTimeout {
                worker,
                timeout: self.timeout,
            })?
            .map_err(|e| UpstreamQueryError::Transport {
                worker,
                reason: e.to_string(),
            })?
            .to_bytes();

        serde_json::from_slice(&body).map_err(|e| UpstreamQueryError::Decode {
            worker,
            reason: e.to_string(),
        })
    }

    async fn query_stream(
        &self,
        worker: WorkerId,
        query: &SearchQuery,
    ) -> Result<ChunkStream, UpstreamQueryError> {
        let response = self.post_json(worker, "/query/stream", query).await?;

        let mut carry = Utf8Carry::new();
        let frames = BodyStream::new(response.into_body())
            .map(Some)
            .chain(futures::stream::once(async { None }))
            .filter_map(move |frame| {
                let item = match frame {
                    Some(Ok(frame)) => frame
                        .into_data()
                        .ok()
                        .map(|data| carry.push(&data))
                        .filter(|text| !text.is_empty())
                        .map(Ok),
                    Some(Err(e)) => Some(Err(UpstreamQueryError::Transport {
                        worker,
                        reason: e.to_string(),
                    })),
                    None => carry.finish().map(Ok),
                };
                futures::future::ready(item)
            })
            .enumerate()
            .map(|(sequence, item)| item.map(|text| StreamChunk::new(sequence as u64, text)));

        Ok(frames.boxed())
    }

    async fn is_reachable(&self, worker: WorkerId) -> bool {
        let Ok(uri) = self.endpoint(worker, "/health") else {
            return false;
        };
        let Ok(request) = Request::builder()
            .method(Method::GET)
            .uri(&uri)
            .body(Empty::<Bytes>::new())
        else {
            return false;
        };

        match tokio::time::timeout(HEALTH_TIMEOUT, self.probe_client.request(request)).await {
            Ok(Ok(response)) => response.status().is_success(),
            Ok(Err(e)) => {
                warn!(target: LOG_TARGET, worker = %worker, error = %e, "Health probe failed");
                false
            }
            Err(_) => {
                warn!(target: LOG_TARGET, worker = %worker, "Health probe timed out");
                false
            }
        }
    }
}
