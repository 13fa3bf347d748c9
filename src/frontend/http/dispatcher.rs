use futures::StreamExt;
use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::command::handlers::search::ToolScope;
use crate::engine::errors::SearchError;
use crate::engine::search::SearchQuery;
use crate::frontend::context::FrontendContext;
use crate::frontend::http::body::{HttpBody, error_response, event_stream, json_response};
use crate::frontend::http::json_request::{LinksSearchRequest, SearchRequest};
use crate::shared::response::{Response as ResponseType, StatusCode};

const LOG_TARGET: &str = "snel_search::http";

/// `POST /search`: relays one worker's answer as server-sent events.
pub async fn handle_search<B>(
    req: Request<B>,
    ctx: Arc<FrontendContext>,
) -> Result<Response<HttpBody>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    if req.method() != Method::POST {
        return Ok(method_not_allowed());
    }

    let request: SearchRequest = match read_json(req).await {
        Ok(request) => request,
        Err(resp) => return Ok(resp),
    };
    let query = SearchQuery::from(request);
    info!(
        target: LOG_TARGET,
        tools = ?query.tools,
        model = ?query.model,
        "Streaming search request"
    );

    // Dropping the body (client gone) cancels the query through the guard.
    let cancel = ctx.shutdown.child_token();
    let cancel_on_drop = cancel.clone().drop_guard();
    let in_flight = ctx.server_state.track();

    let frames = ctx.coordinator.stream(query, cancel).map(move |event| {
        let _held = (&cancel_on_drop, &in_flight);
        event.into_bytes()
    });

    Ok(event_stream(frames))
}

/// `POST /search/links*`: merges every drawn worker's answer per tool.
pub async fn handle_links<B>(
    req: Request<B>,
    ctx: Arc<FrontendContext>,
    scope: ToolScope,
) -> Result<Response<HttpBody>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    if req.method() != Method::POST {
        return Ok(method_not_allowed());
    }

    let request: LinksSearchRequest = match read_json(req).await {
        Ok(request) => request,
        Err(resp) => return Ok(resp),
    };
    let query = SearchQuery::from(request);
    info!(
        target: LOG_TARGET,
        scope = ?scope,
        tools = ?query.tools,
        model = ?query.model,
        "Links search request"
    );

    let _in_flight = ctx.server_state.track();
    let cancel = ctx.shutdown.child_token();

    match ctx.coordinator.aggregate(&query, scope, &cancel).await {
        Ok(merged) => match serde_json::to_value(&merged) {
            Ok(body) => Ok(json_response(&ResponseType::ok_json(body))),
            Err(e) => {
                warn!(target: LOG_TARGET, error = %e, "Failed to encode merged results");
                Ok(internal_error())
            }
        },
        Err(SearchError::Cancelled) => {
            debug!(target: LOG_TARGET, "Links search cancelled");
            Ok(error_response(
                StatusCode::ServiceUnavailable,
                "Server is shutting down",
            ))
        }
        Err(e) => {
            e.log_error();
            Ok(internal_error())
        }
    }
}

async fn read_json<B, T>(req: Request<B>) -> Result<T, Response<HttpBody>>
where
    B: Body,
    B::Error: Display,
    T: DeserializeOwned,
{
    let body: Bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(target: LOG_TARGET, error = %e, "Failed to read request body");
            return Err(error_response(
                StatusCode::BadRequest,
                "Failed to read request body",
            ));
        }
    };

    serde_json::from_slice::<T>(&body).map_err(|e| {
        debug!(target: LOG_TARGET, error = %e, "Rejected search request");
        error_response(
            StatusCode::BadRequest,
            format!("Invalid search request: {e}"),
        )
    })
}

fn method_not_allowed() -> Response<HttpBody> {
    error_response(StatusCode::MethodNotAllowed, "Method Not Allowed")
}

fn internal_error() -> Response<HttpBody> {
    error_response(StatusCode::InternalError, "Internal Server Error")
}
