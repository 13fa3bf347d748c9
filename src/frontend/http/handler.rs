use hyper::body::Body;
use hyper::{Method, Request, Response};
use serde_json::json;
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;

use crate::command::handlers::search::ToolScope;
use crate::engine::tools::ToolName;
use crate::frontend::context::FrontendContext;
use crate::frontend::http::body::{HttpBody, error_response, json_response};
use crate::shared::response::{Response as ResponseType, StatusCode};

use super::dispatcher::{handle_links, handle_search};

struct HttpHandler {
    ctx: Arc<FrontendContext>,
}

impl HttpHandler {
    fn new(ctx: Arc<FrontendContext>) -> Self {
        Self { ctx }
    }

    fn health() -> Response<HttpBody> {
        json_response(&ResponseType::ok_json(json!({"status": "healthy"})))
    }

    fn not_found() -> Response<HttpBody> {
        error_response(StatusCode::NotFound, "Not Found")
    }

    async fn handle<B>(&self, req: Request<B>) -> Result<Response<HttpBody>, Infallible>
    where
        B: Body,
        B::Error: Display,
    {
        let path = req.uri().path().to_string();

        // Health checks keep answering while draining
        if path != "/" && self.ctx.server_state.is_shutting_down() {
            return Ok(error_response(
                StatusCode::ServiceUnavailable,
                "Server is shutting down",
            ));
        }

        let ctx = Arc::clone(&self.ctx);
        match path.as_str() {
            "/" if req.method() == Method::GET => Ok(Self::health()),
            "/" => Ok(error_response(StatusCode::MethodNotAllowed, "Method Not Allowed")),
            "/search" => handle_search(req, ctx).await,
            "/search/links" => handle_links(req, ctx, ToolScope::All).await,
            "/search/links/web" => {
                handle_links(req, ctx, ToolScope::AllExcept(ToolName::TwitterSearch)).await
            }
            "/search/links/twitter" => {
                handle_links(req, ctx, ToolScope::Only(ToolName::TwitterSearch)).await
            }
            _ => Ok(Self::not_found()),
        }
    }
}

pub async fn handle_request<B>(
    req: Request<B>,
    ctx: Arc<FrontendContext>,
) -> Result<Response<HttpBody>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    HttpHandler::new(ctx).handle(req).await
}
