use crate::command::handlers::search::QueryCoordinator;
use crate::command::handlers::search::dispatch::FanoutExecutor;
use crate::engine::tools::ToolName;
use crate::frontend::context::FrontendContext;
use crate::frontend::http::handler::handle_request;
use crate::logging::init_for_tests;
use crate::test_helpers::factories::ScriptedTransport;
use crate::test_helpers::factory::Factory;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn context(transport: ScriptedTransport) -> Arc<FrontendContext> {
    let selector = Factory::selector()
        .with_workers(&[(1, 0.9), (2, 0.5)])
        .create();
    let executor = FanoutExecutor::new(selector, Arc::new(transport), 2);
    FrontendContext::new(
        Arc::new(QueryCoordinator::new(Arc::new(executor))),
        CancellationToken::new(),
    )
}

fn request(method: Method, path: &str, body: Value) -> Request<Full<Bytes>> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

async fn body_bytes(resp: hyper::Response<crate::frontend::http::body::HttpBody>) -> Bytes {
    resp.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json(resp: hyper::Response<crate::frontend::http::body::HttpBody>) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

#[tokio::test]
async fn health_check_reports_healthy() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = handle_request(request(Method::GET, "/", json!({})), ctx)
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = handle_request(request(Method::POST, "/nope", json!({})), ctx)
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_rejects_get() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = handle_request(request(Method::GET, "/search", json!({})), ctx)
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn invalid_body_is_bad_request() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = handle_request(
        request(Method::POST, "/search/links", json!({"prompt": "p", "tools": ["Bing Search"]})),
        ctx,
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], json!(400));
}

#[tokio::test]
async fn links_without_tools_is_bad_request() {
    init_for_tests();
    let ctx = context(Factory::transport());

    let resp = handle_request(
        request(Method::POST, "/search/links/web", json!({"prompt": "p"})),
        ctx,
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_streams_framed_events() {
    init_for_tests();
    let transport = Factory::transport()
        .stream(1, vec![Ok("first\nsecond\n")])
        .stream(2, vec![Ok("first\nsecond\n")]);
    let ctx = context(transport);

    let resp = handle_request(
        request(Method::POST, "/search", json!({"prompt": "p", "tools": ["Google Search"]})),
        Arc::clone(&ctx),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );
    let text = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
    assert!(text.starts_with("data: first\n\n"));
    assert!(text.contains("data: second\n\n"));
    assert_eq!(ctx.server_state.in_flight_count(), 0);
}

#[tokio::test]
async fn search_stream_failure_ends_with_error_event() {
    init_for_tests();
    let transport = Factory::transport().fail(1, "down").fail(2, "down");
    let ctx = context(transport);

    let resp = handle_request(
        request(Method::POST, "/search", json!({"prompt": "p", "tools": ["Google Search"]})),
        ctx,
    )
    .await
    .unwrap();

    let text = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
    let payload = text
        .trim_end()
        .strip_prefix("data: ")
        .expect("one data record");
    let error: Value = serde_json::from_str(payload).unwrap();
    assert!(error["error"].as_str().unwrap().contains("down"));
}

#[tokio::test]
async fn links_twitter_only_returns_twitter() {
    init_for_tests();
    let response = Factory::worker_response()
        .with(ToolName::TwitterSearch, json!([{"id": "1"}]))
        .with(ToolName::GoogleSearch, json!([{"link": "g"}]))
        .create();
    let transport = Factory::transport()
        .respond(1, response.clone())
        .respond(2, response);
    let ctx = context(transport);

    let resp = handle_request(
        request(
            Method::POST,
            "/search/links/twitter",
            json!({"prompt": "p", "tools": ["Twitter Search", "Google Search"]}),
        ),
        ctx,
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let map = body.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["Twitter Search"], json!([{"id": "1"}, {"id": "1"}]));
}

#[tokio::test]
async fn links_web_excludes_twitter() {
    init_for_tests();
    let response = Factory::worker_response()
        .with(ToolName::TwitterSearch, json!([{"id": "1"}]))
        .with(ToolName::GoogleSearch, json!([{"link": "g"}]))
        .create();
    let transport = Factory::transport()
        .respond(1, response.clone())
        .respond(2, response);
    let ctx = context(transport);

    let resp = handle_request(
        request(
            Method::POST,
            "/search/links/web",
            json!({"prompt": "p", "tools": ["Twitter Search", "Google Search", "Reddit Search"]}),
        ),
        ctx,
    )
    .await
    .unwrap();

    let body = body_json(resp).await;
    let map = body.as_object().unwrap();
    assert!(!map.contains_key("Twitter Search"));
    assert_eq!(map["Google Search"].as_array().unwrap().len(), 2);
    assert_eq!(map["Reddit Search"], json!({}));
}

#[tokio::test]
async fn links_all_workers_failing_is_internal_error() {
    init_for_tests();
    let transport = Factory::transport().fail(1, "boom").fail(2, "boom");
    let ctx = context(transport);

    let resp = handle_request(
        request(Method::POST, "/search/links", json!({"prompt": "p", "tools": []})),
        ctx,
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await,
        json!({"status": 500, "message": "Internal Server Error"})
    );
}

#[tokio::test]
async fn requests_are_refused_while_shutting_down() {
    init_for_tests();
    let ctx = context(Factory::transport());
    ctx.server_state.signal_shutdown();

    let resp = handle_request(
        request(Method::POST, "/search/links", json!({"prompt": "p", "tools": []})),
        Arc::clone(&ctx),
    )
    .await
    .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let health = handle_request(request(Method::GET, "/", json!({})), ctx)
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}
