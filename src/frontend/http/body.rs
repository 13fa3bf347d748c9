use bytes::Bytes;
use futures::{Stream, StreamExt};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::Frame;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use std::convert::Infallible;

use crate::shared::response::{JsonRenderer, Response as ResponseType, StatusCode as ResponseStatus};

pub type HttpBody = UnsyncBoxBody<Bytes, Infallible>;

pub fn full(bytes: impl Into<Bytes>) -> HttpBody {
    Full::new(bytes.into()).boxed_unsync()
}

pub fn json_response(response: &ResponseType) -> Response<HttpBody> {
    let body = JsonRenderer.render(response);
    let mut resp = Response::new(full(body));
    *resp.status_mut() = StatusCode::from(response.status);
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    resp
}

pub fn error_response(status: ResponseStatus, message: impl ToString) -> Response<HttpBody> {
    json_response(&ResponseType::error(status, message))
}

/// Server-sent events response over an already framed byte stream.
pub fn event_stream<S>(frames: S) -> Response<HttpBody>
where
    S: Stream<Item = Bytes> + Send + 'static,
{
    let body = StreamBody::new(frames.map(|bytes| Ok::<_, Infallible>(Frame::data(bytes))));
    let mut resp = Response::new(BodyExt::boxed_unsync(body));
    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    resp
}
