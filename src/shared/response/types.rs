use serde_json::Value;
use std::fmt;

/// HTTP-style status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalError,
    ServiceUnavailable,
}

impl StatusCode {
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalError => 500,
            StatusCode::ServiceUnavailable => 503,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalError => "Internal Server Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

impl From<StatusCode> for hyper::StatusCode {
    fn from(status: StatusCode) -> Self {
        hyper::StatusCode::from_u16(status.code()).unwrap_or(hyper::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub message: String,
    pub body: Option<Value>,
}

impl Response {
    pub fn ok_json(body: Value) -> Self {
        Self {
            status: StatusCode::Ok,
            message: "OK".to_string(),
            body: Some(body),
        }
    }

    pub fn error(code: StatusCode, message: impl ToString) -> Self {
        Self {
            status: code,
            message: message.to_string(),
            body: None,
        }
    }
}
