use serde::Serialize;

use crate::shared::response::types::Response;

pub struct JsonRenderer;

#[derive(Serialize)]
struct ErrorResponse<'a> {
    status: u16,
    message: &'a str,
}

impl JsonRenderer {
    /// Successful bodies are rendered as-is; failures as `{status, message}`.
    pub fn render(&self, response: &Response) -> Vec<u8> {
        match &response.body {
            Some(body) => serde_json::to_vec(body).unwrap_or_default(),
            None => serde_json::to_vec(&ErrorResponse {
                status: response.status.code(),
                message: &response.message,
            })
            .unwrap_or_default(),
        }
    }
}
