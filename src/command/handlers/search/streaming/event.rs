use bytes::Bytes;
use serde_json::json;

/// One event-stream record. Failures travel as data, never as a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramedEvent {
    Data(String),
    Error(String),
}

impl FramedEvent {
    /// A blank line becomes a single space so the record is never mistaken
    /// for a keep-alive.
    pub fn data(line: &str) -> Self {
        if line.is_empty() {
            FramedEvent::Data(" ".to_string())
        } else {
            FramedEvent::Data(line.to_string())
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        FramedEvent::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FramedEvent::Error(_))
    }

    pub fn encode(&self) -> String {
        match self {
            FramedEvent::Data(line) => format!("data: {line}\n\n"),
            FramedEvent::Error(message) => {
                format!("data: {}\n\n", json!({ "error": message }))
            }
        }
    }

    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.encode())
    }
}
