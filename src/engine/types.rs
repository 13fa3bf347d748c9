use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle of a remote worker node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WorkerId {
    fn from(id: u32) -> Self {
        WorkerId(id)
    }
}

/// A worker together with its externally computed rank (higher is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub rank: f64,
}

impl WorkerRecord {
    pub fn new(id: WorkerId, rank: f64) -> Self {
        Self { id, rank }
    }
}

/// One fragment of streamed output, numbered in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    pub sequence: u64,
    pub text: String,
}

impl StreamChunk {
    pub fn new(sequence: u64, text: impl Into<String>) -> Self {
        Self {
            sequence,
            text: text.into(),
        }
    }
}
