pub mod http;
pub mod traits;
mod utf8;


pub use http::HttpWorkerTransport;
pub use traits::{ChunkStream, WorkerTransport};
