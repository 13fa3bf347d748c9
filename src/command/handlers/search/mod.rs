mod coordinator;
pub mod dispatch;
pub mod merge;
mod scope;
pub mod streaming;


pub use coordinator::QueryCoordinator;
pub use merge::{MergedResultMap, ToolResultMerger};
pub use scope::ToolScope;
pub use streaming::{FramedEvent, StreamRelay};
