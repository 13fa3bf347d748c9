mod tool_merger;


pub use tool_merger::{MergedResultMap, ToolResultMerger};
