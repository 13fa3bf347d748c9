mod name;
mod response;
mod result;
mod table;


pub use name::{ToolName, UnknownToolError};
pub use response::WorkerResponse;
pub use result::ToolResult;
pub use table::{ToolField, ToolFieldTable};
