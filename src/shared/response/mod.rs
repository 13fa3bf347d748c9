pub mod json;
pub mod types;


pub use json::JsonRenderer;
pub use types::{Response, StatusCode};
