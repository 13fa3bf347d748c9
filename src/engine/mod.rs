pub mod errors;
pub mod membership;
pub mod search;
pub mod selector;
pub mod tools;
pub mod transport;
pub mod types;
