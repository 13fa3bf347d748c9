pub mod options;
pub mod query;


pub use options::{DateFilter, Model, ResponseOrder};
pub use query::SearchQuery;
