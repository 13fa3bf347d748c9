pub mod scripted_transport;
pub mod search_query_factory;
pub mod selector_factory;
pub mod worker_response_factory;

pub use scripted_transport::ScriptedTransport;
pub use search_query_factory::SearchQueryFactory;
pub use selector_factory::SelectorFactory;
pub use worker_response_factory::WorkerResponseFactory;
