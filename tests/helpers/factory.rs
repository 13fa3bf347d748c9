pub use super::factories::{
    ScriptedTransport, SearchQueryFactory, SelectorFactory, WorkerResponseFactory,
};

pub struct Factory;

impl Factory {
    pub fn worker_response() -> WorkerResponseFactory {
        WorkerResponseFactory::new()
    }

    pub fn search_query() -> SearchQueryFactory {
        SearchQueryFactory::new()
    }

    pub fn selector() -> SelectorFactory {
        SelectorFactory::new()
    }

    pub fn transport() -> ScriptedTransport {
        ScriptedTransport::new()
    }
}
