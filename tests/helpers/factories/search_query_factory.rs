use crate::engine::search::{Model, SearchQuery};
use crate::engine::tools::ToolName;

pub struct SearchQueryFactory {
    inner: SearchQuery,
}

impl SearchQueryFactory {
    pub fn new() -> Self {
        Self {
            inner: SearchQuery::new(
                "What are the recent sport events?",
                vec![ToolName::GoogleSearch, ToolName::TwitterSearch],
            ),
        }
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.inner.prompt = prompt.to_string();
        self
    }

    pub fn with_tools(mut self, tools: &[ToolName]) -> Self {
        self.inner.tools = tools.to_vec();
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.inner.model = model;
        self
    }

    pub fn create(self) -> SearchQuery {
        self.inner
    }
}
