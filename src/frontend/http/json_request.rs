use serde::Deserialize;

use crate::engine::search::{DateFilter, Model, ResponseOrder, SearchQuery};
use crate::engine::tools::ToolName;

/// Body of `POST /search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub prompt: String,
    pub tools: Vec<ToolName>,
    #[serde(default)]
    pub response_order: ResponseOrder,
    #[serde(default)]
    pub date_filter: DateFilter,
    #[serde(default)]
    pub model: Model,
}

impl From<SearchRequest> for SearchQuery {
    fn from(req: SearchRequest) -> Self {
        SearchQuery::new(req.prompt, req.tools)
            .with_model(req.model)
            .with_date_filter(req.date_filter)
            .with_response_order(req.response_order)
    }
}

/// Body of the `POST /search/links*` family.
#[derive(Debug, Deserialize)]
pub struct LinksSearchRequest {
    pub prompt: String,
    pub tools: Vec<ToolName>,
    #[serde(default)]
    pub model: Model,
}

impl From<LinksSearchRequest> for SearchQuery {
    fn from(req: LinksSearchRequest) -> Self {
        SearchQuery::new(req.prompt, req.tools).with_model(req.model)
    }
}
