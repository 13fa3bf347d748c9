use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::engine::tools::ToolName;

use super::options::{DateFilter, Model, ResponseOrder};

/// Query descriptor handed to the coordinator and forwarded to workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub prompt: String,
    pub tools: Vec<ToolName>,
    #[serde(default)]
    pub model: Model,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<DateFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_order: Option<ResponseOrder>,
}

impl SearchQuery {
    pub fn new(prompt: impl Into<String>, tools: Vec<ToolName>) -> Self {
        Self {
            prompt: prompt.into(),
            tools,
            model: Model::default(),
            date_filter: None,
            response_order: None,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_date_filter(mut self, date_filter: DateFilter) -> Self {
        self.date_filter = Some(date_filter);
        self
    }

    pub fn with_response_order(mut self, response_order: ResponseOrder) -> Self {
        self.response_order = Some(response_order);
        self
    }

    /// Same query restricted to another tool list.
    pub fn with_tools(&self, tools: Vec<ToolName>) -> Self {
        Self {
            tools,
            ..self.clone()
        }
    }

    pub fn max_execution_time(&self) -> Duration {
        self.model.max_execution_time()
    }
}
