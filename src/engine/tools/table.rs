use serde_json::Value;
use std::collections::HashSet;
use tracing::info;

use crate::engine::errors::ToolTableError;

use super::name::ToolName;
use super::response::WorkerResponse;

type Accessor = fn(&WorkerResponse) -> Option<&Value>;

/// Binds a tool to the worker response field that carries its results.
pub struct ToolField {
    pub tool: ToolName,
    pub field: &'static str,
    pub(crate) accessor: Accessor,
}

impl ToolField {
    pub fn extract<'a>(&self, response: &'a WorkerResponse) -> Option<&'a Value> {
        (self.accessor)(response)
    }
}

static TOOL_FIELDS: [ToolField; 9] = [
    ToolField {
        tool: ToolName::TwitterSearch,
        field: "miner_tweets",
        accessor: |r| r.miner_tweets.as_ref(),
    },
    ToolField {
        tool: ToolName::GoogleSearch,
        field: "search_results",
        accessor: |r| r.search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::GoogleNewsSearch,
        field: "google_news_search_results",
        accessor: |r| r.google_news_search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::GoogleImageSearch,
        field: "google_image_search_results",
        accessor: |r| r.google_image_search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::ArxivSearch,
        field: "arxiv_search_results",
        accessor: |r| r.arxiv_search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::WikipediaSearch,
        field: "wikipedia_search_results",
        accessor: |r| r.wikipedia_search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::YoutubeSearch,
        field: "youtube_search_results",
        accessor: |r| r.youtube_search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::HackerNewsSearch,
        field: "hacker_news_search_results",
        accessor: |r| r.hacker_news_search_results.as_ref(),
    },
    ToolField {
        tool: ToolName::RedditSearch,
        field: "reddit_search_results",
        accessor: |r| r.reddit_search_results.as_ref(),
    },
];

/// Static tool → response field table.
pub struct ToolFieldTable {
    fields: &'static [ToolField],
}

impl ToolFieldTable {
    pub fn global() -> Self {
        Self {
            fields: &TOOL_FIELDS,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_fields(fields: &'static [ToolField]) -> Self {
        Self { fields }
    }

    pub fn lookup(&self, tool: ToolName) -> Option<&'static ToolField> {
        self.fields.iter().find(|entry| entry.tool == tool)
    }

    pub fn fields(&self) -> &'static [ToolField] {
        self.fields
    }

    /// Every known tool must map to exactly one field. Called once at startup.
    pub fn validate(&self) -> Result<(), ToolTableError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for entry in self.fields {
            if !seen.insert(entry.tool) {
                return Err(ToolTableError::DuplicateTool(entry.tool));
            }
        }

        if let Some(missing) = ToolName::ALL.iter().find(|tool| !seen.contains(*tool)) {
            return Err(ToolTableError::MissingTool(*missing));
        }

        info!(
            target: "snel_search::tools",
            tools = self.fields.len(),
            "Tool field table validated"
        );
        Ok(())
    }
}
