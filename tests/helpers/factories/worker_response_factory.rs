use crate::engine::tools::{ToolName, WorkerResponse};
use serde_json::{Value, json};

pub struct WorkerResponseFactory {
    inner: WorkerResponse,
}

impl WorkerResponseFactory {
    pub fn new() -> Self {
        Self {
            inner: WorkerResponse::default(),
        }
    }

    pub fn with(mut self, tool: ToolName, value: impl Into<Value>) -> Self {
        let value = Some(value.into());
        match tool {
            ToolName::TwitterSearch => self.inner.miner_tweets = value,
            ToolName::GoogleSearch => self.inner.search_results = value,
            ToolName::GoogleNewsSearch => self.inner.google_news_search_results = value,
            ToolName::GoogleImageSearch => self.inner.google_image_search_results = value,
            ToolName::ArxivSearch => self.inner.arxiv_search_results = value,
            ToolName::WikipediaSearch => self.inner.wikipedia_search_results = value,
            ToolName::YoutubeSearch => self.inner.youtube_search_results = value,
            ToolName::HackerNewsSearch => self.inner.hacker_news_search_results = value,
            ToolName::RedditSearch => self.inner.reddit_search_results = value,
        }
        self
    }

    /// Fills `tool` with `count` link items tagged with `source`.
    pub fn with_links(self, tool: ToolName, source: &str, count: usize) -> Self {
        let links: Vec<Value> = (0..count)
            .map(|i| json!({ "link": format!("https://{source}.example/{i}") }))
            .collect();
        self.with(tool, Value::Array(links))
    }

    pub fn create(self) -> WorkerResponse {
        self.inner
    }
}
