use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Final structured answer of one worker. Every tool has its own result field;
/// fields a worker did not fill stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerResponse {
    pub miner_tweets: Option<Value>,
    pub search_results: Option<Value>,
    pub google_news_search_results: Option<Value>,
    pub google_image_search_results: Option<Value>,
    pub arxiv_search_results: Option<Value>,
    pub wikipedia_search_results: Option<Value>,
    pub youtube_search_results: Option<Value>,
    pub hacker_news_search_results: Option<Value>,
    pub reddit_search_results: Option<Value>,
}
