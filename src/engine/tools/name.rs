use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A search capability a worker can run. Serialized by its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolName {
    #[serde(rename = "Twitter Search")]
    TwitterSearch,
    #[serde(rename = "Google Search")]
    GoogleSearch,
    #[serde(rename = "Google News Search")]
    GoogleNewsSearch,
    #[serde(rename = "Google Image Search")]
    GoogleImageSearch,
    #[serde(rename = "ArXiv Search")]
    ArxivSearch,
    #[serde(rename = "Wikipedia Search")]
    WikipediaSearch,
    #[serde(rename = "Youtube Search")]
    YoutubeSearch,
    #[serde(rename = "Hacker News Search")]
    HackerNewsSearch,
    #[serde(rename = "Reddit Search")]
    RedditSearch,
}

impl ToolName {
    pub const ALL: [ToolName; 9] = [
        ToolName::TwitterSearch,
        ToolName::GoogleSearch,
        ToolName::GoogleNewsSearch,
        ToolName::GoogleImageSearch,
        ToolName::ArxivSearch,
        ToolName::WikipediaSearch,
        ToolName::YoutubeSearch,
        ToolName::HackerNewsSearch,
        ToolName::RedditSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::TwitterSearch => "Twitter Search",
            ToolName::GoogleSearch => "Google Search",
            ToolName::GoogleNewsSearch => "Google News Search",
            ToolName::GoogleImageSearch => "Google Image Search",
            ToolName::ArxivSearch => "ArXiv Search",
            ToolName::WikipediaSearch => "Wikipedia Search",
            ToolName::YoutubeSearch => "Youtube Search",
            ToolName::HackerNewsSearch => "Hacker News Search",
            ToolName::RedditSearch => "Reddit Search",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolError(pub String);

impl FromStr for ToolName {
    type Err = UnknownToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownToolError(s.to_string()))
    }
}
