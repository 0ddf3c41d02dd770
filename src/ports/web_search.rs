//! Web Search Port - Interface for the general web search used by the
//! doctor search service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    /// Runs a query and returns at most `num_results` hits.
    async fn search(&self, query: &str, num_results: u32) -> Result<Vec<WebSearchResult>, WebSearchError>;
}

/// One hit from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

impl WebSearchResult {
    pub fn new(title: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Web search errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WebSearchError {
    #[error("web search API error: {status}")]
    Status { status: u16, body: String },

    #[error("web search authentication failed")]
    Unauthorized,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("web search timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}
