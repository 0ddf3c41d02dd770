//! Travily Web Search - Implementation of WebSearchProvider for the Travily API.
//!
//! ```text
//! POST https://api.travily.dev/search/web
//! Authorization: Bearer <key>
//! {"query": "...", "num_results": 5}
//!
//! 200 {"results": [{"title": "...", "description": "...", "url": "..."}]}
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{WebSearchError, WebSearchProvider, WebSearchResult};

/// Default Travily search endpoint.
pub const TRAVILY_SEARCH_URL: &str = "https://api.travily.dev/search/web";

#[derive(Debug, Clone)]
pub struct TravilyConfig {
    pub endpoint: String,
    api_key: Secret<String>,
    pub timeout: Duration,
}

impl TravilyConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            endpoint: TRAVILY_SEARCH_URL.to_string(),
            api_key,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct TravilyRequest<'a> {
    query: &'a str,
    num_results: u32,
}

#[derive(Debug, Deserialize)]
struct TravilyResponse {
    results: Vec<WebSearchResult>,
}

pub struct TravilyWebSearch {
    config: TravilyConfig,
    client: Client,
}

impl TravilyWebSearch {
    pub fn new(config: TravilyConfig) -> Result<Self, WebSearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WebSearchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl WebSearchProvider for TravilyWebSearch {
    async fn search(&self, query: &str, num_results: u32) -> Result<Vec<WebSearchResult>, WebSearchError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&TravilyRequest { query, num_results })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WebSearchError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    WebSearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Travily API error");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WebSearchError::Unauthorized,
                s => WebSearchError::Status {
                    status: s.as_u16(),
                    body,
                },
            });
        }

        let parsed: TravilyResponse = response
            .json()
            .await
            .map_err(|e| WebSearchError::Parse(format!("Failed to parse Travily response: {}", e)))?;

        Ok(parsed.results)
    }
}
