//! HTTP AI Responder - Implementation of AIResponder for the hosted chat function.
//!
//! # Wire format
//!
//! ```text
//! POST {endpoint}
//! {"message": "...", "conversation": [{"text": "...", "sender": "user"}]}
//!
//! 200 {"response": "..."}
//! ```
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpAIResponderConfig::new("https://assistant.example/functions/v1/ai-chat")
//!     .with_api_key(key)
//!     .with_max_retries(2);
//!
//! let responder = HttpAIResponder::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIRequest, AIResponder};

/// Configuration for the HTTP responder.
#[derive(Debug, Clone)]
pub struct HttpAIResponderConfig {
    /// Full URL of the chat endpoint.
    pub endpoint: String,
    /// Optional key, sent as bearer token and `apikey` header.
    api_key: Option<Secret<String>>,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt for retryable failures.
    pub max_retries: u32,
    /// First backoff delay; doubles on each retry.
    pub backoff_base: Duration,
}

impl HttpAIResponderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_retries: 2,
            backoff_base: Duration::from_secs(1),
        }
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// AI responder backed by an HTTP endpoint.
pub struct HttpAIResponder {
    config: HttpAIResponderConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpAIResponder {
    /// Creates a responder with its own HTTP client.
    pub fn new(config: HttpAIResponderConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, request: &AIRequest) -> Result<Response, AIError> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = self.config.api_key() {
            builder = builder.bearer_auth(key).header("apikey", key);
        }

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AIError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                AIError::network(format!("Connection failed: {}", e))
            } else {
                AIError::network(e.to_string())
            }
        })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = Self::retry_after(&response);
        let error_body = response.text().await.unwrap_or_default();

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AIError::AuthenticationFailed,
            StatusCode::TOO_MANY_REQUESTS => AIError::rate_limited(retry_after),
            s if s.is_server_error() => {
                AIError::unavailable(format!("Server error {}: {}", s, error_body))
            }
            s => AIError::rejected(s.as_u16(), error_body),
        })
    }

    /// Seconds from a `Retry-After` header, defaulting to 30.
    fn retry_after(response: &Response) -> u32 {
        response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(30)
    }

    async fn parse_response(&self, response: Response) -> Result<String, AIError> {
        let status = response.status().as_u16();
        let body: ReplyBody = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.error {
            return Err(AIError::rejected(status, error));
        }

        match body.response {
            Some(reply) if !reply.trim().is_empty() => Ok(reply),
            _ => Err(AIError::parse("Empty response from AI service")),
        }
    }

    async fn attempt(&self, request: &AIRequest) -> Result<String, AIError> {
        let response = self.send_request(request).await?;
        let response = self.handle_response_status(response).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl AIResponder for HttpAIResponder {
    async fn respond(&self, request: AIRequest) -> Result<String, AIError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(&request).await {
                Ok(reply) => return Ok(reply),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(error = %err, attempt = retry_count + 1, "AI request failed, retrying");
                }
            }

            sleep(backoff_delay(self.config.backoff_base, retry_count)).await;
            retry_count += 1;
        }
    }
}

/// `base * 2^retry`, saturating instead of overflowing.
fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}
