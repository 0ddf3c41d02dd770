//! HTTP Doctor Search - Implementation of DoctorSearch for the search-doctors service.
//!
//! ```text
//! POST {endpoint}
//! {"specialty": "Neurologist", "location": {"latitude": 12.9, "longitude": 77.6}}
//!
//! 200 {"doctors": [...]}
//! 4xx/5xx {"error": "..."}
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::doctor::Doctor;
use crate::ports::{DoctorSearch, SearchError, SearchQuery};

/// Configuration for the HTTP doctor search client.
#[derive(Debug, Clone)]
pub struct HttpDoctorSearchConfig {
    pub endpoint: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpDoctorSearchConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
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
}

/// Doctor search backed by the HTTP service.
pub struct HttpDoctorSearch {
    config: HttpDoctorSearchConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    doctors: Option<Vec<Doctor>>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpDoctorSearch {
    pub fn new(config: HttpDoctorSearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, query: &SearchQuery) -> Result<Response, SearchError> {
        let mut builder = self.client.post(&self.config.endpoint).json(query);
        if let Some(key) = &self.config.api_key {
            let key = key.expose_secret();
            builder = builder.bearer_auth(key).header("apikey", key.as_str());
        }

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                SearchError::network(format!("Connection failed: {}", e))
            } else {
                SearchError::network(e.to_string())
            }
        })
    }

    async fn parse_response(response: Response) -> Result<Vec<Doctor>, SearchError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::network(e.to_string()))?;

        let body = serde_json::from_str::<SearchBody>(&text);

        if !status.is_success() {
            return Err(match body {
                Ok(SearchBody { error: Some(message), .. }) => SearchError::service(message),
                _ if status.is_server_error() => {
                    SearchError::unavailable(format!("Server error {}: {}", status, text))
                }
                _ => SearchError::rejected(status.as_u16(), text),
            });
        }

        let body = body.map_err(|e| SearchError::parse(format!("Failed to parse response: {}", e)))?;
        if let Some(message) = body.error {
            return Err(SearchError::service(message));
        }

        Ok(body
            .doctors
            .unwrap_or_default()
            .into_iter()
            .map(Doctor::with_fallback_image)
            .collect())
    }
}

#[async_trait]
impl DoctorSearch for HttpDoctorSearch {
    async fn search(&self, query: SearchQuery) -> Result<Vec<Doctor>, SearchError> {
        tracing::debug!(specialty = %query.specialty, location = %query.location, "Searching doctors");
        let response = self.send_request(&query).await?;
        let doctors = Self::parse_response(response).await?;
        tracing::debug!(count = doctors.len(), "Doctor search returned");
        Ok(doctors)
    }
}
