//! Analyze API client

use axum::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{AnalyzeRequest, ReviewRecord};

/// Body of a `/analyze` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    /// Any object with an `error` field
    Error { error: String },
    Reviews(Vec<ReviewRecord>),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait AnalyzeApi: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<AnalyzeResponse, ClientError>;
}

/// Talks to a running server over HTTP
pub struct HttpAnalyzeClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAnalyzeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }
}

#[async_trait]
impl AnalyzeApi for HttpAnalyzeClient {
    async fn analyze(&self, url: &str) -> Result<AnalyzeResponse, ClientError> {
        let response = self.http_client
            .post(self.endpoint())
            .json(&AnalyzeRequest::new(url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        // error statuses still carry a JSON body worth showing
        let status = response.status();
        let body = response.text().await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        tracing::debug!("POST {} -> {}", self.endpoint(), status);

        parse_response(&body)
    }
}

pub fn parse_response(body: &str) -> Result<AnalyzeResponse, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))
}
