//! Record page transport

use async_trait::async_trait;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::{AppError, AppResult, ExtractionError, ExtractionResult};

/// Fetches raw markup for a URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> ExtractionResult<String>;
}

/// Plain HTTP GET fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ExtractionResult<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractionError::Fetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Fetch(format!("HTTP {} for {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| ExtractionError::Fetch(format!("failed to read body of {}: {}", url, e)))
    }
}
