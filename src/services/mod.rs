//! Business logic services

pub mod cache;
pub mod extraction;
pub mod fetcher;
pub mod filters;
pub mod input;
pub mod output;
pub mod refresh;
pub mod scheduler;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult};
use fetcher::{Fetcher, HttpFetcher};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub extraction: extraction::ExtractionService,
    pub refresh: refresh::RefreshService,
}

impl Services {
    /// Create all services backed by the HTTP fetcher
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config))
    }

    /// Create all services with the given page fetcher
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, config: &AppConfig) -> Self {
        let extraction = extraction::ExtractionService::new(fetcher, config.fetch.concurrency);
        Self {
            refresh: refresh::RefreshService::new(extraction.clone(), config.catalog.clone()),
            extraction,
        }
    }
}
