//! Batch extraction: identifier -> library -> fetch -> entry
//!
//! Identifiers are processed independently on the runtime, bounded by a
//! semaphore. Task handles are awaited in input order so the results line up
//! with the identifiers regardless of which fetch finishes first.

use std::sync::Arc;
use tokio::sync::Semaphore;

use super::fetcher::Fetcher;
use crate::error::{ExtractionError, ExtractionResult};
use crate::models::{CatalogEntry, ExtractionFailure};
use crate::sources;

#[derive(Clone)]
pub struct ExtractionService {
    fetcher: Arc<dyn Fetcher>,
    concurrency: usize,
}

impl ExtractionService {
    pub fn new(fetcher: Arc<dyn Fetcher>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Route, fetch and extract a single identifier
    pub async fn extract_one(&self, identifier: &str) -> ExtractionResult<CatalogEntry> {
        let library = sources::route(identifier)?;
        let id = library.normalize_id(identifier);
        let url = library.catalog_url(&id);

        let markup = self.fetcher.fetch(&url).await?;
        let entry = library.extract(&id, &markup)?;

        tracing::debug!(
            "Extracted {} from {}: {} holdings",
            id,
            library,
            entry.holdings.len()
        );
        Ok(entry)
    }

    /// Extract every identifier; one result per identifier, in input order
    pub async fn run_batch(
        &self,
        identifiers: &[String],
    ) -> Vec<Result<CatalogEntry, ExtractionFailure>> {
        tracing::info!(
            "Extracting {} identifiers (concurrency {})",
            identifiers.len(),
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let handles: Vec<_> = identifiers
            .iter()
            .cloned()
            .map(|identifier| {
                let service = self.clone();
                let sem = semaphore.clone();
                tokio::spawn(async move {
                    let _permit = sem.acquire().await.ok();
                    service.extract_one(&identifier).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (identifier, handle) in identifiers.iter().zip(handles) {
            let result = handle.await.unwrap_or_else(|e| {
                Err(ExtractionError::StructuralParse(format!(
                    "extraction task aborted: {}",
                    e
                )))
            });

            results.push(result.map_err(|e| {
                tracing::warn!("Skipping {}: {}", identifier, e);
                ExtractionFailure::new(identifier.as_str(), &e)
            }));
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            "Extraction finished: {} entries, {} failures",
            results.len() - failed,
            failed
        );
        results
    }
}
