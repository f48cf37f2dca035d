//! Report refresh: input file -> batch extraction -> cache -> published state

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::{cache, extraction::ExtractionService, filters, input};
use crate::config::CatalogConfig;
use crate::error::AppResult;
use crate::models::{BatchOutcome, RefreshState, RefreshSummary};

#[derive(Clone)]
pub struct RefreshService {
    extraction: ExtractionService,
    catalog: CatalogConfig,
    state: Arc<RwLock<Option<RefreshState>>>,
    running: Arc<Mutex<()>>,
}

impl RefreshService {
    pub fn new(extraction: ExtractionService, catalog: CatalogConfig) -> Self {
        Self {
            extraction,
            catalog,
            state: Arc::new(RwLock::new(None)),
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Publish the cached entries, if a cache file exists.
    ///
    /// Returns whether a state was loaded.
    pub async fn seed_from_cache(&self) -> AppResult<bool> {
        let path = &self.catalog.cache_file;
        let Ok(metadata) = tokio::fs::metadata(path).await else {
            tracing::debug!("No cache at {}", path.display());
            return Ok(false);
        };

        let entries = cache::load(path).await?;
        let refreshed_at = metadata
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());

        tracing::info!("Seeded {} entries from cache {}", entries.len(), path.display());
        *self.state.write().await = Some(RefreshState {
            refreshed_at,
            id_count: entries.len(),
            entries,
            failures: Vec::new(),
        });
        Ok(true)
    }

    /// Re-extract every identifier of the input file and publish the result.
    ///
    /// Concurrent calls are serialised; the cache is written before the new
    /// state becomes visible.
    pub async fn refresh(&self) -> AppResult<RefreshSummary> {
        let _guard = self.running.lock().await;
        tracing::info!("Refresh started");

        let lines = input::load_input(&self.catalog.input_file).await?;
        let ids: Vec<String> = lines.iter().map(|line| line.id.clone()).collect();
        let descriptions: HashMap<&str, &str> = lines
            .iter()
            .filter_map(|line| Some((line.id.as_str(), line.description.as_deref()?)))
            .collect();

        let mut outcome: BatchOutcome = self.extraction.run_batch(&ids).await.into_iter().collect();
        for entry in &mut outcome.entries {
            entry.catalog_url = Some(entry.library.catalog_url(&entry.id));
            entry.user_description = descriptions.get(entry.id.as_str()).map(|d| d.to_string());
        }

        cache::save(&self.catalog.cache_file, &outcome.entries).await?;

        let state = RefreshState {
            refreshed_at: Local::now(),
            id_count: ids.len(),
            entries: outcome.entries,
            failures: outcome.failures,
        };
        let summary = RefreshSummary::from(&state);
        *self.state.write().await = Some(state);

        tracing::info!(
            "Refresh finished: {} of {} identifiers extracted",
            summary.entries,
            summary.id_count
        );
        Ok(summary)
    }

    /// Run `f` against the published state, if any
    pub async fn with_state<R>(&self, f: impl FnOnce(&RefreshState) -> R) -> Option<R> {
        self.state.read().await.as_ref().map(f)
    }

    /// Distinct libraries of the published entries, configured ones first
    pub async fn libraries(&self) -> Vec<String> {
        let mine = self.catalog.my_libraries();
        self.with_state(|state| {
            filters::order_libraries(&filters::collect_libraries(&state.entries), &mine)
        })
        .await
        .unwrap_or_default()
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    pub async fn read_input(&self) -> AppResult<String> {
        input::read_input_text(&self.catalog.input_file).await
    }

    pub async fn save_input(&self, content: &str) -> AppResult<()> {
        input::save_input_text(&self.catalog.input_file, content).await?;
        tracing::info!("Saved input file {}", self.catalog.input_file.display());
        Ok(())
    }
}
