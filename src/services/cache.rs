//! JSON cache of the last extracted entries

use std::path::Path;

use crate::error::AppResult;
use crate::models::CatalogEntry;

/// Write entries as an indented UTF-8 JSON array, creating parent directories
pub async fn save(path: &Path, entries: &[CatalogEntry]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(entries)?;
    tokio::fs::write(path, json).await?;

    tracing::info!("Saved {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Read entries written by [`save`]
pub async fn load(path: &Path) -> AppResult<Vec<CatalogEntry>> {
    let data = tokio::fs::read(path).await?;
    let entries: Vec<CatalogEntry> = serde_json::from_slice(&data)?;

    tracing::debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
