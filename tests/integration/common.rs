//! Shared fixtures

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bibchecker::{
    config::AppConfig,
    error::{ExtractionError, ExtractionResult},
    models::Library,
    services::{fetcher::Fetcher, Services},
    AppState,
};

pub const STUTTGART_PAGE: &str = r#"<html><body>
<table class="gi">
  <tr><th>Titel</th><td class="spalterechts">Der Hobbit / J.R.R. Tolkien</td></tr>
  <tr><th>Verfasser</th><td class="spalterechts">Tolkien, J.R.R.</td></tr>
</table>
<table class="rTable_table">
  <thead><tr><th>Bibliothek</th><th>Standort</th><th>Signatur</th><th>Bestellmöglichkeit</th><th>Verfügbarkeit</th><th>Reservierung</th></tr></thead>
  <tbody>
    <tr><td>Ost</td><td>Kinder</td><td>Tol</td><td>Bestellen</td><td>Verfügbar</td><td></td></tr>
    <tr><td>Feuerbach</td><td>Erw.</td><td>Tol</td><td>Bestellen</td><td>Ausgeliehen bis 01.01.</td><td>1 Vormerkung</td></tr>
  </tbody>
</table>
</body></html>"#;

pub const STUTTGART_BAD_HEADER_PAGE: &str = r#"<table class="rTable_table">
  <thead><tr><th>Bibliothek</th><th>Mediennummer</th></tr></thead>
  <tbody><tr><td>Ost</td><td>123</td></tr></tbody>
</table>"#;

pub const REMSECK_PAGE: &str = r#"<html><body><div id="catalogue_detail_biblio">
<h1 class="title">Krabat / Otfried Preußler</h1>
<table id="holdingst"><tbody>
  <tr>
    <td class="location"><a class="library_info">Mediathek im KUBUS</a><span class="shelvingloc">Jugend</span></td>
    <td class="call_no">J Pre</td>
    <td class="status"><span class="item-status">Verfügbar</span></td>
    <td class="date_due"></td>
  </tr>
</tbody></table>
</div></body></html>"#;

/// Serves canned markup keyed by canonical identifier
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn with_page(mut self, library: Library, id: &str, markup: &str) -> Self {
        self.pages.insert(library.catalog_url(id), markup.to_string());
        self
    }

    pub fn standard() -> Self {
        Self::default()
            .with_page(Library::Stuttgart, "SAK00119197", STUTTGART_PAGE)
            .with_page(Library::Stuttgart, "SAK00000001", STUTTGART_BAD_HEADER_PAGE)
            .with_page(Library::Remseck, "1234567", REMSECK_PAGE)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> ExtractionResult<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ExtractionError::Fetch(format!("HTTP 404 Not Found for {}", url)))
    }
}

/// A fresh scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bibchecker-it-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Config pointing input and cache into `dir`
pub fn config_in(dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.catalog.input_file = dir.join("ids.txt");
    config.catalog.cache_file = dir.join("out").join("cache.json");
    config.catalog.my_libraries = "Ost,Mediathek im KUBUS".to_string();
    config.fetch.concurrency = 2;
    config
}

pub fn app_state(config: AppConfig) -> AppState {
    let services = Services::with_fetcher(Arc::new(StaticFetcher::standard()), &config);
    AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    }
}
