//! Configuration management for Bibchecker

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Branches checked by default when no library list is configured
pub const DEFAULT_MY_LIBRARIES: &str = "Bad Cannstatt,Feuerbach,Freiberg,Neugereut,Ost,Stadtbibliothek am Mailänder Platz,Zuffenhausen,Mediathek im KUBUS";

/// Daily refresh time used when `catalog.refresh_time` cannot be parsed
pub const DEFAULT_REFRESH_TIME: (u32, u32) = (4, 0);

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Maximum number of record pages fetched at the same time
    pub concurrency: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// One identifier per line, optionally followed by a description
    pub input_file: PathBuf,
    pub cache_file: PathBuf,
    /// Comma-separated library display names
    pub my_libraries: String,
    /// Local time of the daily refresh, `HH:MM`
    pub refresh_time: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BIBCHECKER__, e.g. BIBCHECKER__FETCH__CONCURRENCY)
            .add_source(
                Environment::with_prefix("BIBCHECKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("catalog.input_file", env::var("BIB_INPUT_FILE").ok())?
            .set_override_option("catalog.cache_file", env::var("BIB_CACHE_FILE").ok())?
            .set_override_option("catalog.my_libraries", env::var("BIBCHECKER_MYBIBS").ok())?
            .set_override_option(
                "catalog.refresh_time",
                env::var("BIBCHECKER_REFRESH_TIME").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl CatalogConfig {
    /// Configured library names, trimmed, blanks removed
    pub fn my_libraries(&self) -> Vec<String> {
        split_libraries(&self.my_libraries)
    }

    /// Daily refresh time as `(hour, minute)`
    pub fn refresh_time(&self) -> (u32, u32) {
        parse_refresh_time(&self.refresh_time).unwrap_or_else(|| {
            tracing::warn!(
                "Invalid refresh time '{}', falling back to {:02}:{:02}",
                self.refresh_time,
                DEFAULT_REFRESH_TIME.0,
                DEFAULT_REFRESH_TIME.1
            );
            DEFAULT_REFRESH_TIME
        })
    }
}

/// Split a comma-separated library list
pub fn split_libraries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn parse_refresh_time(value: &str) -> Option<(u32, u32)> {
    let (hour, minute) = value.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("bibchecker/{}", env!("CARGO_PKG_VERSION")),
            concurrency: 4,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("STUFF"),
            cache_file: PathBuf::from("out/cache.json"),
            my_libraries: DEFAULT_MY_LIBRARIES.to_string(),
            refresh_time: "04:00".to_string(),
        }
    }
}
