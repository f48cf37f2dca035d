//! Bibchecker
//!
//! Checks which catalog items (books, media) can be borrowed right now across
//! several public library systems. Identifiers are routed to the library that
//! owns them, each library's record page is reduced to one canonical entry
//! shape, and the entries are filtered and grouped into availability reports.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod sources;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ExtractionError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
