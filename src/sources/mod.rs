//! Library source extractors and identifier routing
//!
//! Each library system knows three things: which identifiers it owns, how to
//! bring an identifier into canonical form, and how to read its record page
//! into a [`CatalogEntry`]. The router picks the first library, in
//! [`Library::ALL`] order, whose ownership predicate accepts an identifier.

pub mod availability;
pub mod html;
pub mod remseck;
pub mod stuttgart;

pub use availability::classify;

use crate::error::{ExtractionError, ExtractionResult};
use crate::models::{CatalogEntry, Library};

impl Library {
    /// Whether this library owns the identifier's surface syntax
    pub fn matches(self, identifier: &str) -> bool {
        match self {
            Library::Stuttgart => stuttgart::matches(identifier),
            Library::Remseck => remseck::matches(identifier),
        }
    }

    /// Canonical identifier text; idempotent
    pub fn normalize_id(self, raw: &str) -> String {
        match self {
            Library::Stuttgart => stuttgart::normalize_id(raw),
            Library::Remseck => remseck::normalize_id(raw),
        }
    }

    /// Read a fetched record page into an entry
    pub fn extract(self, id: &str, markup: &str) -> ExtractionResult<CatalogEntry> {
        match self {
            Library::Stuttgart => stuttgart::extract(id, markup),
            Library::Remseck => remseck::extract(id, markup),
        }
    }

    /// Keywords that mark a status text as not borrowable
    pub fn unavailable_keywords(self) -> &'static [&'static str] {
        match self {
            Library::Stuttgart => stuttgart::UNAVAILABLE_KEYWORDS,
            Library::Remseck => remseck::UNAVAILABLE_KEYWORDS,
        }
    }
}

/// Find the library that owns an identifier
pub fn route(identifier: &str) -> ExtractionResult<Library> {
    Library::ALL
        .into_iter()
        .find(|library| library.matches(identifier))
        .ok_or_else(|| ExtractionError::UnknownFormat(identifier.to_string()))
}

/// Normalise an identifier through its owning library; unknown formats pass through unchanged
pub fn normalize(identifier: &str) -> String {
    match route(identifier) {
        Ok(library) => library.normalize_id(identifier),
        Err(_) => identifier.to_string(),
    }
}
