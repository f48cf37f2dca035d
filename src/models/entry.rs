//! Catalog entry and holding models
//!
//! One `CatalogEntry` per identifier and one `Holding` per physical copy, in the
//! shape every source extractor reduces its page to.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::library::Library;

/// One physical/lending copy of an item at one location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Holding {
    /// Owning branch or library name
    #[serde(default)]
    pub bib: Option<String>,
    /// Shelving location
    #[serde(default)]
    pub standort: Option<String>,
    /// Call number
    #[serde(default)]
    pub sig: Option<String>,
    /// Ordering method
    #[serde(default)]
    pub method: Option<String>,
    /// Free-text availability status as printed by the source
    #[serde(default)]
    pub available: String,
    /// Reservation status
    #[serde(default)]
    pub reservation: Option<String>,
    /// Derived from `available` and the source's keyword table
    pub can_be_borrowed: bool,
}

impl Holding {
    /// Library name used for grouping and allowlist checks
    pub fn library_name(&self) -> Option<&str> {
        self.bib.as_deref()
    }

    /// Assign a mapped column value to the matching field
    pub fn set_field(&mut self, field: HoldingField, value: String) {
        match field {
            HoldingField::Bib => self.bib = Some(value),
            HoldingField::Standort => self.standort = Some(value),
            HoldingField::Sig => self.sig = Some(value),
            HoldingField::Method => self.method = Some(value),
            HoldingField::Available => self.available = value,
            HoldingField::Reservation => self.reservation = Some(value),
        }
    }
}

/// Canonical holding fields a source column can be mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldingField {
    Bib,
    Standort,
    Sig,
    Method,
    Available,
    Reservation,
}

/// One catalog item with all its tracked copies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    pub id: String,
    pub library: Library,
    #[serde(default, alias = "Titel", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "TitelExtra", skip_serializing_if = "Option::is_none")]
    pub title_extra: Option<String>,
    /// Further labelled fields from the record page, in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[schema(value_type = Object)]
    pub metadata: IndexMap<String, String>,
    /// Copies in source document order; empty when the item has none
    #[serde(default, alias = "status")]
    pub holdings: Vec<Holding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_description: Option<String>,
}

impl CatalogEntry {
    /// Create an empty entry owned by the given library
    pub fn new(id: impl Into<String>, library: Library) -> Self {
        Self {
            id: id.into(),
            library,
            title: None,
            title_extra: None,
            metadata: IndexMap::new(),
            holdings: Vec::new(),
            catalog_url: None,
            user_description: None,
        }
    }

    /// Set `title` and `title_extra` from a combined "title / responsibility" string
    pub fn set_title(&mut self, text: &str) {
        match text.split_once(" / ") {
            Some((title, extra)) => {
                self.title = Some(title.to_string());
                self.title_extra = Some(extra.to_string());
            }
            None => self.title = Some(text.to_string()),
        }
    }

    /// Title for display, falling back to the identifier
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}
