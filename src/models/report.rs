//! Batch outcome and presentation shapes

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entry::{CatalogEntry, Holding};
use crate::error::ExtractionError;

/// Stable tag for the kind of per-identifier failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownFormat,
    Fetch,
    StructuralParse,
    FieldMapping,
}

/// An identifier that could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractionFailure {
    pub id: String,
    pub kind: FailureKind,
    pub reason: String,
}

impl ExtractionFailure {
    pub fn new(id: impl Into<String>, error: &ExtractionError) -> Self {
        Self {
            id: id.into(),
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Successful entries and failures of one batch, each in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BatchOutcome {
    pub entries: Vec<CatalogEntry>,
    pub failures: Vec<ExtractionFailure>,
}

impl FromIterator<Result<CatalogEntry, ExtractionFailure>> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = Result<CatalogEntry, ExtractionFailure>>>(iter: I) -> Self {
        let mut outcome = BatchOutcome::default();
        for result in iter {
            match result {
                Ok(entry) => outcome.entries.push(entry),
                Err(failure) => outcome.failures.push(failure),
            }
        }
        outcome
    }
}

/// State published by the last completed refresh
#[derive(Debug, Clone)]
pub struct RefreshState {
    pub refreshed_at: DateTime<Local>,
    /// Number of identifiers read from the input, including failed ones
    pub id_count: usize,
    pub entries: Vec<CatalogEntry>,
    pub failures: Vec<ExtractionFailure>,
}

/// Summary returned after a refresh
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshSummary {
    pub refreshed_at: DateTime<Local>,
    pub id_count: usize,
    pub entries: usize,
    pub failures: usize,
}

impl From<&RefreshState> for RefreshSummary {
    fn from(state: &RefreshState) -> Self {
        Self {
            refreshed_at: state.refreshed_at,
            id_count: state.id_count,
            entries: state.entries.len(),
            failures: state.failures.len(),
        }
    }
}

/// "By item" view: one entry with its retained holdings
#[derive(Debug, Clone, Copy)]
pub struct ItemGroup<'a> {
    pub entry: &'a CatalogEntry,
    pub holdings: &'a [Holding],
}

/// "By library" view: all retained holdings at one library
#[derive(Debug, Clone)]
pub struct LibraryGroup<'a> {
    pub library: String,
    pub items: Vec<LibraryItem<'a>>,
}

/// One `(entry, holding)` pair inside a library group
#[derive(Debug, Clone, Copy)]
pub struct LibraryItem<'a> {
    pub entry: &'a CatalogEntry,
    pub holding: &'a Holding,
}
