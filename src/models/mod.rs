//! Data models for Bibchecker

pub mod entry;
pub mod library;
pub mod report;

// Re-export commonly used types
pub use entry::{CatalogEntry, Holding, HoldingField};
pub use library::Library;
pub use report::{
    BatchOutcome, ExtractionFailure, FailureKind, ItemGroup, LibraryGroup, LibraryItem,
    RefreshState, RefreshSummary,
};
