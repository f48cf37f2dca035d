//! Holding filters and report groupings

use std::collections::{BTreeMap, HashSet};

use crate::models::{CatalogEntry, Holding, ItemGroup, LibraryGroup, LibraryItem};

/// Group name for holdings without a library name
pub const UNKNOWN_LIBRARY: &str = "Unbekannt";

/// Which holdings and entries survive a filter pass
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keep holdings that cannot be borrowed right now
    pub keep_unborrowable: bool,
    /// Drop entries left without any holding
    pub only_available: bool,
    /// Library names to keep; empty keeps every library
    pub libraries: HashSet<String>,
}

impl FilterOptions {
    /// Everything, including unborrowable copies
    pub fn all() -> Self {
        Self {
            keep_unborrowable: true,
            ..Self::default()
        }
    }

    /// Only borrowable copies at the given libraries, dropping empty entries
    pub fn available_at<I, S>(libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keep_unborrowable: false,
            only_available: true,
            libraries: libraries.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a single holding is retained
    pub fn keeps(&self, holding: &Holding) -> bool {
        let borrowable = holding.can_be_borrowed || self.keep_unborrowable;
        let allowed = self.libraries.is_empty()
            || holding
                .library_name()
                .is_some_and(|name| self.libraries.contains(name));
        borrowable && allowed
    }
}

/// Prune holdings per entry, then drop entries left empty when `only_available` is set
pub fn filter_entries<I>(entries: I, options: &FilterOptions) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = CatalogEntry>,
{
    entries
        .into_iter()
        .filter_map(|mut entry| {
            entry.holdings.retain(|holding| options.keeps(holding));
            if options.only_available && entry.holdings.is_empty() {
                None
            } else {
                Some(entry)
            }
        })
        .collect()
}

/// Entries in their given order, each with its holdings
pub fn group_by_item(entries: &[CatalogEntry]) -> Vec<ItemGroup<'_>> {
    entries
        .iter()
        .map(|entry| ItemGroup {
            entry,
            holdings: &entry.holdings,
        })
        .collect()
}

/// One group per library name, sorted by name; items keep entry order
pub fn group_by_library(entries: &[CatalogEntry]) -> Vec<LibraryGroup<'_>> {
    let mut groups: BTreeMap<&str, Vec<LibraryItem<'_>>> = BTreeMap::new();

    for entry in entries {
        for holding in &entry.holdings {
            let library = holding.library_name().unwrap_or(UNKNOWN_LIBRARY);
            groups
                .entry(library)
                .or_default()
                .push(LibraryItem { entry, holding });
        }
    }

    groups
        .into_iter()
        .map(|(library, items)| LibraryGroup {
            library: library.to_string(),
            items,
        })
        .collect()
}

/// Sort entries by title; entries without a title sort first
pub fn sort_by_title(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| {
        a.title
            .as_deref()
            .unwrap_or_default()
            .cmp(b.title.as_deref().unwrap_or_default())
    });
}

/// Distinct non-empty library names across all holdings, sorted
pub fn collect_libraries(entries: &[CatalogEntry]) -> Vec<String> {
    let names: std::collections::BTreeSet<&str> = entries
        .iter()
        .flat_map(|entry| entry.holdings.iter())
        .filter_map(Holding::library_name)
        .filter(|name| !name.is_empty())
        .collect();
    names.into_iter().map(String::from).collect()
}

/// Libraries listed in `mine` first, then the rest, each part keeping its order
pub fn order_libraries(libraries: &[String], mine: &[String]) -> Vec<String> {
    let (mut first, rest): (Vec<String>, Vec<String>) = libraries
        .iter()
        .cloned()
        .partition(|library| mine.contains(library));
    first.extend(rest);
    first
}
