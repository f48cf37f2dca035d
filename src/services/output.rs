//! Plain-text report output

use std::io::{self, Write};

use super::filters::{group_by_item, group_by_library};
use crate::models::CatalogEntry;

/// Report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortBy {
    /// One block per item, listing its copies
    #[default]
    Item,
    /// One block per library, listing the items available there
    Bib,
}

pub fn write_plain<W: Write>(out: &mut W, entries: &[CatalogEntry], sort_by: SortBy) -> io::Result<()> {
    match sort_by {
        SortBy::Item => write_by_item(out, entries),
        SortBy::Bib => write_by_library(out, entries),
    }
}

fn write_by_item<W: Write>(out: &mut W, entries: &[CatalogEntry]) -> io::Result<()> {
    for group in group_by_item(entries) {
        writeln!(out)?;
        writeln!(out, "{}", group.entry.display_title())?;
        for holding in group.holdings {
            writeln!(
                out,
                "  {} ({}) - {}",
                holding.bib.as_deref().unwrap_or("?"),
                holding.standort.as_deref().filter(|s| !s.is_empty()).unwrap_or("No Data"),
                holding.available
            )?;
        }
    }
    Ok(())
}

fn write_by_library<W: Write>(out: &mut W, entries: &[CatalogEntry]) -> io::Result<()> {
    for group in group_by_library(entries) {
        writeln!(out)?;
        writeln!(out, "Library '{}'", group.library)?;
        for item in group.items {
            writeln!(
                out,
                "  {} - {} - {}",
                item.entry.display_title(),
                item.holding.standort.as_deref().unwrap_or("-"),
                item.holding.available
            )?;
        }
    }
    Ok(())
}
