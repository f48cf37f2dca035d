//! Stadtbibliothek Stuttgart (aDIS web OPAC)
//!
//! Record pages carry two tables: `table.gi` with labelled bibliographic rows
//! (`th` label, `td.spalterechts` value) and `table.rTable_table` with one row per
//! copy. Holding columns are identified by their German header labels, so the
//! column order on the page does not matter.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use super::availability::classify;
use super::html::{cells, find, find_in, selector, text};
use crate::error::{ExtractionError, ExtractionResult};
use crate::models::{CatalogEntry, Holding, HoldingField, Library};

/// Status phrases meaning the copy cannot be borrowed right now
pub const UNAVAILABLE_KEYWORDS: &[&str] = &[
    "Ausgeliehen",
    "Ist nur vor Ort nutzbar",
    "Nicht im Regal",
    "noch nicht im Haus",
    "Reserviert",
    "zur Zeit vermisst",
];

/// Holdings table header label -> holding field
pub const COLUMN_MAPPING: &[(&str, HoldingField)] = &[
    ("Bibliothek", HoldingField::Bib),
    ("Standort", HoldingField::Standort),
    ("Signatur", HoldingField::Sig),
    ("Bestellmöglichkeit", HoldingField::Method),
    ("Verfügbarkeit", HoldingField::Available),
    ("Reservierung", HoldingField::Reservation),
];

static SCRIPT_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^javascript:htmlonlink\(\s*'([^']*)'").expect("valid regex"));

static INFO_TABLE: Lazy<Selector> = Lazy::new(|| selector("table.gi"));
static HOLDINGS_TABLE: Lazy<Selector> = Lazy::new(|| selector("table.rTable_table"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static LABEL: Lazy<Selector> = Lazy::new(|| selector("th"));
static VALUE: Lazy<Selector> = Lazy::new(|| selector("td.spalterechts"));
static THEAD: Lazy<Selector> = Lazy::new(|| selector("thead"));
static TBODY: Lazy<Selector> = Lazy::new(|| selector("tbody"));

/// `SAK…`/`AK…` codes (any case) and `javascript:htmlOnLink('…')` references
pub fn matches(identifier: &str) -> bool {
    let upper = identifier.trim().to_uppercase();
    upper.starts_with("SAK") || upper.starts_with("AK") || upper.starts_with("JAVASCRIPT:HTMLONLINK")
}

/// Canonical form: upper case, `AK` rewritten to `SAK`, script references unwrapped
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(captures) = SCRIPT_REFERENCE.captures(trimmed) {
        return normalize_id(&captures[1]);
    }

    let upper = trimmed.to_uppercase();
    if upper.starts_with("AK") {
        format!("S{}", upper)
    } else {
        upper
    }
}

/// Look up the holding field for a header label.
///
/// Blank header cells carry no label and are ignored; a non-blank label
/// outside the mapping fails the whole page.
pub fn map_header(label: &str) -> ExtractionResult<Option<HoldingField>> {
    let label = label.trim();
    if label.is_empty() {
        return Ok(None);
    }
    COLUMN_MAPPING
        .iter()
        .find(|(header, _)| *header == label)
        .map(|(_, field)| Some(*field))
        .ok_or_else(|| ExtractionError::FieldMapping(label.to_string()))
}

/// Build an entry from a Stuttgart record page
pub fn extract(id: &str, markup: &str) -> ExtractionResult<CatalogEntry> {
    let document = Html::parse_document(markup);

    if find(&document, &INFO_TABLE).is_none() && find(&document, &HOLDINGS_TABLE).is_none() {
        return Err(ExtractionError::StructuralParse(format!(
            "no record tables on Stuttgart page for {}",
            id
        )));
    }

    let mut entry = CatalogEntry::new(id, Library::Stuttgart);
    parse_metadata(&document, &mut entry);
    entry.holdings = parse_holdings(&document)?;

    Ok(entry)
}

fn parse_metadata(document: &Html, entry: &mut CatalogEntry) {
    let Some(table) = find(document, &INFO_TABLE) else {
        tracing::debug!("Stuttgart page for {} has no info table", entry.id);
        return;
    };

    for row in table.select(&ROW) {
        let (Some(label), Some(value)) = (find_in(row, &LABEL), find_in(row, &VALUE)) else {
            continue;
        };
        let label = text(label);
        let value = text(value);

        if label.starts_with("Titel") {
            let cleaned = value.replace("Titel ", "");
            let parts: Vec<&str> = cleaned.split(" / ").collect();
            if let [title, extra] = parts.as_slice() {
                entry.title = Some(title.to_string());
                entry.title_extra = Some(extra.to_string());
            } else {
                entry.title = Some(value);
            }
        } else if !label.is_empty() {
            entry.metadata.insert(label, value);
        }
    }
}

fn parse_holdings(document: &Html) -> ExtractionResult<Vec<Holding>> {
    let mut holdings = Vec::new();

    let Some(table) = find(document, &HOLDINGS_TABLE) else {
        return Ok(holdings);
    };
    let (Some(thead), Some(tbody)) = (find_in(table, &THEAD), find_in(table, &TBODY)) else {
        return Ok(holdings);
    };

    let columns = thead
        .select(&LABEL)
        .map(|th| map_header(&text(th)))
        .collect::<ExtractionResult<Vec<_>>>()?;

    for (idx, row) in tbody.select(&ROW).enumerate() {
        let row_cells = cells(row);
        if row_cells.len() != columns.len() {
            tracing::debug!(
                "Skipping holdings row {}: {} cells for {} columns",
                idx,
                row_cells.len(),
                columns.len()
            );
            continue;
        }

        let mut holding = Holding::default();
        for (column, cell) in columns.iter().zip(row_cells) {
            if let Some(field) = column {
                holding.set_field(*field, text(cell));
            }
        }
        holding.can_be_borrowed = classify(&holding.available, UNAVAILABLE_KEYWORDS);
        holdings.push(holding);
    }

    Ok(holdings)
}
