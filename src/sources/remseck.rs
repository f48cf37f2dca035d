//! Mediathek Remseck (Koha OPAC)

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::availability::classify;
use super::html::{cells, find, find_in, selector, stripped_text};
use crate::error::{ExtractionError, ExtractionResult};
use crate::models::{CatalogEntry, Holding, Library};

/// Status phrases meaning the copy cannot be borrowed right now
pub const UNAVAILABLE_KEYWORDS: &[&str] = &["ausgeliehen", "checkedout"];

/// Marker in the status cell markup for copies Koha reports as out of stock
const OUT_OF_STOCK_MARKER: &str = "OutOfStock";

const INFO_ICON: char = 'ⓘ';

static DETAIL: Lazy<Selector> = Lazy::new(|| selector("#catalogue_detail_biblio"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("h1.title"));
static HOLDINGS_TABLE: Lazy<Selector> = Lazy::new(|| selector("table#holdingst"));
static TBODY: Lazy<Selector> = Lazy::new(|| selector("tbody"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static LOCATION: Lazy<Selector> = Lazy::new(|| selector("td.location"));
static LIBRARY_LINK: Lazy<Selector> = Lazy::new(|| selector("a.library_info"));
static SHELVING: Lazy<Selector> = Lazy::new(|| selector("span.shelvingloc"));
static CALL_NUMBER: Lazy<Selector> = Lazy::new(|| selector("td.call_no"));
static STATUS: Lazy<Selector> = Lazy::new(|| selector("td.status"));
static ITEM_STATUS: Lazy<Selector> = Lazy::new(|| selector("span.item-status"));
static IN_STOCK: Lazy<Selector> =
    Lazy::new(|| selector(r#"link[href="http://schema.org/InStock"]"#));
static DUE_DATE: Lazy<Selector> = Lazy::new(|| selector("td.date_due"));

/// Koha biblionumbers: digits only
pub fn matches(identifier: &str) -> bool {
    let trimmed = identifier.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_string()
}

/// Build an entry from a Koha detail page
pub fn extract(id: &str, markup: &str) -> ExtractionResult<CatalogEntry> {
    let document = Html::parse_document(markup);

    if find(&document, &DETAIL).is_none()
        && find(&document, &TITLE).is_none()
        && find(&document, &HOLDINGS_TABLE).is_none()
    {
        return Err(ExtractionError::StructuralParse(format!(
            "no record detail on Remseck page for {}",
            id
        )));
    }

    let mut entry = CatalogEntry::new(id, Library::Remseck);
    if let Some(title) = find(&document, &TITLE) {
        entry.set_title(&stripped_text(title, " "));
    }
    entry.holdings = parse_holdings(&document);

    Ok(entry)
}

fn parse_holdings(document: &Html) -> Vec<Holding> {
    let Some(tbody) = find(document, &HOLDINGS_TABLE).and_then(|table| find_in(table, &TBODY)) else {
        return Vec::new();
    };

    tbody
        .select(&ROW)
        .filter(|row| !cells(*row).is_empty())
        .map(parse_holding_row)
        .collect()
}

fn parse_holding_row(row: ElementRef<'_>) -> Holding {
    let mut holding = Holding::default();

    if let Some(location) = find_in(row, &LOCATION) {
        if let Some(link) = find_in(location, &LIBRARY_LINK) {
            let name = stripped_text(link, "").replace('\n', " ");
            let name = name.trim();
            let name = name.strip_prefix(INFO_ICON).unwrap_or(name).trim();
            holding.bib = Some(name.to_string());
        }
        if let Some(shelf) = find_in(location, &SHELVING) {
            holding.standort = Some(stripped_text(shelf, ""));
        }
    }

    if let Some(call_number) = find_in(row, &CALL_NUMBER) {
        let text = stripped_text(call_number, "");
        let sig = text.split('(').next().unwrap_or_default().trim();
        holding.sig = Some(sig.to_string());
    }

    let status_cell = find_in(row, &STATUS);
    if let Some(cell) = status_cell {
        holding.available = match find_in(cell, &ITEM_STATUS) {
            Some(span) => stripped_text(span, ""),
            None if find_in(cell, &IN_STOCK).is_some() => "Verfügbar".to_string(),
            None => "Unbekannt".to_string(),
        };
    }

    if let Some(due) = find_in(row, &DUE_DATE) {
        let due = stripped_text(due, "");
        if !due.is_empty() && !holding.available.is_empty() {
            holding.available = format!("{} - Fällig am: {}", holding.available, due);
        }
    }

    let out_of_stock = status_cell.is_some_and(|cell| cell.html().contains(OUT_OF_STOCK_MARKER));
    holding.can_be_borrowed = classify(&holding.available, UNAVAILABLE_KEYWORDS) && !out_of_stock;

    holding
}
