//! Small helpers over `scraper` shared by the extractors

use scraper::{ElementRef, Html, Selector};

/// Compile a selector literal
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector must be valid CSS")
}

/// First element in the document matching `sel`
pub fn find<'a>(document: &'a Html, sel: &Selector) -> Option<ElementRef<'a>> {
    document.select(sel).next()
}

/// First descendant of `element` matching `sel`
pub fn find_in<'a>(element: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    element.select(sel).next()
}

/// All text of an element, concatenated and trimmed at both ends
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text nodes of an element, each trimmed, empty ones dropped, joined by `separator`
pub fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Direct `td` children of a table row
pub fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}
