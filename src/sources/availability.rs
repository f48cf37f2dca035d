//! Borrowability verdict from free-text availability strings

/// Returns `false` when `available_text` contains any of the keywords
/// (case-insensitive), `true` otherwise.
///
/// An empty status is borrowable: sources that print nothing for a copy on the
/// shelf must not be reported as unavailable.
pub fn classify(available_text: &str, unavailable_keywords: &[&str]) -> bool {
    let text = available_text.to_lowercase();
    !unavailable_keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}
