//! Identifier input file
//!
//! One identifier per line, optionally followed by a free-text description.
//! Blank lines and `#` comments are skipped.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::CatalogEntry;
use crate::sources;

/// One identifier line of the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// First token exactly as written
    pub raw: String,
    /// Normalised identifier
    pub id: String,
    pub description: Option<String>,
}

/// Parse input file contents
pub fn parse_input(text: &str) -> Vec<InputLine> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let raw = tokens.next()?;
            if raw.starts_with('#') {
                return None;
            }
            let description = tokens.collect::<Vec<_>>().join(" ");
            Some(InputLine {
                raw: raw.to_string(),
                id: sources::normalize(raw),
                description: (!description.is_empty()).then_some(description),
            })
        })
        .collect()
}

/// Read the input file, or report it as missing
pub async fn read_input_text(path: &Path) -> AppResult<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Input file {} does not exist",
            path.display()
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Read and parse the input file
pub async fn load_input(path: &Path) -> AppResult<Vec<InputLine>> {
    let lines = parse_input(&read_input_text(path).await?);
    tracing::info!("Read {} identifiers from {}", lines.len(), path.display());
    Ok(lines)
}

/// Replace the input file contents
pub async fn save_input_text(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

/// Rewrite identifier lines as `<raw id> <title>` where a title is known
pub fn update_titles(text: &str, entries: &[CatalogEntry]) -> String {
    let mut titles: HashMap<String, &str> = HashMap::new();
    for entry in entries {
        let Some(title) = entry.title.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        titles.insert(entry.id.clone(), title);
        titles.insert(entry.id.to_lowercase(), title);
        titles.insert(entry.id.to_uppercase(), title);
        if entry.id.to_uppercase().starts_with("SAK") {
            titles.insert(entry.id[1..].to_string(), title);
            titles.insert(entry.id[1..].to_uppercase(), title);
        }
    }

    let mut output = String::with_capacity(text.len());
    for line in text.lines() {
        let stripped = line.trim();
        let raw = stripped.split(' ').next().unwrap_or_default();
        match titles.get(&sources::normalize(raw)) {
            Some(title) if !stripped.is_empty() && !stripped.starts_with('#') => {
                output.push_str(raw);
                output.push(' ');
                output.push_str(title);
            }
            _ => output.push_str(line),
        }
        output.push('\n');
    }
    output
}

/// Write known titles back into the input file
pub async fn update_input_file(path: &Path, entries: &[CatalogEntry]) -> AppResult<()> {
    let text = read_input_text(path).await?;
    tokio::fs::write(path, update_titles(&text, entries)).await?;
    tracing::info!("Updated titles in {}", path.display());
    Ok(())
}
