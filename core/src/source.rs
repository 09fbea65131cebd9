//! Reading source documents as ordered page text.

use crate::{parser, persist, Entry, FaqError, Result};
use std::path::Path;

const FORM_FEED: char = '\x0c';

/// Read a document as pages in reading order.
///
/// PDFs go through `pdf-extract`; anything else is read as UTF-8 text. In both
/// cases form feeds mark page boundaries.
pub fn load_pages(path: &Path) -> Result<Vec<String>> {
    let text = if has_extension(path, "pdf") {
        let bytes = std::fs::read(path).map_err(|source| FaqError::Io { path: path.to_path_buf(), source })?;
        pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| FaqError::Pdf { path: path.to_path_buf(), reason: e.to_string() })?
    } else {
        std::fs::read_to_string(path).map_err(|source| FaqError::Io { path: path.to_path_buf(), source })?
    };
    if text.trim().is_empty() {
        tracing::warn!(path = %path.display(), "no text extracted; the document might be scanned");
    }
    Ok(split_pages(&text))
}

/// Load entries from an entry export (`.json`) or by parsing a document.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    if has_extension(path, "json") {
        return persist::load_entries_file(path);
    }
    let pages = load_pages(path)?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "loaded document");
    parser::parse_pages(&pages)
}

fn split_pages(text: &str) -> Vec<String> {
    text.split(FORM_FEED).map(str::to_string).collect()
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
