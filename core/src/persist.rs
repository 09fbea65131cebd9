use crate::{Entry, FaqError, Ordinal, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const EXPORT_VERSION: u32 = 1;

/// Entries extracted from a document, saved so a server can start without
/// re-reading the PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryExport {
    pub source: String,
    pub created_at: String,
    pub version: u32,
    pub entries: Vec<ExportedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedEntry {
    pub question: String,
    pub answer: String,
}

impl EntryExport {
    pub fn new(source: impl Into<String>, created_at: impl Into<String>, entries: &[Entry]) -> Self {
        Self {
            source: source.into(),
            created_at: created_at.into(),
            version: EXPORT_VERSION,
            entries: entries
                .iter()
                .map(|e| ExportedEntry { question: e.question.clone(), answer: e.answer.clone() })
                .collect(),
        }
    }
}

pub fn save_entries(path: &Path, export: &EntryExport) -> Result<()> {
    let io_err = |source: std::io::Error| FaqError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(io_err)?;
    }
    let f = File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, export)
        .map_err(|source| FaqError::Json { path: path.to_path_buf(), source })?;
    w.flush().map_err(io_err)?;
    Ok(())
}

pub fn load_export(path: &Path) -> Result<EntryExport> {
    let f = File::open(path).map_err(|source| FaqError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_reader(BufReader::new(f)).map_err(|source| FaqError::Json { path: path.to_path_buf(), source })
}

/// Load an export as entries, numbering them by position.
pub fn load_entries_file(path: &Path) -> Result<Vec<Entry>> {
    let export = load_export(path)?;
    if export.entries.is_empty() {
        return Err(FaqError::EmptyCorpus);
    }
    Ok(export
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| Entry { question: e.question, answer: e.answer, ordinal: i as Ordinal })
        .collect())
}
