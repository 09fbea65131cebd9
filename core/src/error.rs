use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqError {
    /// The source document produced no question/answer pairs.
    #[error("no valid question/answer pairs found in the document")]
    EmptyCorpus,

    #[error("threshold must be a finite value in [0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("index is corrupt: {entries} entries vs {vectors} vectors")]
    CorruptIndex { entries: usize, vectors: usize },

    #[error("similarity for entry {ordinal} is not a finite number")]
    NonFiniteScore { ordinal: u32 },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to extract text from PDF '{path}': {reason}")]
    Pdf { path: PathBuf, reason: String },

    #[error("invalid entry export '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, FaqError>;
