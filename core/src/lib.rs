pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod matcher;
pub mod parser;
pub mod persist;
pub mod source;
pub mod tokenizer;

pub use config::{EngineConfig, Messages};
pub use engine::{AnswerEngine, Outcome, Reply};
pub use error::{FaqError, Result};
pub use index::{QuestionVector, VectorIndex, Vocabulary};
pub use matcher::{MatchResult, QueryMatcher};

use serde::{Deserialize, Serialize};

pub type Ordinal = u32;
pub type TermId = u32;

/// One question/answer pair, numbered by its position in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub answer: String,
    pub ordinal: Ordinal,
}
