//! The answer façade: validates input, consults the matcher, and turns every
//! per-query condition into displayable text.

use crate::config::EngineConfig;
use crate::index::VectorIndex;
use crate::matcher::QueryMatcher;
use crate::{parser, source, Entry, Ordinal, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered { ordinal: Ordinal },
    /// Best score was below the threshold.
    NoMatch,
    /// Blank question; the matcher was not consulted.
    Invalid,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub outcome: Outcome,
    pub score: Option<f32>,
}

impl Reply {
    /// True when the question should be routed to a human.
    pub fn needs_escalation(&self) -> bool {
        self.outcome == Outcome::NoMatch
    }
}

/// Immutable after construction; share it behind an `Arc` across requests.
#[derive(Debug, Clone)]
pub struct AnswerEngine {
    matcher: QueryMatcher,
    config: EngineConfig,
}

impl AnswerEngine {
    pub fn from_entries(entries: Vec<Entry>, config: EngineConfig) -> Result<Self> {
        let index = VectorIndex::build(entries)?;
        let matcher = QueryMatcher::new(index, config.threshold)?;
        Ok(Self { matcher, config })
    }

    pub fn from_pages<S: AsRef<str>>(pages: &[S], config: EngineConfig) -> Result<Self> {
        Self::from_entries(parser::parse_pages(pages)?, config)
    }

    /// Load a PDF, text file, or entry export and build the engine from it.
    pub fn open(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self> {
        let path = path.as_ref();
        let engine = Self::from_entries(source::load_entries(path)?, config)?;
        tracing::info!(path = %path.display(), entries = engine.len(), "answer engine ready");
        Ok(engine)
    }

    pub fn entries(&self) -> &[Entry] {
        self.matcher.index().entries()
    }

    pub fn len(&self) -> usize {
        self.matcher.index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.index().is_empty()
    }

    pub fn matcher(&self) -> &QueryMatcher {
        &self.matcher
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn get_answer(&self, question: &str) -> String {
        self.respond(question).text
    }

    pub fn respond(&self, question: &str) -> Reply {
        let messages = &self.config.messages;
        if question.trim().is_empty() {
            return Reply { text: messages.invalid_question.clone(), outcome: Outcome::Invalid, score: None };
        }
        match self.matcher.best_match(question) {
            Ok(m) => match m.entry {
                Some(entry) => Reply {
                    text: entry.answer.clone(),
                    outcome: Outcome::Answered { ordinal: entry.ordinal },
                    score: Some(m.score),
                },
                None => Reply { text: messages.no_answer.clone(), outcome: Outcome::NoMatch, score: Some(m.score) },
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to match question");
                Reply { text: messages.processing_error_for(&e), outcome: Outcome::Error, score: None }
            }
        }
    }
}
