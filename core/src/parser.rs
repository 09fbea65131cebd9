//! Splits raw document text into question/answer entries.
//!
//! A trimmed, non-empty line starts a new question when it ends with `?` or
//! opens with an interrogative word. Every other line continues the answer of
//! the question currently open. Lines seen before the first question are
//! ignored, and a question that collects no answer lines is dropped.

use crate::{Entry, FaqError, Ordinal, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INTERROGATIVE: Regex = Regex::new(
        r"(?i)^(how|what|why|when|who|can|is|do|does|are|could|would|will|shall)\b"
    )
    .expect("valid regex");
    static ref LINE_BREAK: Regex =
        Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]").expect("valid regex");
}

/// Whether a trimmed line opens a new question.
pub fn is_question_start(line: &str) -> bool {
    line.ends_with('?') || INTERROGATIVE.is_match(line)
}

/// Parse pages (in reading order) into entries numbered from 0.
///
/// Fails with [`FaqError::EmptyCorpus`] when no entry results.
pub fn parse_pages<S: AsRef<str>>(pages: &[S]) -> Result<Vec<Entry>> {
    let text = pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    parse_text(&text)
}

pub fn parse_text(text: &str) -> Result<Vec<Entry>> {
    let mut builder = EntryBuilder::default();
    for raw in LINE_BREAK.split(text) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if is_question_start(line) {
            builder.start_question(line);
        } else {
            builder.push_answer(line);
        }
    }
    let entries = builder.finish();
    if entries.is_empty() {
        return Err(FaqError::EmptyCorpus);
    }
    tracing::debug!(entries = entries.len(), "parsed document");
    Ok(entries)
}

#[derive(Default)]
struct EntryBuilder<'a> {
    question: Option<&'a str>,
    answer: Vec<&'a str>,
    entries: Vec<Entry>,
}

impl<'a> EntryBuilder<'a> {
    fn start_question(&mut self, line: &'a str) {
        self.flush();
        self.question = Some(line);
        self.answer.clear();
    }

    fn push_answer(&mut self, line: &'a str) {
        if self.question.is_some() {
            self.answer.push(line);
        }
    }

    fn flush(&mut self) {
        if let Some(question) = self.question {
            if !self.answer.is_empty() {
                self.entries.push(Entry {
                    question: question.trim().to_string(),
                    answer: self.answer.join(" ").trim().to_string(),
                    ordinal: self.entries.len() as Ordinal,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<Entry> {
        self.flush();
        self.entries
    }
}
