use crate::matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum similarity (inclusive) for a match to be answered.
    pub threshold: f32,
    pub messages: Messages,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, messages: Messages::default() }
    }
}

impl EngineConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Fixed replies for questions that do not resolve to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub invalid_question: String,
    pub no_answer: String,
    /// `{error}` is replaced with the failure description.
    pub processing_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_question: "Please ask a valid question.".into(),
            no_answer: "I do not have an answer to that question right now. Please contact a live agent.".into(),
            processing_error: "Error processing your question: {error}".into(),
        }
    }
}

impl Messages {
    pub fn processing_error_for(&self, error: &dyn std::fmt::Display) -> String {
        self.processing_error.replace("{error}", &error.to_string())
    }
}
