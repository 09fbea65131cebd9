use crate::index::VectorIndex;
use crate::{Entry, FaqError, Result};

pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Best match for one query. `entry` is `None` when the score fell below the
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub entry: Option<&'a Entry>,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct QueryMatcher {
    index: VectorIndex,
    threshold: f32,
}

impl QueryMatcher {
    pub fn new(index: VectorIndex, threshold: f32) -> Result<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(FaqError::InvalidThreshold(threshold));
        }
        Ok(Self { index, threshold })
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score the query against every indexed question and keep the first
    /// maximum in ordinal order. A score equal to the threshold still matches.
    pub fn best_match(&self, query: &str) -> Result<MatchResult<'_>> {
        let entries = self.index.entries();
        let vectors = self.index.vectors();
        if entries.len() != vectors.len() {
            return Err(FaqError::CorruptIndex { entries: entries.len(), vectors: vectors.len() });
        }

        let q = self.index.vectorize_query(query);
        let mut best: Option<(&Entry, f32)> = None;
        for (entry, vector) in entries.iter().zip(vectors) {
            let score = q.dot(vector);
            if !score.is_finite() {
                return Err(FaqError::NonFiniteScore { ordinal: entry.ordinal });
            }
            let score = score.clamp(0.0, 1.0);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((entry, score)),
            }
        }

        let (entry, score) = match best {
            Some(b) => b,
            None => return Ok(MatchResult { entry: None, score: 0.0 }),
        };
        tracing::debug!(query, score, ordinal = entry.ordinal, "best match");
        if score >= self.threshold {
            Ok(MatchResult { entry: Some(entry), score })
        } else {
            Ok(MatchResult { entry: None, score })
        }
    }
}
