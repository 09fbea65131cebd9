//! Term-weighted vectors over the indexed questions.
//!
//! Built once from the full entry set: dimension ids follow first-seen term
//! order and IDF uses the smoothed form `ln((1 + N) / (1 + df)) + 1`. Nothing
//! here is mutable after [`VectorIndex::build`] returns; swapping in a new
//! document means building a new index.

use crate::tokenizer::tokenize;
use crate::{Entry, FaqError, Ordinal, Result, TermId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    idf: Vec<f32>,
}

impl Vocabulary {
    fn fit(questions: &[Vec<String>]) -> Self {
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        for tokens in questions {
            let mut seen_in_doc: HashSet<TermId> = HashSet::new();
            for term in tokens {
                let next_id = dictionary.len() as TermId;
                let tid = *dictionary.entry(term.clone()).or_insert_with(|| {
                    df.push(0);
                    next_id
                });
                if seen_in_doc.insert(tid) {
                    df[tid as usize] += 1;
                }
            }
        }
        let n = questions.len() as f32;
        let idf = df
            .iter()
            .map(|&df_t| ((1.0 + n) / (1.0 + df_t as f32)).ln() + 1.0)
            .collect();
        Self { dictionary, idf }
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn idf(&self, term_id: TermId) -> Option<f32> {
        self.idf.get(term_id as usize).copied()
    }

    /// Weight tokens by `tf * idf` and L2-normalize. Unknown terms are skipped.
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> QuestionVector {
        let mut tf: HashMap<TermId, u32> = HashMap::new();
        for term in tokens {
            if let Some(tid) = self.term_id(term.as_ref()) {
                *tf.entry(tid).or_insert(0) += 1;
            }
        }
        let mut weights: Vec<(TermId, f32)> = tf
            .into_iter()
            .map(|(tid, count)| (tid, count as f32 * self.idf[tid as usize]))
            .collect();
        weights.sort_by_key(|(tid, _)| *tid);

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in weights.iter_mut() {
                *w /= norm;
            }
        }
        QuestionVector { weights }
    }
}

/// Sparse, L2-normalized weights sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionVector {
    weights: Vec<(TermId, f32)>,
}

impl QuestionVector {
    pub fn weights(&self) -> &[(TermId, f32)] {
        &self.weights
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Dot product; equals cosine similarity since both sides are normalized.
    pub fn dot(&self, other: &QuestionVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.weights.len() && j < other.weights.len() {
            let (a, wa) = self.weights[i];
            let (b, wb) = other.weights[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<Entry>,
    vocabulary: Vocabulary,
    vectors: Vec<QuestionVector>,
}

impl VectorIndex {
    /// Build the vocabulary and one vector per entry.
    ///
    /// Ordinals are renumbered by position so they always form a dense
    /// 0-based sequence aligned with the vectors.
    pub fn build(mut entries: Vec<Entry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(FaqError::EmptyCorpus);
        }
        for (pos, entry) in entries.iter_mut().enumerate() {
            entry.ordinal = pos as Ordinal;
        }
        let tokenized: Vec<Vec<String>> = entries.iter().map(|e| tokenize(&e.question)).collect();
        let vocabulary = Vocabulary::fit(&tokenized);
        let vectors = tokenized.iter().map(|t| vocabulary.vectorize(t)).collect();
        tracing::info!(entries = entries.len(), terms = vocabulary.len(), "built question index");
        Ok(Self { entries, vocabulary, vectors })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[QuestionVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokenize and vectorize a query against this index's vocabulary.
    pub fn vectorize_query(&self, query: &str) -> QuestionVector {
        self.vocabulary.vectorize(&tokenize(query))
    }

    #[cfg(test)]
    pub(crate) fn from_parts(entries: Vec<Entry>, vocabulary: Vocabulary, vectors: Vec<QuestionVector>) -> Self {
        Self { entries, vocabulary, vectors }
    }
}
