use faq_core::tokenizer::tokenize;
use faq_core::{Entry, VectorIndex};

fn entry(question: &str) -> Entry {
    Entry { question: question.into(), answer: "a".into(), ordinal: 99 }
}

#[test]
fn ordinals_are_dense() {
    let index = VectorIndex::build(vec![entry("What is it?"), entry("Who are you?")]).unwrap();
    let ordinals: Vec<u32> = index.entries().iter().map(|e| e.ordinal).collect();
    assert_eq!(ordinals, vec![0, 1]);
    assert_eq!(index.vectors().len(), index.entries().len());
}

#[test]
fn terms_get_first_seen_ids_and_smoothed_idf() {
    let index = VectorIndex::build(vec![entry("what hours"), entry("what price")]).unwrap();
    let vocab = index.vocabulary();
    assert_eq!(vocab.len(), 3);
    assert_eq!(vocab.term_id("what"), Some(0));
    assert_eq!(vocab.term_id("hours"), Some(1));
    assert_eq!(vocab.term_id("price"), Some(2));
    // what: df = 2, N = 2 -> ln(3/3) + 1
    assert!((vocab.idf(0).unwrap() - 1.0).abs() < 1e-6);
    // hours: df = 1 -> ln(3/2) + 1
    assert!((vocab.idf(1).unwrap() - (1.5f32.ln() + 1.0)).abs() < 1e-6);
}

#[test]
fn vectors_are_unit_length() {
    let index = VectorIndex::build(vec![entry("How do I reset my reset password?"), entry("Hours?")]).unwrap();
    for v in index.vectors() {
        let norm: f32 = v.weights().iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}

#[test]
fn query_ignores_unknown_terms() {
    let index = VectorIndex::build(vec![entry("what hours")]).unwrap();
    let q = index.vectorize_query("hours xyz nonsense");
    assert_eq!(q.weights().len(), 1);
    assert!(index.vectorize_query("xyz").is_empty());
    assert_eq!(index.vocabulary().len(), 2);
    assert_eq!(tokenize("xyz"), vec!["xyz"]);
}

#[test]
fn question_without_tokens_has_empty_vector() {
    let index = VectorIndex::build(vec![entry("A?"), entry("What now?")]).unwrap();
    assert!(index.vectors()[0].is_empty());
    let q = index.vectorize_query("what");
    assert_eq!(q.dot(&index.vectors()[0]), 0.0);
}
