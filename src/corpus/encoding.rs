// Sparse bag-of-words encoding against a built vocabulary.

use std::collections::HashMap;

use super::vocabulary::Vocabulary;
use super::Document;

/// One document as a sparse identifier -> count mapping, sorted by
/// identifier. Counts are always positive; identifiers always index into the
/// vocabulary the document was encoded against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    counts: Vec<(u32, u32)>,
}

impl EncodedDocument {
    /// Sparse (identifier, count) entries in ascending identifier order.
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.counts
    }

    /// Number of distinct vocabulary tokens in the document.
    pub fn num_terms(&self) -> usize {
        self.counts.len()
    }

    /// Total in-vocabulary token occurrences.
    pub fn token_total(&self) -> u64 {
        self.counts.iter().map(|&(_, count)| u64::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Encode one document: count occurrences of each in-vocabulary token,
/// silently dropping tokens the vocabulary filtered out.
pub fn encode(document: &Document, vocabulary: &Vocabulary) -> EncodedDocument {
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for token in document {
        if let Some(id) = vocabulary.id(token) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<(u32, u32)> = counts.into_iter().collect();
    counts.sort_unstable_by_key(|&(id, _)| id);
    EncodedDocument { counts }
}

/// Encode the whole collection, one EncodedDocument per input document.
pub fn encode_all(documents: &[Document], vocabulary: &Vocabulary) -> Vec<EncodedDocument> {
    documents.iter().map(|doc| encode(doc, vocabulary)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::vocabulary::VocabularyParams;

    fn doc(tokens: &[&str]) -> Document {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn vocab(docs: &[Document]) -> Vocabulary {
        Vocabulary::build(
            docs,
            &VocabularyParams {
                no_below: 1,
                no_above: 1.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn counts_sum_to_document_length_when_fully_in_vocabulary() {
        let docs = vec![doc(&["a", "b", "a", "c", "a"])];
        let vocab = vocab(&docs);
        let encoded = encode(&docs[0], &vocab);
        assert_eq!(encoded.token_total(), 5);
        assert_eq!(encoded.num_terms(), 3);
    }

    #[test]
    fn out_of_vocabulary_tokens_are_dropped() {
        let train = vec![doc(&["a", "b"])];
        let vocab = vocab(&train);
        let encoded = encode(&doc(&["a", "unknown", "b", "unknown"]), &vocab);
        assert_eq!(encoded.token_total(), 2);
    }

    #[test]
    fn entries_are_sorted_with_positive_counts() {
        let docs = vec![doc(&["z", "y", "x", "z", "y", "z"])];
        let vocab = vocab(&docs);
        let encoded = encode(&docs[0], &vocab);

        let ids: Vec<u32> = encoded.entries().iter().map(|&(id, _)| id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert!(encoded.entries().iter().all(|&(_, count)| count > 0));
        assert!(encoded
            .entries()
            .iter()
            .all(|&(id, _)| (id as usize) < vocab.len()));
    }

    #[test]
    fn empty_vocabulary_encodes_to_empty_documents() {
        let docs = vec![doc(&["only"])];
        let empty = Vocabulary::build(
            &docs,
            &VocabularyParams {
                no_below: 10,
                no_above: 1.0,
            },
        )
        .unwrap();
        let encoded = encode_all(&docs, &empty);
        assert_eq!(encoded.len(), 1);
        assert!(encoded[0].is_empty());
    }

    #[test]
    fn encoding_is_deterministic() {
        let docs = vec![doc(&["a", "b", "c", "a"]), doc(&["c", "b"])];
        let vocab = vocab(&docs);
        assert_eq!(encode_all(&docs, &vocab), encode_all(&docs, &vocab));
    }
}
