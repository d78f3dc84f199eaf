// Vocabulary construction with document-frequency filtering.
//
// Tokens get dense integer identifiers in first-seen order. Filtering drops
// tokens that are too rare (absolute document frequency below `no_below`) or
// too common (document frequency above the `no_above` fraction of the
// collection), then re-densifies identifiers so they stay contiguous from
// zero in the original relative order.

use std::collections::{HashMap, HashSet};

use tracing::info;

use super::Document;
use crate::error::{PipelineError, Result};

/// Document-frequency filter bounds.
#[derive(Debug, Clone)]
pub struct VocabularyParams {
    /// Minimum absolute document frequency to keep a token
    pub no_below: u32,
    /// Maximum document frequency as a fraction of the collection size
    pub no_above: f64,
}

impl Default for VocabularyParams {
    fn default() -> Self {
        Self {
            no_below: 3,
            no_above: 0.3,
        }
    }
}

/// Bidirectional token <-> identifier mapping with per-token document
/// frequency. Built once from the collocation-merged corpus, read-only after.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_id: HashMap<String, u32>,
    id_to_token: Vec<String>,
    doc_freqs: Vec<u32>,
    num_documents: usize,
}

impl Vocabulary {
    /// Build a vocabulary from a document collection.
    ///
    /// Fails fast on an empty collection. A vocabulary emptied by filtering
    /// is returned as-is — that degenerate state is the pipeline layer's
    /// responsibility to reject before training.
    pub fn build(documents: &[Document], params: &VocabularyParams) -> Result<Self> {
        if documents.is_empty() {
            return Err(PipelineError::empty_input(
                "no documents to build a vocabulary from",
            ));
        }

        // First-seen order across the collection fixes identifier order.
        let mut first_seen: Vec<String> = Vec::new();
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        for doc in documents {
            let mut seen_here: HashSet<&str> = HashSet::new();
            for token in doc {
                if !doc_freq.contains_key(token) {
                    first_seen.push(token.clone());
                }
                if seen_here.insert(token.as_str()) {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        let size_before = first_seen.len();
        let num_documents = documents.len();
        let max_df = params.no_above * num_documents as f64;

        let mut token_to_id = HashMap::new();
        let mut id_to_token = Vec::new();
        let mut doc_freqs = Vec::new();
        for token in first_seen {
            let df = doc_freq[&token];
            if df < params.no_below || f64::from(df) > max_df {
                continue;
            }
            token_to_id.insert(token.clone(), id_to_token.len() as u32);
            id_to_token.push(token);
            doc_freqs.push(df);
        }

        info!(
            size_before,
            size_after = id_to_token.len(),
            num_documents,
            "Built vocabulary"
        );

        Ok(Self {
            token_to_id,
            id_to_token,
            doc_freqs,
            num_documents,
        })
    }

    /// Number of retained tokens.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Number of documents the vocabulary was built from.
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    /// Identifier for a token, if it survived filtering.
    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Token for an identifier. Identifiers are contiguous from zero.
    pub fn token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(String::as_str)
    }

    /// Document frequency of a retained token.
    pub fn doc_frequency(&self, id: u32) -> Option<u32> {
        self.doc_freqs.get(id as usize).copied()
    }
}
