// Trainer and scorer traits — swap-ready abstractions.
//
// The pipeline treats topic-model training and coherence scoring as
// capabilities behind these seams, so the inference method can be replaced
// without touching collocation, vocabulary, search, or reporting code.

use super::{TopicModel, TrainingParams};
use crate::corpus::encoding::EncodedDocument;
use crate::corpus::vocabulary::Vocabulary;
use crate::corpus::Document;
use crate::error::Result;

/// Trains one topic model over a sparse-encoded corpus.
pub trait TopicModeler {
    /// Train a model with the given hyperparameters. Must be deterministic
    /// for identical inputs, hyperparameters, and seed.
    fn train(
        &self,
        corpus: &[EncodedDocument],
        vocabulary: &Vocabulary,
        params: &TrainingParams,
    ) -> Result<TopicModel>;
}

/// Scores a trained model's semantic consistency against the raw token
/// sequences (coherence works on token co-occurrence, not sparse counts).
pub trait CoherenceScorer {
    /// One scalar per model; higher is better.
    fn score(
        &self,
        model: &TopicModel,
        texts: &[Document],
        vocabulary: &Vocabulary,
    ) -> Result<f64>;
}
