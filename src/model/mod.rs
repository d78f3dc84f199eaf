// Topic modeling — the trained artifact, its hyperparameters, and the
// pluggable trainer/scorer seams.

pub mod coherence;
pub mod gibbs;
pub mod traits;

use serde::{Deserialize, Serialize};

/// Hyperparameters fixed at model creation. Immutable once training starts.
///
/// The two construction paths carry the reference pipeline's tuning: the
/// search phase favors speed (small chunks, fewer passes, symmetric low
/// priors), the final phase favors quality (large chunks, more passes,
/// asymmetric priors). Both share the same seed so runs are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Number of latent topics (K)
    pub num_topics: usize,
    /// Document-topic prior concentration
    pub alpha: f64,
    /// Topic-term prior concentration
    pub eta: f64,
    /// Full sweeps over the corpus
    pub passes: usize,
    /// Documents per progress chunk within a pass
    pub chunk_size: usize,
    /// Seed for the sampler's RNG
    pub seed: u64,
}

impl TrainingParams {
    /// Fast settings for the coherence-driven topic-count search.
    pub fn search_phase(num_topics: usize, seed: u64) -> Self {
        Self {
            num_topics,
            alpha: 0.1,
            eta: 0.1,
            passes: 10,
            chunk_size: 100,
            seed,
        }
    }

    /// Production settings for the one final model.
    pub fn final_phase(num_topics: usize, seed: u64) -> Self {
        Self {
            num_topics,
            alpha: 0.05,
            eta: 0.3,
            passes: 20,
            chunk_size: 2000,
            seed,
        }
    }
}

/// A trained topic model: for each of K topics a probability distribution
/// over vocabulary identifiers, and for each document a mixture over topics.
/// Never mutated after training completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicModel {
    num_topics: usize,
    /// K rows of vocabulary-length probabilities, each summing to one
    topic_term: Vec<Vec<f64>>,
    /// One topic mixture per training document
    doc_topic: Vec<Vec<f64>>,
    params: TrainingParams,
}

impl TopicModel {
    pub(crate) fn new(
        topic_term: Vec<Vec<f64>>,
        doc_topic: Vec<Vec<f64>>,
        params: TrainingParams,
    ) -> Self {
        Self {
            num_topics: topic_term.len(),
            topic_term,
            doc_topic,
            params,
        }
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    /// Term distribution for one topic (vocabulary-length probability row).
    pub fn topic_terms(&self, topic: usize) -> &[f64] {
        &self.topic_term[topic]
    }

    /// Topic mixture for one training document.
    pub fn document_topics(&self, document: usize) -> &[f64] {
        &self.doc_topic[document]
    }

    /// The `n` highest-weight term identifiers of a topic, in descending
    /// weight order. Ties break on identifier so output is reproducible.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<(u32, f64)> {
        let mut weighted: Vec<(u32, f64)> = self.topic_term[topic]
            .iter()
            .enumerate()
            .map(|(id, &weight)| (id as u32, weight))
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        weighted.truncate(n);
        weighted
    }
}
