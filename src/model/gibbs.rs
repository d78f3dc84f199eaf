// Default inference engine: collapsed Gibbs sampling with a seeded RNG.
//
// The sampler keeps three count tables (topic x term, document x topic, and
// per-topic totals), sweeps every token position `passes` times resampling
// its topic assignment from the collapsed conditional, then smooths the
// final counts into probability rows with the Dirichlet priors.
//
// Sweeps are single-threaded and all iteration is over dense vectors, so a
// fixed seed makes training byte-for-byte reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::traits::TopicModeler;
use super::{TopicModel, TrainingParams};
use crate::corpus::encoding::EncodedDocument;
use crate::corpus::vocabulary::Vocabulary;
use crate::error::{PipelineError, Result};

/// Collapsed Gibbs sampling trainer.
#[derive(Debug, Default, Clone, Copy)]
pub struct GibbsTrainer;

impl TopicModeler for GibbsTrainer {
    fn train(
        &self,
        corpus: &[EncodedDocument],
        vocabulary: &Vocabulary,
        params: &TrainingParams,
    ) -> Result<TopicModel> {
        let k = params.num_topics;
        if k == 0 {
            return Err(PipelineError::training(k, "topic count must be positive"));
        }
        if vocabulary.is_empty() {
            return Err(PipelineError::training(k, "vocabulary is empty"));
        }

        // Expand sparse counts into per-position term ids. Entry order is
        // ascending-by-id, so the expansion is deterministic.
        let docs: Vec<Vec<u32>> = corpus
            .iter()
            .map(|doc| {
                let mut positions = Vec::with_capacity(doc.token_total() as usize);
                for &(id, count) in doc.entries() {
                    for _ in 0..count {
                        positions.push(id);
                    }
                }
                positions
            })
            .collect();

        let total_tokens: usize = docs.iter().map(Vec::len).sum();
        if total_tokens == 0 {
            return Err(PipelineError::training(
                k,
                "corpus has no in-vocabulary tokens",
            ));
        }

        let vocab_size = vocabulary.len();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let mut topic_term_counts = vec![vec![0usize; vocab_size]; k];
        let mut doc_topic_counts = vec![vec![0usize; k]; docs.len()];
        let mut topic_totals = vec![0usize; k];

        // Random initial assignment, then resample every position each pass.
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(docs.len());
        for (doc_idx, doc) in docs.iter().enumerate() {
            let mut doc_assignments = Vec::with_capacity(doc.len());
            for &term in doc {
                let topic = rng.random_range(0..k);
                topic_term_counts[topic][term as usize] += 1;
                doc_topic_counts[doc_idx][topic] += 1;
                topic_totals[topic] += 1;
                doc_assignments.push(topic);
            }
            assignments.push(doc_assignments);
        }

        let alpha = params.alpha;
        let eta = params.eta;
        let eta_sum = eta * vocab_size as f64;
        let mut probs = vec![0.0f64; k];

        for pass in 0..params.passes {
            for (doc_idx, doc) in docs.iter().enumerate() {
                for (pos, &term) in doc.iter().enumerate() {
                    let term = term as usize;
                    let old_topic = assignments[doc_idx][pos];

                    topic_term_counts[old_topic][term] -= 1;
                    doc_topic_counts[doc_idx][old_topic] -= 1;
                    topic_totals[old_topic] -= 1;

                    // Collapsed conditional, unnormalized:
                    // (n_dk + alpha) * (n_kw + eta) / (n_k + V*eta)
                    let mut total = 0.0;
                    for topic in 0..k {
                        let doc_part = doc_topic_counts[doc_idx][topic] as f64 + alpha;
                        let term_part = (topic_term_counts[topic][term] as f64 + eta)
                            / (topic_totals[topic] as f64 + eta_sum);
                        let p = doc_part * term_part;
                        total += p;
                        probs[topic] = p;
                    }

                    let threshold = rng.random::<f64>() * total;
                    let mut cumulative = 0.0;
                    let mut new_topic = k - 1;
                    for (topic, &p) in probs.iter().enumerate() {
                        cumulative += p;
                        if cumulative >= threshold {
                            new_topic = topic;
                            break;
                        }
                    }

                    topic_term_counts[new_topic][term] += 1;
                    doc_topic_counts[doc_idx][new_topic] += 1;
                    topic_totals[new_topic] += 1;
                    assignments[doc_idx][pos] = new_topic;
                }

                if params.chunk_size > 0 && (doc_idx + 1) % params.chunk_size == 0 {
                    debug!(pass, documents = doc_idx + 1, "Sampling progress");
                }
            }
        }

        // Smooth counts into probability rows; each topic row sums to one.
        let topic_term: Vec<Vec<f64>> = topic_term_counts
            .iter()
            .enumerate()
            .map(|(topic, counts)| {
                let denom = topic_totals[topic] as f64 + eta_sum;
                counts
                    .iter()
                    .map(|&count| (count as f64 + eta) / denom)
                    .collect()
            })
            .collect();

        let doc_topic: Vec<Vec<f64>> = doc_topic_counts
            .iter()
            .map(|counts| {
                let doc_total: usize = counts.iter().sum();
                let denom = doc_total as f64 + k as f64 * alpha;
                counts
                    .iter()
                    .map(|&count| (count as f64 + alpha) / denom)
                    .collect()
            })
            .collect();

        debug!(
            num_topics = k,
            total_tokens,
            passes = params.passes,
            "Training complete"
        );

        Ok(TopicModel::new(topic_term, doc_topic, params.clone()))
    }
}
