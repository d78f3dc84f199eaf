// Window-based topic coherence.
//
// Measures how often a topic's top terms actually co-occur in the source
// texts: boolean sliding windows over each document, NPMI for every pair of
// top terms, averaged per topic and then across topics. This is the
// co-occurrence core of the c_v metric family; higher is better, with values
// in [-1, 1].

use std::collections::HashSet;

use super::traits::CoherenceScorer;
use super::TopicModel;
use crate::corpus::vocabulary::Vocabulary;
use crate::corpus::Document;
use crate::error::{PipelineError, Result};

/// Sliding-window NPMI coherence scorer.
#[derive(Debug, Clone, Copy)]
pub struct WindowCoherence {
    /// Top terms per topic entering the pairwise statistics
    pub top_terms: usize,
    /// Sliding-window width in tokens; shorter documents form one window
    pub window_size: usize,
}

impl Default for WindowCoherence {
    fn default() -> Self {
        Self {
            top_terms: 10,
            window_size: 110,
        }
    }
}

impl CoherenceScorer for WindowCoherence {
    fn score(
        &self,
        model: &TopicModel,
        texts: &[Document],
        vocabulary: &Vocabulary,
    ) -> Result<f64> {
        let windows = build_windows(texts, vocabulary, self.window_size);
        if windows.is_empty() {
            return Err(PipelineError::empty_input(
                "no in-vocabulary text windows for coherence scoring",
            ));
        }

        let num_windows = windows.len() as f64;
        let mut topic_scores = Vec::with_capacity(model.num_topics());

        for topic in 0..model.num_topics() {
            let top: Vec<u32> = model
                .top_terms(topic, self.top_terms)
                .into_iter()
                .map(|(id, _)| id)
                .collect();

            // Occurrence and pairwise co-occurrence counts over windows.
            let mut occurs = vec![0u64; top.len()];
            let mut cooccurs = vec![vec![0u64; top.len()]; top.len()];
            for window in &windows {
                for (i, &term) in top.iter().enumerate() {
                    if !window.contains(&term) {
                        continue;
                    }
                    occurs[i] += 1;
                    for (j, &other) in top.iter().enumerate().skip(i + 1) {
                        if window.contains(&other) {
                            cooccurs[i][j] += 1;
                        }
                    }
                }
            }

            let mut npmi_sum = 0.0;
            let mut pairs = 0usize;
            for i in 0..top.len() {
                for j in (i + 1)..top.len() {
                    npmi_sum += npmi(
                        occurs[i] as f64 / num_windows,
                        occurs[j] as f64 / num_windows,
                        cooccurs[i][j] as f64 / num_windows,
                    );
                    pairs += 1;
                }
            }

            topic_scores.push(if pairs > 0 {
                npmi_sum / pairs as f64
            } else {
                0.0
            });
        }

        if topic_scores.is_empty() {
            return Ok(0.0);
        }
        Ok(topic_scores.iter().sum::<f64>() / topic_scores.len() as f64)
    }
}

/// Normalized pointwise mutual information for one term pair.
/// Never-co-occurring pairs score -1, always-co-occurring pairs score 1.
fn npmi(p_i: f64, p_j: f64, p_ij: f64) -> f64 {
    if p_ij <= 0.0 || p_i <= 0.0 || p_j <= 0.0 {
        return -1.0;
    }
    if p_ij >= 1.0 {
        return 1.0;
    }
    (p_ij / (p_i * p_j)).ln() / -p_ij.ln()
}

/// Turn documents into boolean windows of in-vocabulary identifiers.
/// Documents at or under `window_size` tokens become a single window;
/// longer ones slide one token at a time. Empty windows are dropped.
fn build_windows(
    texts: &[Document],
    vocabulary: &Vocabulary,
    window_size: usize,
) -> Vec<HashSet<u32>> {
    let mut windows = Vec::new();
    for doc in texts {
        let ids: Vec<Option<u32>> = doc.iter().map(|token| vocabulary.id(token)).collect();
        if ids.len() <= window_size.max(1) {
            let window: HashSet<u32> = ids.iter().flatten().copied().collect();
            if !window.is_empty() {
                windows.push(window);
            }
        } else {
            for chunk in ids.windows(window_size.max(1)) {
                let window: HashSet<u32> = chunk.iter().flatten().copied().collect();
                if !window.is_empty() {
                    windows.push(window);
                }
            }
        }
    }
    windows
}
