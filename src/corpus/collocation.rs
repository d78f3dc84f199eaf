// Collocation detection — merge statistically frequent adjacent token pairs
// into single compound tokens ("new" + "york" -> "new_york").
//
// Scoring follows the classic phrase formula: a pair is promoted to a rule
// when it occurs at least `min_count` times and
//   (count(a,b) - min_count) * total_tokens / (count(a) * count(b))
// exceeds `threshold`. Rules are built once per corpus and applied
// functionally; detection and application are fully deterministic.

use std::collections::HashMap;

use tracing::info;

use super::Document;

/// Tuning knobs for collocation detection.
#[derive(Debug, Clone)]
pub struct CollocationParams {
    /// Minimum number of corpus-wide occurrences before a pair is considered
    pub min_count: u32,
    /// Minimum collocation score for a pair to become a rule
    pub threshold: f64,
}

impl Default for CollocationParams {
    fn default() -> Self {
        Self {
            min_count: 3,
            threshold: 10.0,
        }
    }
}

/// One retained collocation: an ordered token pair mapped to its merged form.
#[derive(Debug, Clone)]
pub struct CollocationRule {
    /// The compound token the pair collapses into (left + "_" + right)
    pub merged: String,
    /// The frequency-derived score that promoted this pair
    pub score: f64,
}

/// The rule set detected from one corpus. Immutable after detection.
#[derive(Debug, Clone, Default)]
pub struct CollocationModel {
    rules: HashMap<(String, String), CollocationRule>,
}

impl CollocationModel {
    /// Scan the document collection and build the rule set.
    ///
    /// An empty collection yields an empty rule set; documents shorter than
    /// two tokens contribute no pairs.
    pub fn detect(documents: &[Document], params: &CollocationParams) -> Self {
        let mut unigrams: HashMap<&str, u64> = HashMap::new();
        let mut bigrams: HashMap<(&str, &str), u64> = HashMap::new();
        let mut total_tokens: u64 = 0;

        for doc in documents {
            total_tokens += doc.len() as u64;
            for token in doc {
                *unigrams.entry(token.as_str()).or_insert(0) += 1;
            }
            for pair in doc.windows(2) {
                *bigrams
                    .entry((pair[0].as_str(), pair[1].as_str()))
                    .or_insert(0) += 1;
            }
        }

        let mut rules = HashMap::new();
        for ((left, right), pair_count) in &bigrams {
            if *pair_count < u64::from(params.min_count) {
                continue;
            }
            let left_count = unigrams[left];
            let right_count = unigrams[right];
            let score = (*pair_count - u64::from(params.min_count)) as f64
                * total_tokens as f64
                / (left_count as f64 * right_count as f64);
            if score > params.threshold {
                rules.insert(
                    (left.to_string(), right.to_string()),
                    CollocationRule {
                        merged: format!("{left}_{right}"),
                        score,
                    },
                );
            }
        }

        info!(
            rules = rules.len(),
            candidate_pairs = bigrams.len(),
            total_tokens,
            "Detected collocations"
        );

        Self { rules }
    }

    /// Number of retained rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up the rule for an ordered pair, if one was retained.
    pub fn rule(&self, left: &str, right: &str) -> Option<&CollocationRule> {
        // Keyed lookup without allocating would need a borrowed pair key;
        // rule application is not on a hot path for short posts.
        self.rules.get(&(left.to_string(), right.to_string()))
    }

    /// Apply the rule set to one document: scan left to right and greedily
    /// merge the first matching pair at each position. A token consumed by a
    /// merge is not reconsidered for the next pair, so merges never overlap.
    pub fn apply(&self, document: &Document) -> Document {
        let mut merged = Vec::with_capacity(document.len());
        let mut i = 0;
        while i < document.len() {
            if i + 1 < document.len() {
                if let Some(rule) = self.rule(&document[i], &document[i + 1]) {
                    merged.push(rule.merged.clone());
                    i += 2;
                    continue;
                }
            }
            merged.push(document[i].clone());
            i += 1;
        }
        merged
    }

    /// Apply the rule set to the whole collection.
    pub fn apply_all(&self, documents: &[Document]) -> Vec<Document> {
        documents.iter().map(|doc| self.apply(doc)).collect()
    }
}
