// Coherence-driven search over candidate topic counts.
//
// Trains one model per candidate k, scores it, and returns the results in
// strictly increasing k order. The loop is sequential and blocking: no
// candidate starts before the previous one's model and score are complete.
// The engine only measures — picking a winner is the caller's job.

use tracing::{info, warn};

use super::PreparedCorpus;
use crate::error::{PipelineError, Result};
use crate::model::traits::{CoherenceScorer, TopicModeler};
use crate::model::{TopicModel, TrainingParams};

/// Candidate topic counts: `start, start+step, ...` while below `limit`.
#[derive(Debug, Clone, Copy)]
pub struct SearchRange {
    pub start: usize,
    pub limit: usize,
    pub step: usize,
}

impl Default for SearchRange {
    fn default() -> Self {
        Self {
            start: 5,
            limit: 35,
            step: 5,
        }
    }
}

impl SearchRange {
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.limit || self.step == 0 {
            return Err(PipelineError::InvalidRange {
                start: self.start,
                limit: self.limit,
                step: self.step,
            });
        }
        Ok(())
    }

    /// The candidate topic counts, in increasing order.
    pub fn candidates(&self) -> Vec<usize> {
        (self.start..self.limit).step_by(self.step).collect()
    }

    pub fn num_candidates(&self) -> usize {
        if self.start >= self.limit || self.step == 0 {
            return 0;
        }
        (self.limit - self.start).div_ceil(self.step)
    }
}

/// What to do when one candidate fails to train or score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole search (correctness by default)
    #[default]
    Abort,
    /// Record the failure, log it, and continue with the next candidate
    Skip,
}

/// Incremental progress events emitted by the search loop, so a long run is
/// observable without coupling the engine to any output device.
#[derive(Debug, Clone)]
pub enum SearchProgress {
    Started { num_candidates: usize },
    CandidateStarted { num_topics: usize },
    CandidateScored { num_topics: usize, coherence: f64 },
    CandidateFailed { num_topics: usize },
}

/// One completed candidate.
#[derive(Debug)]
pub struct SearchCandidate {
    pub num_topics: usize,
    pub model: TopicModel,
    pub coherence: f64,
}

/// A candidate that failed under `FailurePolicy::Skip`.
#[derive(Debug, Clone)]
pub struct SearchFailure {
    pub num_topics: usize,
    pub error: PipelineError,
}

/// All candidates tried, in increasing topic-count order.
#[derive(Debug, Default)]
pub struct SearchResult {
    pub candidates: Vec<SearchCandidate>,
    pub failures: Vec<SearchFailure>,
}

impl SearchResult {
    /// Convenience lookup of the maximum-coherence candidate.
    pub fn best(&self) -> Option<&SearchCandidate> {
        self.candidates.iter().max_by(|a, b| {
            a.coherence
                .partial_cmp(&b.coherence)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// Sequential search engine over a trainer/scorer pair.
pub struct ModelSearchEngine<'a> {
    trainer: &'a dyn TopicModeler,
    scorer: &'a dyn CoherenceScorer,
    policy: FailurePolicy,
    seed: u64,
}

impl<'a> ModelSearchEngine<'a> {
    pub fn new(trainer: &'a dyn TopicModeler, scorer: &'a dyn CoherenceScorer, seed: u64) -> Self {
        Self {
            trainer,
            scorer,
            policy: FailurePolicy::default(),
            seed,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Train and score one model per candidate topic count.
    ///
    /// `observe` receives progress events as each candidate completes; the
    /// engine itself never prints.
    pub fn run(
        &self,
        corpus: &PreparedCorpus,
        range: SearchRange,
        observe: &mut dyn FnMut(SearchProgress),
    ) -> Result<SearchResult> {
        range.validate()?;

        observe(SearchProgress::Started {
            num_candidates: range.num_candidates(),
        });

        let mut result = SearchResult::default();
        for num_topics in range.candidates() {
            observe(SearchProgress::CandidateStarted { num_topics });

            match self.evaluate(corpus, num_topics) {
                Ok((model, coherence)) => {
                    info!(num_topics, coherence, "Candidate scored");
                    observe(SearchProgress::CandidateScored {
                        num_topics,
                        coherence,
                    });
                    result.candidates.push(SearchCandidate {
                        num_topics,
                        model,
                        coherence,
                    });
                }
                Err(error) => match self.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Skip => {
                        warn!(num_topics, %error, "Candidate failed, skipping");
                        observe(SearchProgress::CandidateFailed { num_topics });
                        result.failures.push(SearchFailure { num_topics, error });
                    }
                },
            }
        }

        Ok(result)
    }

    fn evaluate(&self, corpus: &PreparedCorpus, num_topics: usize) -> Result<(TopicModel, f64)> {
        let params = TrainingParams::search_phase(num_topics, self.seed);
        let model = self
            .trainer
            .train(&corpus.encoded, &corpus.vocabulary, &params)?;
        let coherence = self
            .scorer
            .score(&model, &corpus.documents, &corpus.vocabulary)
            .map_err(|err| match err {
                // A scoring failure is still attributable to this candidate.
                PipelineError::Training { .. } => err,
                other => PipelineError::training(num_topics, other.to_string()),
            })?;
        Ok((model, coherence))
    }
}
