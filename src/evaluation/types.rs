use serde::Serialize;

use crate::config::{Config, ConfigError, validate_threshold};
use crate::constants::DEFAULT_ACCEPTANCE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Accept/reject outcome of one evaluation.
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    /// `Accepted` iff `final_score >= threshold`.
    pub fn from_score(final_score: f32, threshold: f32) -> Self {
        if final_score >= threshold {
            Decision::Accepted
        } else {
            Decision::Rejected
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Accepted => write!(f, "ACCEPTED"),
            Decision::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// An input sentence and the output sentence at the same position.
pub struct SentencePair {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Result of one evaluation; never mutated after construction.
pub struct SimilarityRecord {
    pairs: Vec<SentencePair>,
    similarities: Vec<f32>,
    final_score: f32,
    decision: Decision,
    threshold: f32,
}

impl SimilarityRecord {
    pub(crate) fn new(
        pairs: Vec<SentencePair>,
        similarities: Vec<f32>,
        final_score: f32,
        threshold: f32,
    ) -> Self {
        Self {
            decision: Decision::from_score(final_score, threshold),
            pairs,
            similarities,
            final_score,
            threshold,
        }
    }

    /// Aligned sentence pairs, in sentence order.
    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    /// One score in `[-1, 1]` per pair, in sentence order.
    pub fn similarities(&self) -> &[f32] {
        &self.similarities
    }

    /// Arithmetic mean of [`similarities`](Self::similarities).
    pub fn final_score(&self) -> f32 {
        self.final_score
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_accepted(&self) -> bool {
        self.decision.is_accepted()
    }
}

impl std::fmt::Display for SimilarityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (final_score: {:.4}, threshold: {:.2}, sentences: {})",
            self.decision,
            self.final_score,
            self.threshold,
            self.similarities.len()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Evaluator settings, fixed for the evaluator's lifetime.
pub struct EvaluationConfig {
    threshold: f32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }
}

impl EvaluationConfig {
    /// Fails unless `threshold` lies in `[-1, 1]` (NaN included).
    pub fn new(threshold: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl TryFrom<&Config> for EvaluationConfig {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        Self::new(config.threshold)
    }
}
