//! Sentence-aligned similarity evaluation.
//!
//! Both texts are segmented into sentences and paired by position only. Unequal counts
//! fail fast with [`EvaluationError::SentenceCountMismatch`]; nothing is truncated or
//! padded. Each pair is scored with cosine similarity and the mean is compared against
//! the threshold (`>=` accepts).

pub mod error;
pub mod evaluator;
pub mod similarity;
pub mod types;


pub use error::EvaluationError;
pub use evaluator::SimilarityEvaluator;
pub use similarity::{cosine_similarity, mean};
pub use types::{Decision, EvaluationConfig, SentencePair, SimilarityRecord};
