use thiserror::Error;

use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The two texts segment into different numbers of sentences, so positions cannot be
    /// paired.
    #[error("sentence count mismatch: input has {input}, output has {output}")]
    SentenceCountMismatch { input: usize, output: usize },

    /// Both texts segment into zero sentences; there is nothing to score.
    #[error("both texts are empty after segmentation")]
    EmptyText,

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("embedding dimension error: {0}")]
    Dimension(#[from] DimValidationError),
}

impl EvaluationError {
    /// Returns `true` for the alignment failure (unequal sentence counts).
    pub fn is_alignment(&self) -> bool {
        matches!(self, EvaluationError::SentenceCountMismatch { .. })
    }
}
