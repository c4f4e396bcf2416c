//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! Both sides of an evaluation are embedded with the same embedder, so every vector that
//! reaches the similarity step must share one dimension. [`validate_embedding_dim`] is the
//! check used at that boundary; [`DEFAULT_EMBEDDING_DIM`] matches the MiniLM-L6 family.

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 0.70;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_MAX_TOKENS: u32 = 300;

pub const DEFAULT_MAX_TRIES: u32 = 3;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;

/// Upper bound on the backoff exponent (`base * 2^n`).
pub const MAX_BACKOFF_EXPONENT: u32 = 5;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use fidelity::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
