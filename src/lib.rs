//! Fidelity library crate (used by the CLI and integration tests).
//!
//! Sends a text to an LLM for transformation (translation, paraphrase, ...) and checks
//! that the result keeps the meaning of the input, sentence by sentence.
//!
//! ## Transformation
//! - [`TransformInvoker`] - bounded, error-classified retry loop returning `Option<String>`
//! - [`TransformBackend`], [`OpenAiBackend`] - transport seam and its HTTP implementation
//! - [`ServiceError`], [`FailureClass`] - failure kinds and retry classification
//!
//! ## Evaluation
//! - [`SimilarityEvaluator`] - sentence-aligned cosine scoring with a threshold decision
//! - [`SentenceSegmenter`] - locale-aware sentence splitting
//! - [`SentenceEmbedder`], [`MiniLmEmbedder`], [`CachedEmbedder`] - sentence embeddings
//!
//! ## Wiring
//! - [`Config`] - environment-backed process configuration
//! - [`VerificationPipeline`] - transform then evaluate
//!
//! ## Test/Mock Support
//! [`MockTransformBackend`](transform::MockTransformBackend) is available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod evaluation;
pub mod hashing;
pub mod pipeline;
pub mod segmentation;
pub mod transform;

pub use config::{ApiKey, Config, ConfigError, SystemPrompt};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use embedding::{
    CachedEmbedder, EmbedderConfig, EmbeddingError, MiniLmEmbedder, SentenceEmbedder,
};
pub use evaluation::{
    Decision, EvaluationConfig, EvaluationError, SentencePair, SimilarityEvaluator,
    SimilarityRecord, cosine_similarity,
};
pub use pipeline::{PipelineOutcome, VerificationPipeline};
pub use segmentation::{Locale, SentenceSegmenter};
#[cfg(any(test, feature = "mock"))]
pub use transform::MockTransformBackend;
pub use transform::{
    AttemptOutcome, FailureClass, InvocationState, InvocationTrace, InvokerConfig,
    OpenAiBackend, ServiceError, TransformAttempt, TransformBackend, TransformInvoker,
    TransformRequest, TransformResult,
};
