//! Sentence embeddings.
//!
//! - [`SentenceEmbedder`] is the seam the evaluator depends on.
//! - [`MiniLmEmbedder`] runs a BERT-family sentence-transformer with candle, or a
//!   deterministic stub.
//! - [`CachedEmbedder`] memoizes any embedder per sentence.

/// BERT encoder body used by the MiniLM embedder.
pub mod bert;
/// Per-sentence memoization.
pub mod cached;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// MiniLM embedder.
pub mod minilm;
/// Tokenizer loading helpers.
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use cached::CachedEmbedder;
pub use config::EmbedderConfig;
pub use error::EmbeddingError;
pub use minilm::MiniLmEmbedder;

/// Maps a sentence to a fixed-length vector.
///
/// Implementations must be deterministic for a given sentence and safe to call from
/// several threads.
pub trait SentenceEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds each text in order; fails on the first error.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Dimension of every vector this embedder returns.
    fn dimension(&self) -> usize;
}

impl<E: SentenceEmbedder + ?Sized> SentenceEmbedder for Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}
