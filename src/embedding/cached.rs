use std::sync::Arc;

use moka::sync::Cache;
use tracing::trace;

use super::SentenceEmbedder;
use super::error::EmbeddingError;
use crate::constants::DEFAULT_EMBEDDING_CACHE_CAPACITY;
use crate::hashing::hash_sentence;

/// Memoizes per-sentence embeddings keyed by the BLAKE3 hash of the sentence.
///
/// Errors are never cached; a failed sentence is re-embedded on the next call.
pub struct CachedEmbedder<E> {
    inner: E,
    entries: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl<E: SentenceEmbedder> CachedEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self::with_capacity(inner, DEFAULT_EMBEDDING_CACHE_CAPACITY)
    }

    /// Creates a cache with a max entry capacity.
    pub fn with_capacity(inner: E, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of cached sentences (eventually consistent, see moka).
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, sentence: &str) -> bool {
        self.entries.contains_key(&hash_sentence(sentence))
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl<E: SentenceEmbedder> SentenceEmbedder for CachedEmbedder<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = hash_sentence(text);

        if let Some(hit) = self.entries.get(&key) {
            trace!(text_len = text.len(), "Embedding cache hit");
            return Ok(hit.as_ref().clone());
        }

        let embedding = self.inner.embed(text)?;
        self.entries.insert(key, Arc::new(embedding.clone()));
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for CachedEmbedder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEmbedder")
            .field("inner", &self.inner)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
