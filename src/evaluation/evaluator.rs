use tracing::{debug, info, warn};

use crate::constants::validate_embedding_dim;
use crate::embedding::SentenceEmbedder;
use crate::segmentation::SentenceSegmenter;

use super::error::EvaluationError;
use super::similarity::{cosine_similarity, mean};
use super::types::{EvaluationConfig, SentencePair, SimilarityRecord};

/// Scores how faithfully an output text preserves the meaning of an input text,
/// sentence by sentence.
pub struct SimilarityEvaluator<E> {
    embedder: E,
    segmenter: SentenceSegmenter,
    config: EvaluationConfig,
}

impl<E: std::fmt::Debug> std::fmt::Debug for SimilarityEvaluator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEvaluator")
            .field("embedder", &self.embedder)
            .field("locales", &self.segmenter.locales())
            .field("threshold", &self.config.threshold())
            .finish()
    }
}

impl<E: SentenceEmbedder> SimilarityEvaluator<E> {
    pub fn new(embedder: E, config: EvaluationConfig) -> Self {
        Self {
            embedder,
            segmenter: SentenceSegmenter::default(),
            config,
        }
    }

    pub fn with_segmenter(mut self, segmenter: SentenceSegmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn threshold(&self) -> f32 {
        self.config.threshold()
    }

    /// Pairs sentences by position, embeds both sides and averages the per-pair cosine
    /// similarities.
    ///
    /// # Errors
    ///
    /// - [`EvaluationError::SentenceCountMismatch`] when the texts segment into different
    ///   numbers of sentences. Nothing is embedded in that case.
    /// - [`EvaluationError::EmptyText`] when both texts have no sentences.
    /// - [`EvaluationError::Embedding`] / [`EvaluationError::Dimension`] when the embedder
    ///   fails or returns vectors of the wrong size.
    pub fn evaluate(
        &self,
        input_text: &str,
        output_text: &str,
    ) -> Result<SimilarityRecord, EvaluationError> {
        let input_sentences = self.segmenter.split(input_text);
        let output_sentences = self.segmenter.split(output_text);

        if input_sentences.len() != output_sentences.len() {
            warn!(
                input = input_sentences.len(),
                output = output_sentences.len(),
                "Sentence counts differ, cannot align"
            );
            return Err(EvaluationError::SentenceCountMismatch {
                input: input_sentences.len(),
                output: output_sentences.len(),
            });
        }

        if input_sentences.is_empty() {
            warn!("Both texts are empty after segmentation");
            return Err(EvaluationError::EmptyText);
        }

        debug!(sentences = input_sentences.len(), "Embedding aligned sentences");

        let input_embeddings = self.embedder.embed_batch(&input_sentences)?;
        let output_embeddings = self.embedder.embed_batch(&output_sentences)?;

        let expected = self.embedder.dimension();
        for embedding in input_embeddings.iter().chain(output_embeddings.iter()) {
            validate_embedding_dim(embedding.len(), expected)?;
        }

        let similarities: Vec<f32> = input_embeddings
            .iter()
            .zip(output_embeddings.iter())
            .map(|(a, b)| cosine_similarity(a, b))
            .collect();

        let final_score = mean(&similarities).ok_or(EvaluationError::EmptyText)?;

        let pairs = input_sentences
            .iter()
            .zip(output_sentences.iter())
            .map(|(input, output)| SentencePair {
                input: (*input).to_string(),
                output: (*output).to_string(),
            })
            .collect();

        let record = SimilarityRecord::new(pairs, similarities, final_score, self.threshold());

        for (index, score) in record.similarities().iter().enumerate() {
            debug!(index, score, "Sentence similarity");
        }

        info!(
            sentences = record.similarities().len(),
            final_score = record.final_score(),
            threshold = record.threshold(),
            decision = %record.decision(),
            "Evaluation complete"
        );

        Ok(record)
    }
}
