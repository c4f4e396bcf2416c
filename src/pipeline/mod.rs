//! Transform-then-verify: one invocation followed by one evaluation.

#[cfg(test)]
mod tests;

use tracing::{info, warn};

use crate::embedding::SentenceEmbedder;
use crate::evaluation::{EvaluationError, SimilarityEvaluator, SimilarityRecord};
use crate::transform::{TransformBackend, TransformInvoker};

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The service produced no text; nothing was evaluated.
    Skipped,
    /// The transformed text and its fidelity record.
    Evaluated {
        output: String,
        record: SimilarityRecord,
    },
}

impl PipelineOutcome {
    pub fn record(&self) -> Option<&SimilarityRecord> {
        match self {
            PipelineOutcome::Evaluated { record, .. } => Some(record),
            PipelineOutcome::Skipped => None,
        }
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Evaluated { output, .. } => Some(output),
            PipelineOutcome::Skipped => None,
        }
    }
}

pub struct VerificationPipeline<B: TransformBackend, E> {
    invoker: TransformInvoker<B>,
    evaluator: SimilarityEvaluator<E>,
}

impl<B: TransformBackend, E: SentenceEmbedder> VerificationPipeline<B, E> {
    pub fn new(invoker: TransformInvoker<B>, evaluator: SimilarityEvaluator<E>) -> Self {
        Self { invoker, evaluator }
    }

    pub fn invoker(&self) -> &TransformInvoker<B> {
        &self.invoker
    }

    pub fn evaluator(&self) -> &SimilarityEvaluator<E> {
        &self.evaluator
    }

    /// Transforms `input` with the configured attempt budget, then scores the output
    /// against it.
    ///
    /// # Errors
    ///
    /// Propagates [`EvaluationError`] from the evaluator; a failed transformation is
    /// [`PipelineOutcome::Skipped`], not an error.
    pub async fn run(&self, input: &str) -> Result<PipelineOutcome, EvaluationError> {
        let Some(output) = self.invoker.invoke(input).await else {
            warn!("No transformation result, skipping evaluation");
            return Ok(PipelineOutcome::Skipped);
        };

        let record = self.evaluator.evaluate(input, &output)?;

        info!(
            final_score = record.final_score(),
            decision = %record.decision(),
            "Pipeline finished"
        );

        Ok(PipelineOutcome::Evaluated { output, record })
    }
}
