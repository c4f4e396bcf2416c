use super::*;

use crate::config::SystemPrompt;
use crate::embedding::MiniLmEmbedder;
use crate::evaluation::{Decision, EvaluationConfig};
use crate::transform::{InvokerConfig, MockTransformBackend, ServiceError};

fn pipeline(
    backend: MockTransformBackend,
) -> VerificationPipeline<MockTransformBackend, MiniLmEmbedder> {
    let invoker = TransformInvoker::new(
        backend,
        SystemPrompt::new("Paraphrase the text."),
        InvokerConfig::default(),
    );
    let evaluator =
        SimilarityEvaluator::new(MiniLmEmbedder::stub().unwrap(), EvaluationConfig::default());
    VerificationPipeline::new(invoker, evaluator)
}

#[tokio::test]
async fn test_identity_transformation_is_accepted() {
    let pipeline = pipeline(MockTransformBackend::echo());

    let outcome = pipeline
        .run("The sky is blue. It is sunny today.")
        .await
        .unwrap();

    assert_eq!(outcome.output(), Some("The sky is blue. It is sunny today."));
    let record = outcome.record().unwrap();
    assert_eq!(record.similarities().len(), 2);
    assert_eq!(record.decision(), Decision::Accepted);
}

#[tokio::test]
async fn test_failed_transformation_skips_evaluation() {
    let pipeline = pipeline(MockTransformBackend::always(Err(
        ServiceError::Authentication {
            message: "bad key".to_string(),
        },
    )));

    let outcome = pipeline.run("Hallo Welt.").await.unwrap();

    assert_eq!(outcome, PipelineOutcome::Skipped);
    assert!(outcome.record().is_none());
    assert_eq!(pipeline.invoker().backend().call_count(), 1);
}

#[tokio::test]
async fn test_retried_transformation_is_evaluated() {
    let pipeline = pipeline(MockTransformBackend::with_script([
        Err(ServiceError::Timeout),
        Ok("Hallo Welt.".to_string()),
    ]));

    let outcome = pipeline.run("Hallo Welt.").await.unwrap();

    assert!(outcome.record().is_some_and(|r| r.is_accepted()));
    assert_eq!(pipeline.invoker().backend().call_count(), 2);
}

#[tokio::test]
async fn test_alignment_error_propagates() {
    let pipeline = pipeline(MockTransformBackend::always(Ok(
        "The weather is nice. It really is.".to_string(),
    )));

    let err = pipeline
        .run("Heute ist das Wetter sehr schön.")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EvaluationError::SentenceCountMismatch {
            input: 1,
            output: 2
        }
    ));
}

#[tokio::test]
async fn test_stub_embeddings_reject_rewritten_text() {
    let pipeline = pipeline(MockTransformBackend::always(Ok(
        "Bananas are yellow. Cats sleep a lot.".to_string(),
    )));

    let outcome = pipeline
        .run("The sky is blue. It is sunny today.")
        .await
        .unwrap();

    assert_eq!(
        outcome.record().map(SimilarityRecord::decision),
        Some(Decision::Rejected)
    );
}
