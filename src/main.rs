//! Fidelity CLI: transform a text with the configured model and check that the result
//! preserves its meaning sentence by sentence.
//!
//! Usage: `fidelity [TEXT...]`. Exit code 0 when accepted, 2 when rejected, 1 when no
//! transformation was produced or the texts could not be aligned.

use std::process::ExitCode;

use anyhow::Context;
use mimalloc::MiMalloc;

use fidelity::config::{Config, SystemPrompt};
use fidelity::embedding::{CachedEmbedder, EmbedderConfig, MiniLmEmbedder};
use fidelity::evaluation::{EvaluationConfig, SimilarityEvaluator};
use fidelity::pipeline::{PipelineOutcome, VerificationPipeline};
use fidelity::transform::{InvokerConfig, OpenAiBackend, TransformInvoker};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEMO_INPUT: &str = "Heute ist das Wetter sehr schön.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = if args.is_empty() {
        DEMO_INPUT.to_string()
    } else {
        args.join(" ")
    };

    tracing::info!(
        model = %config.model,
        max_tries = config.max_tries,
        threshold = config.threshold,
        "Fidelity check starting"
    );

    let system_prompt = SystemPrompt::load(&config.prompt_path)?;
    let backend = OpenAiBackend::from_config(&config)?;
    let invoker = TransformInvoker::new(backend, system_prompt, InvokerConfig::from(&config));

    if config.embedding_model_path.is_none() {
        tracing::warn!(
            "No FIDELITY_EMBEDDING_MODEL_PATH configured, running embedder in stub mode"
        );
    }
    let embedder = MiniLmEmbedder::load(EmbedderConfig::from_model_dir(
        config.embedding_model_path.as_deref(),
    ))
    .context("failed to load sentence embedder")?;
    let embedder = CachedEmbedder::with_capacity(embedder, config.embedding_cache_capacity);

    let evaluator = SimilarityEvaluator::new(embedder, EvaluationConfig::try_from(&config)?);
    let pipeline = VerificationPipeline::new(invoker, evaluator);

    match pipeline.run(&input).await? {
        PipelineOutcome::Skipped => {
            eprintln!("No transformation result.");
            Ok(ExitCode::FAILURE)
        }
        PipelineOutcome::Evaluated { output, record } => {
            println!("{output}");
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(if record.is_accepted() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
    }
}
