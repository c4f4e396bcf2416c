use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::{Config, SystemPrompt};
use crate::constants::{DEFAULT_MAX_TOKENS, DEFAULT_MAX_TRIES, DEFAULT_MODEL, MAX_BACKOFF_EXPONENT};

use super::backend::TransformBackend;
use super::types::{
    AttemptOutcome, InvocationState, InvocationTrace, TransformAttempt, TransformRequest,
    TransformResult,
};

/// Settings for [`TransformInvoker`].
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Response length cap.
    pub max_tokens: u32,
    /// Attempt budget used by [`TransformInvoker::invoke`].
    pub max_tries: u32,
    /// Backoff base between transient failures. Zero disables the delay.
    pub retry_base_delay: Duration,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_tries: DEFAULT_MAX_TRIES,
            retry_base_delay: Duration::ZERO,
        }
    }
}

impl From<&Config> for InvokerConfig {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            max_tries: config.max_tries,
            retry_base_delay: config.retry_base_delay,
        }
    }
}

/// Turns input text into transformed text, hiding transient failures behind a bounded
/// retry loop.
///
/// Every failure path surfaces as `None`; which one was taken is visible only in the logs
/// and in [`InvocationTrace`].
pub struct TransformInvoker<B: TransformBackend> {
    backend: B,
    system_prompt: SystemPrompt,
    config: InvokerConfig,
}

impl<B: TransformBackend> std::fmt::Debug for TransformInvoker<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformInvoker")
            .field("system_prompt", &self.system_prompt)
            .field("config", &self.config)
            .finish()
    }
}

impl<B: TransformBackend> TransformInvoker<B> {
    pub fn new(backend: B, system_prompt: SystemPrompt, config: InvokerConfig) -> Self {
        Self {
            backend,
            system_prompt,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Transforms `input` using the configured attempt budget.
    pub async fn invoke(&self, input: &str) -> TransformResult {
        self.invoke_with_tries(input, self.config.max_tries).await
    }

    /// Transforms `input` with an explicit attempt budget.
    pub async fn invoke_with_tries(&self, input: &str, max_tries: u32) -> TransformResult {
        self.invoke_traced(input, max_tries).await.into_result()
    }

    /// Runs the retry state machine and returns every attempt it made.
    pub async fn invoke_traced(&self, input: &str, max_tries: u32) -> InvocationTrace {
        if input.trim().is_empty() {
            error!("Input text is empty. Nothing to transform.");
            return InvocationTrace {
                attempts: Vec::new(),
                state: InvocationState::AbortedFatal,
            };
        }

        let request = TransformRequest::new(
            input,
            self.system_prompt.clone(),
            self.config.model.clone(),
            self.config.max_tokens,
        );

        let mut attempts = Vec::new();
        let mut state = InvocationState::start(max_tries);

        while let InvocationState::Attempting(index) = state {
            debug!(attempt = index, max_tries, "Calling transformation service");

            let outcome = AttemptOutcome::from_result(self.backend.complete(&request).await);
            state = state.advance(&outcome, max_tries);
            self.report(index, max_tries, &outcome, state);

            attempts.push(TransformAttempt { index, outcome });

            if let InvocationState::Attempting(next) = state {
                self.backoff(next).await;
            }
        }

        if state == InvocationState::AbortedExhausted {
            error!(
                attempts = attempts.len(),
                max_tries, "Max retries reached. API call failed."
            );
        }

        InvocationTrace { attempts, state }
    }

    fn report(&self, index: u32, max_tries: u32, outcome: &AttemptOutcome, next: InvocationState) {
        match outcome {
            AttemptOutcome::Success(text) => {
                info!(
                    attempt = index,
                    output_len = text.len(),
                    "Transformation succeeded"
                );
            }
            AttemptOutcome::RetryableFailure(err) => {
                warn!(
                    attempt = index,
                    max_tries,
                    code = err.code(),
                    error = %err,
                    next = %next,
                    "{}",
                    err.diagnostic()
                );
            }
            AttemptOutcome::FatalFailure(err) => {
                error!(
                    attempt = index,
                    max_tries,
                    code = err.code(),
                    error = %err,
                    "{}",
                    err.diagnostic()
                );
            }
        }
    }

    async fn backoff(&self, next_attempt: u32) {
        let delay = backoff_delay(self.config.retry_base_delay, next_attempt - 1);
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "Backing off before retry");
            sleep(delay).await;
        }
    }
}

/// `base * 2^min(attempt, MAX_BACKOFF_EXPONENT)`.
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let multiplier = 2u32.pow(attempt.min(MAX_BACKOFF_EXPONENT));
    base * multiplier
}
