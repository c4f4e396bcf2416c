use crate::config::SystemPrompt;

use super::error::{FailureClass, ServiceError};

/// Transformed text, or `None` when every path to a result failed.
pub type TransformResult = Option<String>;

/// One request to the transformation service. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRequest {
    input: String,
    system_prompt: SystemPrompt,
    model: String,
    max_tokens: u32,
}

impl TransformRequest {
    /// The invoker refuses blank input before a request is ever built.
    pub fn new(
        input: impl Into<String>,
        system_prompt: SystemPrompt,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            input: input.into(),
            system_prompt,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn system_prompt(&self) -> &SystemPrompt {
        &self.system_prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

/// Tagged outcome of a single attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Success(String),
    RetryableFailure(ServiceError),
    FatalFailure(ServiceError),
}

impl AttemptOutcome {
    /// Tags a backend result with its retry policy.
    pub fn from_result(result: Result<String, ServiceError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(err) => match err.class() {
                FailureClass::Transient => Self::RetryableFailure(err),
                FailureClass::Fatal => Self::FatalFailure(err),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Self::Success(_) => None,
            Self::RetryableFailure(err) | Self::FatalFailure(err) => Some(err),
        }
    }
}

/// One try against the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformAttempt {
    /// 0-based ordinal, always below the attempt budget.
    pub index: u32,
    pub outcome: AttemptOutcome,
}

/// Retry loop state.
///
/// `Idle → Attempting(i) → {Succeeded | Attempting(i+1) | AbortedFatal | AbortedExhausted}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Idle,
    Attempting(u32),
    Succeeded,
    AbortedFatal,
    AbortedExhausted,
}

impl InvocationState {
    /// Leaves `Idle`. A zero budget goes straight to `AbortedExhausted`.
    pub fn start(max_tries: u32) -> Self {
        if max_tries == 0 {
            Self::AbortedExhausted
        } else {
            Self::Attempting(0)
        }
    }

    /// Applies the outcome of the current attempt.
    ///
    /// Terminal states are absorbing; `Idle` ignores outcomes.
    pub fn advance(self, outcome: &AttemptOutcome, max_tries: u32) -> Self {
        match self {
            Self::Attempting(index) => match outcome {
                AttemptOutcome::Success(_) => Self::Succeeded,
                AttemptOutcome::FatalFailure(_) => Self::AbortedFatal,
                AttemptOutcome::RetryableFailure(_) => {
                    let next = index + 1;
                    if next < max_tries {
                        Self::Attempting(next)
                    } else {
                        Self::AbortedExhausted
                    }
                }
            },
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::AbortedFatal | Self::AbortedExhausted
        )
    }
}

impl std::fmt::Display for InvocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Attempting(index) => write!(f, "ATTEMPTING({})", index),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::AbortedFatal => write!(f, "ABORTED_FATAL"),
            Self::AbortedExhausted => write!(f, "ABORTED_EXHAUSTED"),
        }
    }
}

/// Every attempt of one invocation plus where the state machine stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationTrace {
    pub attempts: Vec<TransformAttempt>,
    pub state: InvocationState,
}

impl InvocationTrace {
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Collapses the trace into the public contract: text on success, `None` otherwise.
    pub fn into_result(self) -> TransformResult {
        if self.state != InvocationState::Succeeded {
            return None;
        }
        self.attempts
            .into_iter()
            .last()
            .and_then(|attempt| match attempt.outcome {
                AttemptOutcome::Success(text) => Some(text),
                _ => None,
            })
    }
}
