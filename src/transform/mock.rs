//! Scripted backend for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::backend::TransformBackend;
use super::error::ServiceError;
use super::types::TransformRequest;

#[derive(Debug, Default)]
enum Fallback {
    /// Identity transformation.
    #[default]
    Echo,
    Fixed(Result<String, ServiceError>),
    Exhausted,
}

/// Replays a script of results, one per call, then falls back.
#[derive(Debug, Default)]
pub struct MockTransformBackend {
    script: Mutex<VecDeque<Result<String, ServiceError>>>,
    fallback: Fallback,
    requests: Mutex<Vec<TransformRequest>>,
}

impl MockTransformBackend {
    /// Echoes every input back unchanged.
    pub fn echo() -> Self {
        Self::default()
    }

    /// Returns each result in order; calls past the end fail as unexpected.
    pub fn with_script<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<String, ServiceError>>,
    {
        Self {
            script: Mutex::new(results.into_iter().collect()),
            fallback: Fallback::Exhausted,
            ..Default::default()
        }
    }

    /// Returns the same result on every call.
    pub fn always(result: Result<String, ServiceError>) -> Self {
        Self {
            fallback: Fallback::Fixed(result),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<TransformRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TransformBackend for MockTransformBackend {
    async fn complete(&self, request: &TransformRequest) -> Result<String, ServiceError> {
        self.requests.lock().push(request.clone());

        if let Some(next) = self.script.lock().pop_front() {
            return next;
        }

        match &self.fallback {
            Fallback::Echo => Ok(request.input().to_string()),
            Fallback::Fixed(result) => result.clone(),
            Fallback::Exhausted => Err(ServiceError::unexpected("mock script exhausted")),
        }
    }
}
