//! Transport seam for the transformation service.

use std::time::Duration;

use async_openai::types::chat::{CreateChatCompletionRequest, CreateChatCompletionResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::config::{Config, ConfigError};

use super::error::ServiceError;
use super::types::TransformRequest;

/// A single call to the remote service. Implementations must not retry.
#[async_trait]
pub trait TransformBackend: Send + Sync {
    async fn complete(&self, request: &TransformRequest) -> Result<String, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
    code: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiBackend {
    /// Builds the backend from process configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if config.api_key.is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: "OPENAI_API_KEY",
            });
        }
        Self::with_endpoint(
            config.api_key.expose(),
            config.chat_completions_url(),
            config.request_timeout,
        )
        .map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })
    }

    /// Builds a client against an explicit endpoint URL.
    pub fn with_endpoint(
        api_key: &str,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ServiceError::unexpected("API key contains invalid header characters"))?;
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ServiceError::unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_body(request: &TransformRequest) -> Result<CreateChatCompletionRequest, ServiceError> {
        let body = serde_json::json!({
            "model": request.model(),
            "messages": [
                { "role": "system", "content": request.system_prompt().as_str() },
                {
                    "role": "user",
                    "content": [{ "type": "text", "text": request.input() }]
                }
            ],
            "max_tokens": request.max_tokens(),
        });

        serde_json::from_value(body)
            .map_err(|e| ServiceError::unexpected(format!("failed to build request: {e}")))
    }

    fn classify_status(status: StatusCode, body: &str) -> ServiceError {
        let detail = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .map(|err| match (err.message, err.code) {
                (Some(message), Some(code)) => format!("{message} ({code})"),
                (Some(message), None) => message,
                (None, Some(code)) => code,
                (None, None) => format!("HTTP {}", status.as_u16()),
            })
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        match status.as_u16() {
            401 => ServiceError::Authentication { message: detail },
            429 => ServiceError::RateLimited { message: detail },
            code if code >= 500 => ServiceError::Unavailable {
                status: code,
                message: detail,
            },
            _ => ServiceError::Unexpected { message: detail },
        }
    }
}

#[async_trait]
impl TransformBackend for OpenAiBackend {
    async fn complete(&self, request: &TransformRequest) -> Result<String, ServiceError> {
        let body = Self::build_body(request)?;

        debug!(
            model = request.model(),
            input_len = request.input().len(),
            max_tokens = request.max_tokens(),
            "Sending chat completion request"
        );

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::classify_status(status, &text));
        }

        let parsed: CreateChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ServiceError::unexpected(format!("invalid response body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::unexpected("response contained no text content"))
    }
}
