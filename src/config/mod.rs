//! Environment-backed configuration.
//!
//! `OPENAI_API_KEY` is required. Everything else has a default and can be overridden
//! with `FIDELITY_*` environment variables.

pub mod error;
pub mod prompt;


pub use error::ConfigError;
pub use prompt::SystemPrompt;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_API_BASE_URL, DEFAULT_EMBEDDING_CACHE_CAPACITY,
    DEFAULT_MAX_TOKENS, DEFAULT_MAX_TRIES, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Returns `threshold` if it lies in the cosine range `[-1, 1]`. NaN is rejected.
pub fn validate_threshold(threshold: f32) -> Result<f32, ConfigError> {
    if (-1.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidThreshold { value: threshold })
    }
}

/// Bearer credential for the transformation service. Redacted in `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(***)")
        }
    }
}

/// Process configuration loaded once at startup.
///
/// Use [`Config::from_env`] to read overrides on top of defaults, then
/// [`Config::validate`] before building any component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the transformation service.
    pub api_key: ApiKey,

    /// Base URL of the OpenAI-compatible endpoint. Default: `https://api.openai.com/v1`.
    pub api_base_url: String,

    /// Model identifier sent with every request. Default: `gpt-4o-mini`.
    pub model: String,

    /// Response length cap. Default: `300`.
    pub max_tokens: u32,

    /// Attempt budget per invocation. Default: `3`.
    pub max_tries: u32,

    /// Base delay for exponential backoff between transient failures. Default: none.
    pub retry_base_delay: Duration,

    /// Per-attempt HTTP timeout. Default: 60 seconds.
    pub request_timeout: Duration,

    /// File holding the system instruction. Default: `prompt/prompt.txt`.
    pub prompt_path: PathBuf,

    /// Sentence-transformer directory. `None` runs the embedder in stub mode.
    pub embedding_model_path: Option<PathBuf>,

    /// Acceptance threshold for the mean similarity. Default: `0.7`.
    pub threshold: f32,

    /// Max memoized sentence embeddings. Default: `10_000`.
    pub embedding_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_tries: DEFAULT_MAX_TRIES,
            retry_base_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            prompt_path: PathBuf::from("prompt/prompt.txt"),
            embedding_model_path: None,
            threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            embedding_cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_API_BASE_URL: &'static str = "FIDELITY_API_BASE_URL";
    const ENV_MODEL: &'static str = "FIDELITY_MODEL";
    const ENV_MAX_TOKENS: &'static str = "FIDELITY_MAX_TOKENS";
    const ENV_MAX_TRIES: &'static str = "FIDELITY_MAX_TRIES";
    const ENV_RETRY_BASE_DELAY_MS: &'static str = "FIDELITY_RETRY_BASE_DELAY_MS";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "FIDELITY_REQUEST_TIMEOUT_SECS";
    const ENV_PROMPT_PATH: &'static str = "FIDELITY_PROMPT_PATH";
    const ENV_EMBEDDING_MODEL_PATH: &'static str = "FIDELITY_EMBEDDING_MODEL_PATH";
    const ENV_THRESHOLD: &'static str = "FIDELITY_THRESHOLD";
    const ENV_EMBEDDING_CACHE_CAPACITY: &'static str = "FIDELITY_EMBEDDING_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = Self::parse_required_from_env(Self::ENV_API_KEY).map(ApiKey::new)?;
        let api_base_url =
            Self::parse_string_from_env(Self::ENV_API_BASE_URL, defaults.api_base_url);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let max_tokens = Self::parse_u64_from_env(Self::ENV_MAX_TOKENS, defaults.max_tokens.into())
            .try_into()
            .unwrap_or(defaults.max_tokens);
        let max_tries = Self::parse_max_tries_from_env(defaults.max_tries)?;
        let retry_base_delay = Duration::from_millis(Self::parse_u64_from_env(
            Self::ENV_RETRY_BASE_DELAY_MS,
            defaults.retry_base_delay.as_millis() as u64,
        ));
        let request_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        ));
        let prompt_path = Self::parse_path_from_env(Self::ENV_PROMPT_PATH, defaults.prompt_path);
        let embedding_model_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDING_MODEL_PATH);
        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;
        let embedding_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_CACHE_CAPACITY,
            defaults.embedding_cache_capacity,
        );

        Ok(Self {
            api_key,
            api_base_url,
            model,
            max_tokens,
            max_tries,
            retry_base_delay,
            request_timeout,
            prompt_path,
            embedding_model_path,
            threshold,
            embedding_cache_capacity,
        })
    }

    /// Validates paths and basic invariants (does not read the prompt).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_API_KEY,
            });
        }

        if self.max_tries == 0 {
            return Err(ConfigError::InvalidMaxTries {
                value: self.max_tries,
            });
        }

        validate_threshold(self.threshold)?;

        if !self.prompt_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.prompt_path.clone(),
            });
        }
        if !self.prompt_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.prompt_path.clone(),
            });
        }

        if let Some(ref path) = self.embedding_model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns the chat completions endpoint derived from the base URL.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }

    fn parse_required_from_env(var_name: &'static str) -> Result<String, ConfigError> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar { name: var_name })
    }

    fn parse_max_tries_from_env(default: u32) -> Result<u32, ConfigError> {
        match env::var(Self::ENV_MAX_TRIES) {
            Ok(value) => {
                let tries: u32 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidNumber {
                        name: Self::ENV_MAX_TRIES,
                        value: value.clone(),
                        reason: e.to_string(),
                    }
                })?;

                if tries == 0 {
                    return Err(ConfigError::InvalidMaxTries { value: tries });
                }

                Ok(tries)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                let threshold: f32 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e: std::num::ParseFloatError| ConfigError::InvalidNumber {
                            name: Self::ENV_THRESHOLD,
                            value: value.clone(),
                            reason: e.to_string(),
                        })?;

                validate_threshold(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
