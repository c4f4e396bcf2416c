use thiserror::Error;

/// Retry policy class of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// May succeed on a later attempt.
    Transient,
    /// Retrying cannot succeed without external remediation.
    Fatal,
}

/// Failure reported by the remote transformation service for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Service temporarily unavailable (5xx).
    #[error("service unavailable (HTTP {status}): {message}")]
    Unavailable { status: u16, message: String },

    /// Credentials were rejected.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Rate limit hit or quota exhausted.
    #[error("rate limit or quota exceeded: {message}")]
    RateLimited { message: String },

    /// The transport gave up waiting for a response.
    #[error("request timed out")]
    Timeout,

    /// Could not reach the service.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Anything not covered above.
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ServiceError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Authentication and rate limiting abort the loop; everything else is retried.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Authentication { .. } | Self::RateLimited { .. } => FailureClass::Fatal,
            Self::Unavailable { .. }
            | Self::Timeout
            | Self::Connection { .. }
            | Self::Unexpected { .. } => FailureClass::Transient,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class() == FailureClass::Transient
    }

    /// Short error code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "service_unavailable",
            Self::Authentication { .. } => "authentication_failed",
            Self::RateLimited { .. } => "rate_limited",
            Self::Timeout => "timeout",
            Self::Connection { .. } => "connection_failed",
            Self::Unexpected { .. } => "unexpected",
        }
    }

    /// Operator-facing message; distinct per failure kind.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Unavailable { .. } => {
                "Transformation service is temporarily unavailable. Please try again later."
                    .to_string()
            }
            Self::Authentication { .. } => {
                "There was an issue with API authentication. Please check your API key."
                    .to_string()
            }
            Self::RateLimited { .. } => {
                "You have exceeded your rate limit or run out of credits. Please check your usage."
                    .to_string()
            }
            Self::Timeout => "Request timed out.".to_string(),
            Self::Connection { .. } => "Network error: Unable to connect to the transformation service. Please check your internet connection.".to_string(),
            Self::Unexpected { message } => format!("An unexpected error occurred: {message}"),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_connect() || err.is_request() {
            ServiceError::connection(err.to_string())
        } else {
            ServiceError::unexpected(err.to_string())
        }
    }
}
