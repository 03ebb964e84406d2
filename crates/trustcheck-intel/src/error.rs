use thiserror::Error;

/// Result type alias for threat-intelligence lookups
pub type IntelResult<T> = std::result::Result<T, IntelError>;

/// Errors from threat-intelligence sources
#[derive(Error, Debug)]
pub enum IntelError {
    /// Credential rejected by the source
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// Source quota exhausted
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// The queried resource is unknown to the source
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Source returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid base URL or request URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl IntelError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout)
            || matches!(self, Self::Api { code, .. } if *code >= 500)
    }

    /// Returns the HTTP status code if the source answered with one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IntelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err.to_string())
        }
    }
}
