use thiserror::Error;

/// Result type alias for reconnaissance operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from network collaborators
#[derive(Error, Debug)]
pub enum ReconError {
    /// WHOIS lookup error
    #[error("WHOIS error: {0}")]
    Whois(String),

    /// DNS resolution error
    #[error("DNS error: {0}")]
    Dns(String),

    /// TLS handshake or certificate error
    #[error("TLS error: {0}")]
    Tls(String),

    /// HTTP fetch error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Unparseable response
    #[error("parse error: {0}")]
    Parse(String),

    /// Network I/O error
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// Timeout
    #[error("operation timed out")]
    Timeout,
}

impl From<reqwest::Error> for ReconError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<tokio::time::error::Elapsed> for ReconError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout
    }
}
