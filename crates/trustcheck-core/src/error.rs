use thiserror::Error;

/// Result type alias for trust assessment operations
pub type Result<T> = std::result::Result<T, TrustError>;

/// Why a raw input could not become a [`Target`](crate::Target)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTargetReason {
    /// Nothing left after trimming whitespace and quotes
    Empty,
    /// A scheme other than http/https was given
    UnsupportedScheme,
    /// Not a well-formed absolute URL, even after host recovery
    Malformed,
}

impl std::fmt::Display for InvalidTargetReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "URL is required"),
            Self::UnsupportedScheme => write!(f, "unsupported scheme"),
            Self::Malformed => write!(f, "malformed URL"),
        }
    }
}

/// Errors surfaced at the engine boundary.
///
/// Probe-level failures never show up here; they are absorbed into
/// degraded probe results.
#[derive(Error, Debug)]
pub enum TrustError {
    /// Input cannot be normalized into a probeable target
    #[error("invalid target: {reason}")]
    InvalidTarget {
        /// Which normalization rule rejected the input
        reason: InvalidTargetReason,
    },

    /// Unexpected internal fault in orchestration or aggregation
    #[error("assessment failed: {0}")]
    Assessment(String),

    /// The caller cancelled the assessment before it completed
    #[error("assessment cancelled")]
    Cancelled,

    /// Configuration is invalid or unreadable
    #[error("configuration error: {0}")]
    Config(String),
}

impl TrustError {
    /// Shorthand for an [`TrustError::InvalidTarget`] error
    #[must_use]
    pub const fn invalid_target(reason: InvalidTargetReason) -> Self {
        Self::InvalidTarget { reason }
    }

    /// Returns true if the error was caused by the caller's input
    #[must_use]
    pub const fn is_invalid_target(&self) -> bool {
        matches!(self, Self::InvalidTarget { .. })
    }

    /// A user-facing sentence describing what to do about the error
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::InvalidTarget {
                reason: InvalidTargetReason::Empty,
            } => "URL is required",
            Self::InvalidTarget {
                reason: InvalidTargetReason::UnsupportedScheme,
            } => "Please use HTTP or HTTPS URLs only",
            Self::InvalidTarget {
                reason: InvalidTargetReason::Malformed,
            } => "Invalid URL format. Please enter a valid website URL (e.g., google.com)",
            Self::Assessment(_) => "Analysis failed",
            Self::Cancelled => "Analysis was cancelled",
            Self::Config(_) => "Check the trustcheck configuration file",
        }
    }
}
