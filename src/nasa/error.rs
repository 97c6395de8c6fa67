//! Error types for upstream API operations.

/// Result type for upstream client operations.
pub type NasaResult<T> = Result<T, NasaError>;

/// Error taxonomy for calls to the upstream NASA APIs.
#[derive(Debug, thiserror::Error)]
pub enum NasaError {
    /// Server credential is not configured. Fatal for the request and not
    /// user-recoverable; surfaced as a 500 by the proxy.
    #[error("NASA_API_KEY is not set in environment variables")]
    MissingApiKey,

    /// Network-level failure (DNS, connect, TLS, timeout).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream responded with a non-2xx status.
    #[error("upstream responded with {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The upstream returned a 2xx but the payload failed validation.
    #[error("{0}")]
    MalformedPayload(String),
}

impl NasaError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey | Self::MalformedPayload(_) => false,
        }
    }
}
