//! Transport seam between the search session and the proxy endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::ImageSearchResult;

/// Generic user-facing message when the endpoint gives no usable detail.
pub const GENERIC_SEARCH_ERROR: &str = "Something went wrong while fetching NASA images.";

/// User-facing message for network-level failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Errors from a search page fetch.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Network-level failure before an HTTP response was obtained.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint responded with a non-2xx status. `message` carries the
    /// endpoint's `{ message }` body field when present.
    #[error("search endpoint responded with {status}: {message}")]
    Endpoint { status: u16, message: String },

    /// A 2xx response whose body failed to parse.
    #[error("malformed search response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Message shown to the user, matching the endpoint's own phrasing when
    /// it provided one.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Endpoint { message, .. } if !message.is_empty() => message.clone(),
            Self::Endpoint { .. } | Self::Malformed(_) => GENERIC_SEARCH_ERROR.to_string(),
        }
    }
}

/// One page fetch against the image search endpoint.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search_page(&self, query: &str, page: u32)
        -> Result<ImageSearchResult, BackendError>;
}

/// Reqwest-based backend hitting the proxy's `/api/images` endpoint.
pub struct HttpSearchBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSearchBackend {
    /// `base_url` is the proxy server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search_page(
        &self,
        query: &str,
        page: u32,
    ) -> Result<ImageSearchResult, BackendError> {
        let response = self
            .http
            .get(format!("{}/api/images", self.base_url))
            .query(&[("query", query), ("page", page.to_string().as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(BackendError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ImageSearchResult>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }
}
