//! HTTP error handling and response types.
//!
//! The two proxy endpoints expose different failure envelopes: the APOD
//! endpoint answers `{ok: false, error}` while the image search endpoint
//! answers `{message}`. Handlers share one internal [`AppError`] taxonomy and
//! pick the envelope through the [`ApodError`]/[`ImagesError`] wrappers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::nasa::NasaError;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request parameters; rejected before any upstream call
    BadRequest(String),
    /// Server misconfiguration (missing credential)
    Config(String),
    /// Upstream responded with a non-2xx status
    Upstream { status: u16, message: String },
    /// Network-level failure reaching the upstream
    Transport(String),
    /// Upstream 2xx with an unusable payload
    Malformed(String),
}

impl AppError {
    /// HTTP status this error maps to.
    ///
    /// Upstream statuses in the 4xx/5xx range are forwarded as-is; anything
    /// else that reached the error path maps to 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Transport(_) | Self::Malformed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// User-facing message for the response body.
    pub fn into_message(self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::Config(msg)
            | Self::Transport(msg)
            | Self::Malformed(msg) => msg,
            Self::Upstream { message, .. } => message,
        }
    }
}

impl From<NasaError> for AppError {
    fn from(err: NasaError) -> Self {
        match err {
            NasaError::MissingApiKey => AppError::Config(err.to_string()),
            NasaError::Transport(e) => AppError::Transport(e.to_string()),
            NasaError::Upstream { status, message } => AppError::Upstream { status, message },
            NasaError::MalformedPayload(message) => AppError::Malformed(message),
        }
    }
}

/// Failure envelope of the APOD endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodFailure {
    pub ok: bool,
    pub error: String,
}

/// Failure envelope of the image search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesFailure {
    pub message: String,
}

/// [`AppError`] rendered in the APOD endpoint's `{ok: false, error}` shape.
#[derive(Debug)]
pub struct ApodError(pub AppError);

impl IntoResponse for ApodError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = ApodFailure {
            ok: false,
            error: self.0.into_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl<E: Into<AppError>> From<E> for ApodError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// [`AppError`] rendered in the image endpoint's `{message}` shape.
#[derive(Debug)]
pub struct ImagesError(pub AppError);

impl IntoResponse for ImagesError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = ImagesFailure {
            message: self.0.into_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl<E: Into<AppError>> From<E> for ImagesError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
