//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::api::ApodResult;

/// Query parameters for the APOD endpoint.
///
/// Both fields arrive as raw strings so validation failures produce the
/// endpoint's own error envelope instead of a generic extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApodQuery {
    /// Specific date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Number of random records to fetch
    #[serde(default)]
    pub count: Option<String>,
}

/// Query parameters for the image search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImagesQuery {
    /// Free-text search term
    #[serde(default)]
    pub query: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<String>,
}

/// Success envelope for the APOD endpoint: `{ok: true, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApodEnvelope {
    pub ok: bool,
    pub data: ApodResult,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
}
