//! Reqwest-based client for the upstream NASA APIs.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::NasaConfig;
use super::error::{NasaError, NasaResult};
use crate::api::{Apod, ApodResult, ImageSearchResult};

/// Parameters for an APOD fetch. At least one of `date`/`count` is expected
/// to be set by the caller; when both are present they are forwarded together
/// and the upstream arbitrates.
#[derive(Debug, Clone, Default)]
pub struct ApodParams {
    /// Specific date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Number of random records to fetch
    pub count: Option<u32>,
}

/// Abstraction over the upstream provider.
///
/// Handlers and the search session drivers depend on this trait so tests can
/// substitute a scripted in-memory implementation for [`NasaClient`].
#[async_trait]
pub trait NasaProvider: Send + Sync {
    /// Fetch one or more Astronomy Picture of the Day records.
    async fn fetch_apod(&self, params: &ApodParams) -> NasaResult<ApodResult>;

    /// Search the Image and Video Library. `page` is 1-based.
    async fn search_images(&self, query: &str, page: u32) -> NasaResult<ImageSearchResult>;
}

/// HTTP client for `api.nasa.gov` and `images-api.nasa.gov`.
pub struct NasaClient {
    http: reqwest::Client,
    config: NasaConfig,
}

impl NasaClient {
    /// Create a client with the given configuration.
    pub fn new(config: NasaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(NasaConfig::from_env())
    }

    /// Whether a server-side APOD credential is configured.
    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl NasaProvider for NasaClient {
    async fn fetch_apod(&self, params: &ApodParams) -> NasaResult<ApodResult> {
        // The APOD API requires a server-held key; refuse before any network
        // call so a misconfigured deployment fails fast and consistently.
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NasaError::MissingApiKey)?;

        let mut request = self
            .http
            .get(format!("{}/planetary/apod", self.config.api_base))
            .query(&[("api_key", api_key)]);
        if let Some(date) = &params.date {
            request = request.query(&[("date", date.as_str())]);
        }
        if let Some(count) = params.count {
            request = request.query(&[("count", count.to_string().as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = upstream_message(&body)
                .unwrap_or_else(|| format!("Failed to fetch APOD: {status}"));
            warn!(status = status.as_u16(), %message, "APOD upstream error");
            return Err(NasaError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        parse_apod_payload(payload)
    }

    async fn search_images(&self, query: &str, page: u32) -> NasaResult<ImageSearchResult> {
        let response = self
            .http
            .get(format!("{}/search", self.config.images_api_base))
            .query(&[("q", query), ("page", page.to_string().as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = upstream_message(&body)
                .unwrap_or_else(|| format!("Failed to search NASA images: {status}"));
            warn!(status = status.as_u16(), %message, "image search upstream error");
            return Err(NasaError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        parse_search_payload(payload)
    }
}

/// Extract a human-readable message from an upstream error body.
///
/// NASA's APIs are inconsistent here: APOD uses `msg`, the OpenAPI gateway
/// wraps errors as `error.message`, and the image library uses `reason`.
fn upstream_message(body: &Value) -> Option<String> {
    body.get("msg")
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("reason").and_then(Value::as_str))
        .map(str::to_string)
}

/// Validate and convert a raw APOD payload.
///
/// Accepts both the single-record (`date`) and array (`count`) forms. Records
/// missing any required field are rejected rather than passed through.
fn parse_apod_payload(payload: Value) -> NasaResult<ApodResult> {
    match payload {
        Value::Array(entries) => {
            let records = entries
                .into_iter()
                .map(parse_apod_record)
                .collect::<NasaResult<Vec<Apod>>>()?;
            Ok(ApodResult::Many(records))
        }
        other => parse_apod_record(other).map(|apod| ApodResult::One(Box::new(apod))),
    }
}

fn parse_apod_record(value: Value) -> NasaResult<Apod> {
    serde_json::from_value(value).map_err(|e| {
        debug!(error = %e, "APOD payload failed validation");
        NasaError::MalformedPayload("APOD response is missing required fields".to_string())
    })
}

/// Validate and convert a raw image search payload.
fn parse_search_payload(payload: Value) -> NasaResult<ImageSearchResult> {
    serde_json::from_value(payload).map_err(|e| {
        debug!(error = %e, "image search payload failed validation");
        NasaError::MalformedPayload(
            "Image search response is missing the collection envelope".to_string(),
        )
    })
}
