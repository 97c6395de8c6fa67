//! HTTP handlers for the proxy API.
//!
//! Each handler validates its query parameters, delegates to the upstream
//! provider, and answers in the endpoint's normalized envelope.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};

use super::dto::{ApodEnvelope, ApodQuery, HealthResponse, ImagesQuery};
use super::error::{ApodError, AppError, ImagesError};
use super::state::AppState;
use crate::api::ImageSearchResult;
use crate::nasa::ApodParams;

/// Earliest date in the APOD archive.
fn apod_min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or(NaiveDate::MIN)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/apod
///
/// Query parameters: `date` (YYYY-MM-DD) or `count` (positive integer); at
/// least one is required. Success: `{ok: true, data: Apod | Apod[]}`.
/// Failure: HTTP >= 400 with `{ok: false, error}`.
pub async fn get_apod(
    State(state): State<AppState>,
    Query(params): Query<ApodQuery>,
) -> Result<Json<ApodEnvelope>, ApodError> {
    if params.date.is_none() && params.count.is_none() {
        return Err(AppError::BadRequest(
            "Provide a 'date' or 'count' query parameter.".to_string(),
        )
        .into());
    }

    let count = params.count.as_deref().map(parse_count).transpose()?;
    let date = params.date.as_deref().map(validate_date).transpose()?;

    let data = state.provider.fetch_apod(&ApodParams { date, count }).await?;

    Ok(Json(ApodEnvelope { ok: true, data }))
}

/// GET /api/images
///
/// Query parameters: `query` (search term) and `page` (1-based, default 1).
/// Success: HTTP 200 with the normalized `{collection: {...}}` shape.
/// Failure: HTTP >= 400 with `{message}`.
pub async fn search_images(
    State(state): State<AppState>,
    Query(params): Query<ImagesQuery>,
) -> Result<Json<ImageSearchResult>, ImagesError> {
    let query = params.query.unwrap_or_default();
    // Unparseable or sub-1 page values coerce to 1 instead of rejecting.
    let page = params
        .page
        .as_deref()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1);

    let result = state.provider.search_images(&query, page).await?;

    Ok(Json(result))
}

fn parse_count(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .ok()
        .filter(|count| *count >= 1)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid 'count' parameter: expected a positive integer, got '{raw}'"
            ))
        })
}

fn validate_date(raw: &str) -> Result<String, AppError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid 'date' parameter: expected YYYY-MM-DD, got '{raw}'"
        ))
    })?;

    let today = Utc::now().date_naive();
    if date < apod_min_date() || date > today {
        return Err(AppError::BadRequest(format!(
            "Invalid 'date' parameter: must be between {} and {}",
            apod_min_date(),
            today
        )));
    }

    Ok(raw.to_string())
}
