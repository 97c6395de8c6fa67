//! Upstream API configuration and environment variable handling.

use std::env;

/// Upstream NASA API configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct NasaConfig {
    /// Base URL of the APOD API
    pub api_base: String,
    /// Base URL of the Image and Video Library API
    pub images_api_base: String,
    /// Server-held API key for the APOD API.
    ///
    /// Optional at startup: the image library needs no key, and APOD requests
    /// made without one fail per-request with a configuration error.
    pub api_key: Option<String>,
}

impl NasaConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `NASA_API_BASE` (optional, default: `https://api.nasa.gov`): APOD API base URL
    /// - `NASA_IMAGES_API_BASE` (optional, default: `https://images-api.nasa.gov`): image library base URL
    /// - `NASA_API_KEY` (optional): server-side credential for the APOD API
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// mutating process-wide environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup("NASA_API_BASE")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "https://api.nasa.gov".to_string());
        let images_api_base = lookup("NASA_IMAGES_API_BASE")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "https://images-api.nasa.gov".to_string());
        let api_key = lookup("NASA_API_KEY").filter(|s| !s.is_empty());

        Self {
            api_base,
            images_api_base,
            api_key,
        }
    }
}
