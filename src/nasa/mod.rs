//! Upstream NASA API client.
//!
//! This module owns everything that talks to the third-party provider:
//! environment-driven configuration, the error taxonomy for upstream
//! failures, and the reqwest-based client. Handlers depend on the
//! [`NasaProvider`] trait rather than the concrete client so they can be
//! tested with an in-memory double.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ApodParams, NasaClient, NasaProvider};
pub use config::NasaConfig;
pub use error::{NasaError, NasaResult};
