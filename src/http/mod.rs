//! Axum-based HTTP proxy server.
//!
//! Thin route handlers that validate query parameters, forward the request to
//! the upstream provider through [`crate::nasa::NasaProvider`], and normalize
//! the success/error envelopes clients see.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApodError, AppError, ImagesError};
pub use router::create_router;
pub use state::AppState;
