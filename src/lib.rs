//! # NASA Explorer Backend
//!
//! Proxy API and search engine for two public NASA data feeds: the
//! Astronomy Picture of the Day (APOD) and the NASA Image and Video Library.
//!
//! The crate provides a thin Axum server that forwards simplified requests to
//! the upstream NASA APIs (holding the server-side API key) and normalizes
//! their success and error shapes, plus a reusable search session state
//! machine that drives paginated image searches against the proxy.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: shared Data Transfer Objects for both feeds
//! - [`nasa`]: upstream provider client, configuration, and error taxonomy
//! - [`search`]: paginated search session state machine and its backends
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod nasa;

pub mod search;

pub mod http;
