//! Paginated search session engine for the image library.
//!
//! [`session`] holds the state machine itself: a pure, synchronous core that
//! issues stamped fetch tickets and merges completions, so every transition
//! is testable without a network. [`backend`] defines the transport seam the
//! async drivers run against, plus the reqwest implementation that talks to
//! the proxy's `/api/images` endpoint.

pub mod backend;
pub mod session;

#[cfg(test)]
mod session_tests;

pub use backend::{BackendError, HttpSearchBackend, SearchBackend};
pub use session::{
    Completion, FetchMode, FetchTicket, ResultItem, SearchError, SearchSession,
};
