//! Search session state machine.
//!
//! A session owns the query text, accumulated results, page cursor, and
//! loading/error flags for one image search flow. It has two entry points,
//! [`SearchSession::start_search`] and [`SearchSession::load_more`], each of
//! which hands back a [`FetchTicket`] stamped with a monotonic generation
//! number. The caller performs the fetch and reports the outcome through
//! [`SearchSession::complete`]; completions whose stamp no longer matches the
//! session's current generation are discarded, so a slow page-1 response can
//! never clobber the results of a search issued after it.

use tracing::debug;

use crate::api::{ImageItem, ImageSearchResult};

use super::backend::SearchBackend;

/// Validation message for an empty or whitespace-only query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term.";

/// Errors raised by the session entry points before any fetch is issued.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Input rejected; correct the input and retry.
    #[error("{0}")]
    Validation(String),
    /// The operation is not legal in the current state.
    #[error("{0}")]
    Precondition(String),
}

/// Whether a fetch replaces the result set or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fresh search from page 1; results replace the set.
    Reset,
    /// Next page of the current search; results are appended.
    Append,
}

/// A stamped, in-flight fetch. Pass it back to [`SearchSession::complete`]
/// together with the outcome.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    /// Trimmed query the fetch was issued for
    pub query: String,
    /// 1-based page to request
    pub page: u32,
    pub mode: FetchMode,
}

/// Result of applying a completion to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was merged into the session state.
    Applied,
    /// The ticket was superseded by a newer fetch; state untouched.
    Stale,
}

/// One accumulated result with its stable display key.
#[derive(Debug, Clone)]
pub struct ResultItem {
    /// Provider id when present, otherwise derived from (page, index)
    pub key: String,
    pub item: ImageItem,
}

/// State machine for one search flow. Created fresh per session; no
/// persistence.
#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    items: Vec<ResultItem>,
    total_hits: Option<u64>,
    current_page: u32,
    is_initial_loading: bool,
    is_loading_more: bool,
    has_more: bool,
    error: Option<String>,
    has_searched: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            ..Self::default()
        }
    }

    /// Begin a fresh search from page 1.
    ///
    /// Rejects empty-after-trim queries with a validation error (recorded in
    /// [`Self::error`] as well) and issues no fetch. Otherwise clears the
    /// accumulated results, resets the page cursor, and returns a Reset-mode
    /// ticket for page 1. Always allowed, including while another fetch is in
    /// flight: the newer generation supersedes it.
    pub fn start_search(&mut self, query: &str) -> Result<FetchTicket, SearchError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
            return Err(SearchError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }

        self.query = trimmed.to_string();
        self.has_searched = true;
        self.items.clear();
        self.total_hits = None;
        self.current_page = 1;
        self.has_more = true;
        self.error = None;
        self.is_initial_loading = true;
        self.is_loading_more = false;

        self.generation += 1;
        self.in_flight = Some(self.generation);
        debug!(query = %self.query, generation = self.generation, "search started");

        Ok(FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
            page: 1,
            mode: FetchMode::Reset,
        })
    }

    /// Request the next page of the current search.
    ///
    /// Fails with a precondition error while a fetch is in flight, before any
    /// search has run, or once the session has decided there is nothing more
    /// to load.
    pub fn load_more(&mut self) -> Result<FetchTicket, SearchError> {
        if self.in_flight.is_some() {
            return Err(SearchError::Precondition(
                "a fetch is already in flight".to_string(),
            ));
        }
        if !self.has_searched {
            return Err(SearchError::Precondition(
                "no search has been run yet".to_string(),
            ));
        }
        if !self.has_more {
            return Err(SearchError::Precondition(
                "no more results to load".to_string(),
            ));
        }

        self.error = None;
        self.is_loading_more = true;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        let page = self.current_page + 1;
        debug!(query = %self.query, page, generation = self.generation, "loading more");

        Ok(FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
            page,
            mode: FetchMode::Append,
        })
    }

    /// Merge a fetch outcome into the session.
    ///
    /// `outcome` is the parsed page on success, or a user-facing message on
    /// failure. A ticket from a superseded generation is ignored entirely.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<ImageSearchResult, String>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale completion"
            );
            return Completion::Stale;
        }

        self.in_flight = None;
        self.is_initial_loading = false;
        self.is_loading_more = false;

        match outcome {
            Ok(result) => {
                let collection = result.collection;
                let hits = collection
                    .metadata
                    .as_ref()
                    .and_then(|m| m.numeric_total_hits());
                self.apply_page(ticket, collection.items, hits);
            }
            Err(message) => {
                self.error = Some(message);
                if ticket.mode == FetchMode::Reset {
                    // A failed fresh search leaves nothing to page through.
                    self.items.clear();
                    self.has_more = false;
                    self.total_hits = None;
                }
                // Append failures keep the accumulated items visible and
                // leave has_more unchanged so the caller can retry.
            }
        }

        Completion::Applied
    }

    fn apply_page(&mut self, ticket: &FetchTicket, new_items: Vec<ImageItem>, hits: Option<u64>) {
        let new_count = new_items.len();
        for (index, item) in new_items.into_iter().enumerate() {
            let key = item.stable_key(ticket.page, index);
            self.items.push(ResultItem { key, item });
        }

        // total_hits reflects the latest response only; a page without usable
        // metadata resets it to unknown.
        self.total_hits = hits;
        self.current_page = ticket.page;

        self.has_more = match self.total_hits {
            Some(total) => (self.items.len() as u64) < total,
            // Emptiness heuristic when the provider omits the count: a page
            // with zero items means exhaustion. A transient empty page is
            // indistinguishable from the real end and stops pagination early.
            None => new_count > 0,
        };
        self.error = None;
    }

    // -------------------------------------------------------------------
    // Async drivers
    // -------------------------------------------------------------------

    /// Start a fresh search and run it to completion against `backend`.
    pub async fn run_search(
        &mut self,
        backend: &dyn SearchBackend,
        query: &str,
    ) -> Result<Completion, SearchError> {
        let ticket = self.start_search(query)?;
        let outcome = backend
            .search_page(&ticket.query, ticket.page)
            .await
            .map_err(|e| e.user_message());
        Ok(self.complete(&ticket, outcome))
    }

    /// Fetch and merge the next page against `backend`.
    pub async fn run_load_more(
        &mut self,
        backend: &dyn SearchBackend,
    ) -> Result<Completion, SearchError> {
        let ticket = self.load_more()?;
        let outcome = backend
            .search_page(&ticket.query, ticket.page)
            .await
            .map_err(|e| e.user_message());
        Ok(self.complete(&ticket, outcome))
    }

    // -------------------------------------------------------------------
    // State accessors
    // -------------------------------------------------------------------

    /// Trimmed query of the current search.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results accumulated across pages, in response order.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Provider-reported total match count, when known.
    pub fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    /// 1-based page of the most recent successful fetch.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// True while a fresh search's page-1 fetch is in flight.
    pub fn is_initial_loading(&self) -> bool {
        self.is_initial_loading
    }

    /// True while a load-more fetch is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    /// Whether another page may be available.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// User-facing message from the most recent failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether any search has been started this session.
    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Whether a fetch is currently in flight.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }
}
