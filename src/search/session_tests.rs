use proptest::prelude::*;
use serde_json::{json, Value};

use crate::api::ImageSearchResult;
use crate::search::session::EMPTY_QUERY_MESSAGE;
use crate::search::{Completion, FetchMode, SearchError, SearchSession};

/// Build a search page with one item per id, optionally carrying total_hits.
fn page(ids: &[&str], total_hits: Option<u64>) -> ImageSearchResult {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "data": [{ "nasa_id": id, "title": id }],
                "links": [{ "href": format!("https://images-assets.nasa.gov/{id}.jpg") }]
            })
        })
        .collect();
    let mut collection = json!({ "items": items });
    if let Some(hits) = total_hits {
        collection["metadata"] = json!({ "total_hits": hits });
    }
    serde_json::from_value(json!({ "collection": collection })).unwrap()
}

/// A page whose items carry no nasa_id.
fn anonymous_page(count: usize, total_hits: Option<u64>) -> ImageSearchResult {
    let items: Vec<Value> = (0..count)
        .map(|_| json!({ "data": [{ "title": "untagged" }] }))
        .collect();
    let mut collection = json!({ "items": items });
    if let Some(hits) = total_hits {
        collection["metadata"] = json!({ "total_hits": hits });
    }
    serde_json::from_value(json!({ "collection": collection })).unwrap()
}

fn keys(session: &SearchSession) -> Vec<&str> {
    session.items().iter().map(|r| r.key.as_str()).collect()
}

#[test]
fn test_empty_query_is_rejected_without_a_ticket() {
    let mut session = SearchSession::new();
    let err = session.start_search("").unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));
    assert_eq!(session.error(), Some(EMPTY_QUERY_MESSAGE));
    assert!(!session.has_searched());
    assert!(!session.is_fetching());
    assert!(session.items().is_empty());
}

#[test]
fn test_whitespace_query_is_rejected() {
    let mut session = SearchSession::new();
    assert!(matches!(
        session.start_search("   \t "),
        Err(SearchError::Validation(_))
    ));
}

#[test]
fn test_start_search_issues_page_one_reset_ticket() {
    let mut session = SearchSession::new();
    let ticket = session.start_search("  moon  ").unwrap();
    assert_eq!(ticket.page, 1);
    assert_eq!(ticket.mode, FetchMode::Reset);
    assert_eq!(ticket.query, "moon");
    assert!(session.is_initial_loading());
    assert!(!session.is_loading_more());
    assert!(session.has_searched());
    assert!(session.error().is_none());
}

#[test]
fn test_successful_search_replaces_items() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("moon").unwrap();
    session.complete(&ticket, Ok(page(&["M1", "M2"], Some(2))));
    assert_eq!(keys(&session), vec!["M1", "M2"]);

    // A second search fully replaces the set, no duplication.
    let ticket = session.start_search("moon").unwrap();
    session.complete(&ticket, Ok(page(&["M1", "M2"], Some(2))));
    assert_eq!(keys(&session), vec!["M1", "M2"]);
    assert_eq!(session.total_hits(), Some(2));
    assert!(!session.has_more());
    assert!(!session.is_initial_loading());
}

#[test]
fn test_pagination_accumulates_and_stops_at_total_hits() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("galaxy").unwrap();
    session.complete(&ticket, Ok(page(&["A"], Some(2))));
    assert_eq!(keys(&session), vec!["A"]);
    assert!(session.has_more());
    assert_eq!(session.current_page(), 1);

    let ticket = session.load_more().unwrap();
    assert_eq!(ticket.page, 2);
    assert_eq!(ticket.mode, FetchMode::Append);
    assert!(session.is_loading_more());

    session.complete(&ticket, Ok(page(&["B"], Some(2))));
    assert_eq!(keys(&session), vec!["A", "B"]);
    assert!(!session.has_more());
    assert_eq!(session.current_page(), 2);
    assert!(!session.is_loading_more());
}

#[test]
fn test_emptiness_heuristic_stops_pagination() {
    let mut session = SearchSession::new();

    // No total_hits anywhere: a non-empty page keeps paginating...
    let ticket = session.start_search("nebula").unwrap();
    session.complete(&ticket, Ok(page(&["N1"], None)));
    assert_eq!(session.total_hits(), None);
    assert!(session.has_more());

    // ...and an empty page means exhaustion.
    let ticket = session.load_more().unwrap();
    session.complete(&ticket, Ok(page(&[], None)));
    assert!(!session.has_more());
    assert_eq!(keys(&session), vec!["N1"]);
}

#[test]
fn test_non_numeric_total_hits_falls_back_to_heuristic() {
    let mut session = SearchSession::new();
    let result: ImageSearchResult = serde_json::from_value(json!({
        "collection": {
            "items": [{ "data": [{ "nasa_id": "X", "title": "X" }] }],
            "metadata": { "total_hits": "many" }
        }
    }))
    .unwrap();

    let ticket = session.start_search("x").unwrap();
    session.complete(&ticket, Ok(result));
    assert_eq!(session.total_hits(), None);
    assert!(session.has_more());
}

#[test]
fn test_reset_failure_clears_items_and_stops_pagination() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("moon").unwrap();
    session.complete(&ticket, Ok(page(&["M1"], Some(5))));

    let ticket = session.start_search("mars").unwrap();
    session.complete(&ticket, Err("Failed to load NASA images.".to_string()));

    assert!(session.items().is_empty());
    assert!(!session.has_more());
    assert_eq!(session.total_hits(), None);
    assert_eq!(session.error(), Some("Failed to load NASA images."));
    assert!(!session.is_initial_loading());
}

#[test]
fn test_append_failure_preserves_partial_results() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("moon").unwrap();
    session.complete(&ticket, Ok(page(&["A"], Some(3))));

    let ticket = session.load_more().unwrap();
    session.complete(&ticket, Err("Network error. Please try again.".to_string()));

    assert_eq!(keys(&session), vec!["A"]);
    assert_eq!(session.error(), Some("Network error. Please try again."));
    assert!(!session.is_loading_more());
    // Retry stays possible.
    assert!(session.has_more());
    assert!(session.load_more().is_ok());
}

#[test]
fn test_current_page_only_advances_on_success() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("moon").unwrap();
    session.complete(&ticket, Ok(page(&["A"], Some(3))));
    assert_eq!(session.current_page(), 1);

    let ticket = session.load_more().unwrap();
    session.complete(&ticket, Err("boom".to_string()));
    assert_eq!(session.current_page(), 1);

    // The retry requests page 2 again, not page 3.
    let ticket = session.load_more().unwrap();
    assert_eq!(ticket.page, 2);
}

#[test]
fn test_load_more_preconditions() {
    let mut session = SearchSession::new();

    // Before any search.
    assert!(matches!(
        session.load_more(),
        Err(SearchError::Precondition(_))
    ));

    // While a fetch is in flight.
    let ticket = session.start_search("moon").unwrap();
    assert!(matches!(
        session.load_more(),
        Err(SearchError::Precondition(_))
    ));
    session.complete(&ticket, Ok(page(&["A"], Some(1))));

    // Once exhausted.
    assert!(!session.has_more());
    assert!(matches!(
        session.load_more(),
        Err(SearchError::Precondition(_))
    ));
}

#[test]
fn test_stale_completion_is_discarded() {
    let mut session = SearchSession::new();

    let first = session.start_search("slow").unwrap();
    // User types a new query before page 1 of the first search lands.
    let second = session.start_search("fast").unwrap();

    // The superseded response must not touch state.
    assert_eq!(
        session.complete(&first, Ok(page(&["SLOW"], Some(1)))),
        Completion::Stale
    );
    assert!(session.items().is_empty());
    assert!(session.is_initial_loading());
    assert_eq!(session.query(), "fast");

    assert_eq!(
        session.complete(&second, Ok(page(&["FAST"], Some(1)))),
        Completion::Applied
    );
    assert_eq!(keys(&session), vec!["FAST"]);
    assert!(!session.is_initial_loading());
}

#[test]
fn test_fallback_keys_are_stable_and_distinct_across_pages() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("untagged").unwrap();
    session.complete(&ticket, Ok(anonymous_page(2, Some(4))));
    let ticket = session.load_more().unwrap();
    session.complete(&ticket, Ok(anonymous_page(2, Some(4))));

    let keys = keys(&session);
    assert_eq!(keys, vec!["page1-item0", "page1-item1", "page2-item0", "page2-item1"]);
}

#[test]
fn test_retry_after_error_reenters_initial_loading() {
    let mut session = SearchSession::new();

    let ticket = session.start_search("moon").unwrap();
    session.complete(&ticket, Err("upstream down".to_string()));
    assert!(session.error().is_some());

    // Explicit retry from the error state.
    let ticket = session.start_search("moon").unwrap();
    assert!(session.is_initial_loading());
    assert!(session.error().is_none());
    session.complete(&ticket, Ok(page(&["M1"], Some(1))));
    assert_eq!(keys(&session), vec!["M1"]);
}

// ---------------------------------------------------------------------------
// Invariant sweep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Start(String),
    LoadMore,
    Complete {
        ok: bool,
        item_count: usize,
        hits: Option<u64>,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop_oneof![
            Just(String::new()),
            Just("   ".to_string()),
            Just("moon".to_string()),
            Just(" galaxy ".to_string()),
        ]
        .prop_map(Op::Start),
        Just(Op::LoadMore),
        (any::<bool>(), 0usize..4, proptest::option::of(0u64..6)).prop_map(
            |(ok, item_count, hits)| Op::Complete {
                ok,
                item_count,
                hits,
            }
        ),
    ]
}

fn check_invariants(session: &SearchSession) {
    if !session.has_searched() {
        assert!(session.items().is_empty());
    }
    // At most one loading flag, and only while a fetch is in flight.
    assert!(!(session.is_initial_loading() && session.is_loading_more()));
    assert_eq!(
        session.is_fetching(),
        session.is_initial_loading() || session.is_loading_more()
    );
    assert!(session.current_page() >= 1);
}

proptest! {
    #[test]
    fn prop_session_invariants_hold(ops in proptest::collection::vec(op_strategy(), 1..25)) {
        let mut session = SearchSession::new();
        let mut pending = Vec::new();

        for op in ops {
            match op {
                Op::Start(query) => {
                    if let Ok(ticket) = session.start_search(&query) {
                        pending.push(ticket);
                    }
                }
                Op::LoadMore => {
                    if let Ok(ticket) = session.load_more() {
                        pending.push(ticket);
                    }
                }
                Op::Complete { ok, item_count, hits } => {
                    if let Some(ticket) = pending.pop() {
                        let outcome = if ok {
                            Ok(anonymous_page(item_count, hits))
                        } else {
                            Err("synthetic failure".to_string())
                        };
                        session.complete(&ticket, outcome);
                    }
                }
            }
            check_invariants(&session);
        }
    }
}
