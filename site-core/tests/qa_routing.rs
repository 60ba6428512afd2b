//! QA tests for client-side navigation.
//!
//! These tests drive the router through the shell the way a visitor's
//! browser would: link clicks, back and forward.
//! Run with: `cargo test -p site-core --test qa_routing`

use site_core::content::{ContentProvider, LinkTarget};
use site_core::testing::{assert_banner_visible, assert_route, TestHarness};
use site_core::{
    Action, History, LinkOutcome, MemoryHistory, Route, Router, ScrollBehavior, StaticContent,
    Transition,
};

// =============================================================================
// TEST 1: Navigate, then browser back
// =============================================================================

#[test]
fn test_navigate_then_back() {
    let mut harness = TestHarness::new();
    assert_route(&harness, Route::Home);

    harness.go("/Datenschutz");
    assert_route(&harness, Route::PrivacyPolicy);
    assert_eq!(harness.history().len(), 2);

    assert_eq!(harness.act(Action::HistoryBack), Transition::Applied);
    assert_route(&harness, Route::Home);
    // Same shell, same history: nothing was reloaded.
    assert_eq!(harness.history().len(), 2);
    assert_eq!(harness.history().index(), 0);
}

#[test]
fn test_back_forward_across_several_pages() {
    let mut harness = TestHarness::new();
    harness.go("/Impressum").go("/Datenschutz").go("/Cookies");

    let mut seen = vec![harness.route()];
    while harness.act(Action::HistoryBack) == Transition::Applied {
        seen.push(harness.route());
    }
    assert_eq!(
        seen,
        [
            Route::CookiePolicy,
            Route::PrivacyPolicy,
            Route::LegalNotice,
            Route::Home
        ]
    );

    harness.act(Action::HistoryForward);
    assert_route(&harness, Route::LegalNotice);

    // A new navigation drops the forward entries.
    harness.go("/Cookies");
    assert_eq!(harness.act(Action::HistoryForward), Transition::Ignored);
    assert_eq!(harness.history().entries(), ["/", "/Impressum", "/Cookies"]);
}

// =============================================================================
// TEST 2: Scroll requests
// =============================================================================

#[test]
fn test_every_navigation_requests_smooth_scroll() {
    let mut harness = TestHarness::new();
    harness.go("/Cookies").go("/Cookies").go("/");

    let mut requests = Vec::new();
    while let Some(behavior) = harness.history_mut().take_scroll_request() {
        requests.push(behavior);
    }
    assert_eq!(requests, [ScrollBehavior::Smooth; 3]);
    // Same-path navigation did not add an entry.
    assert_eq!(harness.history().len(), 3);
}

#[test]
fn test_traversal_does_not_scroll() {
    let mut harness = TestHarness::new();
    harness.go("/Impressum");
    harness.history_mut().take_scroll_request();

    harness.act(Action::HistoryBack);
    assert_eq!(harness.history().pending_scroll_requests(), 0);
}

// =============================================================================
// TEST 3: Links from content
// =============================================================================

#[test]
fn test_footer_links_reach_every_legal_page() {
    let mut harness = TestHarness::new();
    let links = StaticContent.chrome().footer_links.clone();
    let mut reached = Vec::new();
    for link in &links {
        match harness.shell.follow(link) {
            LinkOutcome::Navigated(route) => reached.push(route),
            LinkOutcome::External(url) => panic!("footer link leaves the site: {url}"),
        }
    }
    assert_eq!(
        reached,
        [Route::LegalNotice, Route::PrivacyPolicy, Route::CookiePolicy]
    );
}

#[test]
fn test_banner_links_do_not_decide() {
    let mut harness = TestHarness::new();
    let links = StaticContent.consent_copy().banner_links.clone();
    for link in &links {
        assert!(matches!(link.target, LinkTarget::Internal(_)));
        harness.shell.follow(link);
        assert_banner_visible(&harness);
    }
    assert_route(&harness, Route::CookiePolicy);
}

#[test]
fn test_unknown_location_renders_home() {
    let harness = TestHarness::at("/gibt-es-nicht");
    assert_route(&harness, Route::Home);
    assert_eq!(harness.view().pathname, "/gibt-es-nicht");
}

// =============================================================================
// TEST 4: Subscription lifetime
// =============================================================================

#[test]
fn test_router_unsubscribes_on_drop() {
    let mut history = MemoryHistory::new("/");
    history.push_state("/Impressum");

    {
        let router = Router::new(&mut history);
        assert_eq!(router.route(), Route::LegalNotice);
    }

    assert_eq!(history.subscriber_count(), 0);
    assert!(history.back());
}
