//! Client-side routing.
//!
//! The site has four logical pages. A location maps to one of them by
//! case-insensitive prefix match against a fixed table; anything else is
//! the home page, so routing never fails.
//!
//! Matching is by prefix, not by path segment: `/impressumFoo` resolves to
//! the legal notice. That mirrors how the site has always behaved and is
//! kept for compatibility, although it may not have been intended.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::history::{History, ScrollBehavior, Subscription};

/// A logical page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    #[default]
    Home,
    LegalNotice,
    PrivacyPolicy,
    CookiePolicy,
}

/// Prefix table, checked in order.
const ROUTE_PREFIXES: [(&str, Route); 3] = [
    ("/impressum", Route::LegalNotice),
    ("/datenschutz", Route::PrivacyPolicy),
    ("/cookies", Route::CookiePolicy),
];

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::LegalNotice,
        Route::PrivacyPolicy,
        Route::CookiePolicy,
    ];

    /// Stable identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::LegalNotice => "legal-notice",
            Route::PrivacyPolicy => "privacy-policy",
            Route::CookiePolicy => "cookie-policy",
        }
    }

    /// The path the site's own links use for this page.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::LegalNotice => "/Impressum",
            Route::PrivacyPolicy => "/Datenschutz",
            Route::CookiePolicy => "/Cookies",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Map a location path to a page. Pure and total.
pub fn resolve(path: &str) -> Route {
    let lower = path.to_lowercase();
    ROUTE_PREFIXES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, route)| *route)
        .unwrap_or_default()
}

/// Tracks the current page on top of a [`History`].
///
/// The router listens for traversals it did not initiate for as long as it
/// lives; dropping it removes the listener.
pub struct Router<H: History> {
    history: H,
    current: Rc<Cell<Route>>,
    _traversals: Subscription,
}

impl<H: History> Router<H> {
    /// Resolve the history's current location and start listening.
    pub fn new(history: H) -> Self {
        let current = Rc::new(Cell::new(resolve(history.pathname())));

        let sink = Rc::clone(&current);
        let traversals = history.subscribe(Box::new(move |path: &str| {
            let route = resolve(path);
            tracing::debug!(path, route = %route, "location changed externally");
            sink.set(route);
        }));

        Self {
            history,
            current,
            _traversals: traversals,
        }
    }

    /// The page for the current location.
    pub fn route(&self) -> Route {
        self.current.get()
    }

    /// Go to `path` without reloading.
    ///
    /// A history entry is pushed only when `path` differs from the current
    /// location. The route is always recomputed and the page always scrolls
    /// back to the top.
    pub fn navigate(&mut self, path: &str) {
        if path != self.history.pathname() {
            self.history.push_state(path);
        }
        let route = resolve(path);
        tracing::debug!(path, route = %route, "navigate");
        self.current.set(route);
        self.history.scroll_to_top(ScrollBehavior::Smooth);
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the history, e.g. to drive back/forward.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}

impl<H: History + std::fmt::Debug> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("route", &self.route())
            .field("history", &self.history)
            .finish()
    }
}
