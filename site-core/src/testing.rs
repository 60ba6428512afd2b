//! Testing utilities for the site.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted consent and navigation scenarios
//! - Assertion helpers for verifying visibility, route and stored state

use crate::consent::{ConsentDecision, ConsentRecord, Transition, CONSENT_STORAGE_KEY};
use crate::content::StaticContent;
use crate::history::{History, MemoryHistory};
use crate::persist::{KeyValueStore, MemoryStorage};
use crate::router::Route;
use crate::shell::{Action, Shell, ShellView};

/// Shell over in-memory storage and history with the built-in content.
pub type TestShell = Shell<MemoryStorage, MemoryHistory, StaticContent>;

/// Test harness for running site scenarios.
pub struct TestHarness {
    /// The shell under test.
    pub shell: TestShell,
}

impl TestHarness {
    /// A first visit: empty storage, at `/`.
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new(), "/")
    }

    /// A first visit at `path`.
    pub fn at(path: &str) -> Self {
        Self::with_storage(MemoryStorage::new(), path)
    }

    /// A visit whose storage already holds `raw` under the consent key.
    pub fn with_stored(raw: &str) -> Self {
        Self::with_storage(MemoryStorage::with_entry(CONSENT_STORAGE_KEY, raw), "/")
    }

    /// A visit whose storage holds a current record for `decision`.
    pub fn with_decision(decision: ConsentDecision) -> Self {
        let raw = serde_json::to_string(&ConsentRecord::current(decision))
            .expect("consent record serializes");
        Self::with_stored(&raw)
    }

    /// A visit over an arbitrary medium.
    pub fn with_storage(storage: MemoryStorage, path: &str) -> Self {
        Self {
            shell: Shell::new(storage, MemoryHistory::new(path), StaticContent),
        }
    }

    /// Dispatch one action.
    pub fn act(&mut self, action: Action) -> Transition {
        self.shell.dispatch(action)
    }

    /// Dispatch actions in order and return their outcomes.
    pub fn run(&mut self, script: impl IntoIterator<Item = Action>) -> Vec<Transition> {
        script.into_iter().map(|a| self.shell.dispatch(a)).collect()
    }

    /// Navigate to `path`.
    pub fn go(&mut self, path: &str) -> &mut Self {
        self.shell.dispatch(Action::Navigate(path.to_string()));
        self
    }

    /// Simulate a page reload: a fresh shell over the same storage at the
    /// current location.
    pub fn reload(&mut self) -> &mut Self {
        let storage = self.storage().clone();
        let path = self.shell.history().pathname().to_string();
        *self = Self::with_storage(storage, &path);
        self
    }

    pub fn view(&self) -> ShellView<'_> {
        self.shell.view()
    }

    pub fn route(&self) -> Route {
        self.shell.route()
    }

    /// The medium as it stands.
    pub fn storage(&self) -> &MemoryStorage {
        self.shell.consent().store().storage()
    }

    /// Raw value under the consent key.
    pub fn stored_raw(&self) -> Option<String> {
        self.storage()
            .get(CONSENT_STORAGE_KEY)
            .expect("memory storage never fails")
    }

    /// Stored record, decoded without any fallback.
    pub fn stored_record(&self) -> Option<ConsentRecord> {
        self.stored_raw()
            .map(|raw| serde_json::from_str(&raw).expect("stored record is valid JSON"))
    }

    pub fn history(&self) -> &MemoryHistory {
        self.shell.history()
    }

    pub fn history_mut(&mut self) -> &mut MemoryHistory {
        self.shell.history_mut()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the banner is showing.
#[track_caller]
pub fn assert_banner_visible(harness: &TestHarness) {
    assert!(harness.view().banner_visible(), "Expected banner to be visible");
}

/// Assert the banner is NOT showing.
#[track_caller]
pub fn assert_banner_hidden(harness: &TestHarness) {
    assert!(!harness.view().banner_visible(), "Expected banner to be hidden");
}

/// Assert the settings panel is open.
#[track_caller]
pub fn assert_settings_open(harness: &TestHarness) {
    assert!(harness.view().settings_visible(), "Expected settings panel to be open");
}

/// Assert the settings panel is closed.
#[track_caller]
pub fn assert_settings_closed(harness: &TestHarness) {
    assert!(!harness.view().settings_visible(), "Expected settings panel to be closed");
}

/// Assert the current page.
#[track_caller]
pub fn assert_route(harness: &TestHarness, expected: Route) {
    let actual = harness.route();
    assert_eq!(actual, expected, "Expected route {expected}, got {actual}");
}

/// Assert the stored record is current and holds `expected`.
#[track_caller]
pub fn assert_stored_decision(harness: &TestHarness, expected: ConsentDecision) {
    let record = harness
        .stored_record()
        .unwrap_or_else(|| panic!("Expected a stored decision, found none"));
    assert!(record.is_current(), "Expected version 1.0, got {}", record.version);
    assert_eq!(record.consent, expected, "Stored decision differs");
}

/// Assert nothing is stored under the consent key.
#[track_caller]
pub fn assert_nothing_stored(harness: &TestHarness) {
    assert_eq!(harness.stored_raw(), None, "Expected no stored consent");
}
