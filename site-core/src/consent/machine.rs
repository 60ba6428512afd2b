//! The consent state machine.
//!
//! ```text
//!            startup_check (once)
//!  Unknown ─────────────────────┬──▶ Undecided ──┐
//!                               │   (banner)     │ accept_all / accept_necessary /
//!                               └──▶ Decided ◀───┘ save_selection
//!                                      ▲  │
//!                                      └──┘ (same actions again)
//! ```
//!
//! Opening and closing the settings panel never changes the state; it only
//! flips the panel's visibility. Every transition that persists a decision
//! hides both the banner and the panel.

use crate::persist::KeyValueStore;

use super::{Category, ConsentDecision, ConsentRecord, ConsentStore};

/// Where the machine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    /// The startup check has not run yet.
    Unknown,
    /// No valid record was found; the visitor has to choose.
    Undecided,
    /// A decision is active for this session.
    Decided(ConsentDecision),
}

/// What the banner and settings panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub banner_visible: bool,
    pub settings_visible: bool,
}

/// Result of feeding an action to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The action took effect.
    Applied,
    /// The action does not apply in the current state.
    Ignored,
    /// The decision could not be stored; state and visibility are unchanged.
    NotPersisted,
}

/// The settings panel's working copy of a decision.
///
/// Edits here are not a decision until saved; closing the panel drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsPanel {
    draft: ConsentDecision,
}

impl SettingsPanel {
    fn new(draft: ConsentDecision) -> Self {
        Self { draft }
    }

    /// Current contents of the panel.
    pub fn draft(&self) -> ConsentDecision {
        self.draft
    }

    /// Whether the row for `category` is checked.
    pub fn is_checked(&self, category: Category) -> bool {
        self.draft.get(category)
    }

    /// Whether the row for `category` accepts input. The necessary row is
    /// always checked and never interactive.
    pub fn is_interactive(&self, category: Category) -> bool {
        !category.is_required()
    }
}

/// Holds the visitor's consent for the session and mediates every change.
#[derive(Debug)]
pub struct ConsentMachine<S> {
    store: ConsentStore<S>,
    state: ConsentState,
    banner_visible: bool,
    panel: Option<SettingsPanel>,
}

impl<S: KeyValueStore> ConsentMachine<S> {
    /// Create a machine in [`ConsentState::Unknown`]. Call
    /// [`startup_check`](Self::startup_check) before anything else.
    pub fn new(store: ConsentStore<S>) -> Self {
        Self {
            store,
            state: ConsentState::Unknown,
            banner_visible: false,
            panel: None,
        }
    }

    /// Create a machine and run the startup check immediately.
    pub fn start(store: ConsentStore<S>) -> Self {
        let mut machine = Self::new(store);
        machine.startup_check();
        machine
    }

    /// Load the stored decision. Runs once; later calls are ignored.
    pub fn startup_check(&mut self) -> Transition {
        if self.state != ConsentState::Unknown {
            return Transition::Ignored;
        }

        match self.store.read() {
            Some(record) if record.is_current() => {
                tracing::debug!(consent = ?record.consent, "restored stored consent");
                self.state = ConsentState::Decided(record.consent);
                self.banner_visible = false;
            }
            Some(record) => {
                tracing::info!(
                    found = %record.version,
                    expected = super::CONSENT_VERSION,
                    "stored consent has another schema version; asking again"
                );
                self.state = ConsentState::Undecided;
                self.banner_visible = true;
            }
            None => {
                tracing::debug!("no stored consent; showing banner");
                self.state = ConsentState::Undecided;
                self.banner_visible = true;
            }
        }
        Transition::Applied
    }

    /// Grant every category.
    pub fn accept_all(&mut self) -> Transition {
        self.decide(ConsentDecision::all())
    }

    /// Grant only the necessary category.
    pub fn accept_necessary(&mut self) -> Transition {
        self.decide(ConsentDecision::necessary_only())
    }

    /// Persist whatever the open settings panel holds.
    ///
    /// Ignored when the panel is closed.
    pub fn save_selection(&mut self) -> Transition {
        match self.panel {
            Some(panel) => self.decide(panel.draft()),
            None => Transition::Ignored,
        }
    }

    /// Show the settings panel, pre-filled with the current decision.
    pub fn open_settings(&mut self) -> Transition {
        if self.state == ConsentState::Unknown {
            return Transition::Ignored;
        }
        let draft = self.decision().unwrap_or_default();
        self.panel = Some(SettingsPanel::new(draft));
        Transition::Applied
    }

    /// Hide the settings panel, discarding unsaved edits.
    pub fn close_settings(&mut self) -> Transition {
        match self.panel.take() {
            Some(_) => Transition::Applied,
            None => Transition::Ignored,
        }
    }

    /// Flip one row of the open settings panel.
    ///
    /// Ignored for the necessary category and when the panel is closed.
    pub fn toggle(&mut self, category: Category, granted: bool) -> Transition {
        let Some(panel) = self.panel.as_mut() else {
            return Transition::Ignored;
        };
        if panel.draft.set(category, granted) {
            Transition::Applied
        } else {
            Transition::Ignored
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConsentState {
        self.state
    }

    /// The active decision, if one has been loaded or made.
    pub fn decision(&self) -> Option<ConsentDecision> {
        match self.state {
            ConsentState::Decided(decision) => Some(decision),
            _ => None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        Visibility {
            banner_visible: self.banner_visible,
            settings_visible: self.panel.is_some(),
        }
    }

    /// The open settings panel.
    pub fn settings(&self) -> Option<&SettingsPanel> {
        self.panel.as_ref()
    }

    /// Whether code belonging to `category` may run right now.
    ///
    /// Necessary is always allowed; everything else needs a decision that
    /// grants it.
    pub fn allows(&self, category: Category) -> bool {
        if category.is_required() {
            return true;
        }
        self.decision().is_some_and(|d| d.get(category))
    }

    pub fn store(&self) -> &ConsentStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConsentStore<S> {
        &mut self.store
    }

    /// Persist `decision` and make it current.
    fn decide(&mut self, decision: ConsentDecision) -> Transition {
        if self.state == ConsentState::Unknown {
            return Transition::Ignored;
        }

        let record = ConsentRecord::current(decision);
        if let Err(e) = self.store.write(&record) {
            tracing::warn!(error = %e, "could not store consent decision");
            return Transition::NotPersisted;
        }

        tracing::info!(
            analytics = decision.analytics,
            marketing = decision.marketing,
            functional = decision.functional,
            "consent decision stored"
        );
        self.state = ConsentState::Decided(decision);
        self.banner_visible = false;
        self.panel = None;
        Transition::Applied
    }
}
