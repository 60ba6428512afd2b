//! Cookie consent: the persisted decision, its store and the state machine
//! that drives the banner and settings panel.

pub mod machine;
pub mod store;

pub use machine::{ConsentMachine, ConsentState, SettingsPanel, Transition, Visibility};
pub use store::ConsentStore;

use serde::{Deserialize, Serialize};

/// Storage key holding the consent record.
pub const CONSENT_STORAGE_KEY: &str = "cookie-consent";

/// Schema version written with every record. Records carrying any other
/// version are treated as absent.
pub const CONSENT_VERSION: &str = "1.0";

/// Categories of tracking technology a visitor can consent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Technically required; always on.
    Necessary,
    Analytics,
    Marketing,
    Functional,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Necessary,
        Category::Analytics,
        Category::Marketing,
        Category::Functional,
    ];

    /// The categories a visitor may switch on or off.
    pub const OPTIONAL: [Category; 3] = [
        Category::Analytics,
        Category::Marketing,
        Category::Functional,
    ];

    /// Whether the category is a structural constant rather than a choice.
    pub fn is_required(self) -> bool {
        matches!(self, Category::Necessary)
    }

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Necessary => "necessary",
            Category::Analytics => "analytics",
            Category::Marketing => "marketing",
            Category::Functional => "functional",
        }
    }

    /// Parse an identifier, case-insensitively. Accepts the German labels'
    /// short forms used on the site as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "necessary" | "notwendig" => Some(Category::Necessary),
            "analytics" | "statistik" => Some(Category::Analytics),
            "marketing" => Some(Category::Marketing),
            "functional" | "funktional" => Some(Category::Functional),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visitor's consent decision.
///
/// `necessary` is always `true`. The field is private so no code path can
/// clear it; it is still serialized so the stored shape stays
/// `{necessary, analytics, marketing, functional}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentDecision {
    necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub functional: bool,
}

impl ConsentDecision {
    /// Everything granted.
    pub fn all() -> Self {
        Self::new(true, true, true)
    }

    /// Only the technically required category.
    pub fn necessary_only() -> Self {
        Self::new(false, false, false)
    }

    /// A decision with the given optional flags; `necessary` is always set.
    pub fn new(analytics: bool, marketing: bool, functional: bool) -> Self {
        Self {
            necessary: true,
            analytics,
            marketing,
            functional,
        }
    }

    /// Always `true`.
    pub fn necessary(&self) -> bool {
        self.necessary
    }

    /// Whether `category` is granted.
    pub fn get(&self, category: Category) -> bool {
        match category {
            Category::Necessary => self.necessary,
            Category::Analytics => self.analytics,
            Category::Marketing => self.marketing,
            Category::Functional => self.functional,
        }
    }

    /// Set an optional category. Returns `false` (and changes nothing) for
    /// [`Category::Necessary`].
    pub fn set(&mut self, category: Category, granted: bool) -> bool {
        match category {
            Category::Necessary => return false,
            Category::Analytics => self.analytics = granted,
            Category::Marketing => self.marketing = granted,
            Category::Functional => self.functional = granted,
        }
        true
    }

    /// Restore the `necessary` invariant on a value decoded from outside.
    pub(crate) fn normalized(mut self) -> Self {
        if !self.necessary {
            tracing::debug!("stored decision had necessary=false; forcing true");
            self.necessary = true;
        }
        self
    }
}

impl Default for ConsentDecision {
    fn default() -> Self {
        Self::necessary_only()
    }
}

/// The persisted unit: a decision tagged with the schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub version: String,
    pub consent: ConsentDecision,
}

impl ConsentRecord {
    /// Wrap a decision in a record carrying the current schema version.
    pub fn current(consent: ConsentDecision) -> Self {
        Self {
            version: CONSENT_VERSION.to_string(),
            consent,
        }
    }

    /// Whether the record was written by this schema version.
    pub fn is_current(&self) -> bool {
        self.version == CONSENT_VERSION
    }
}
