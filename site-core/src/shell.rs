//! The shell: composition root for consent, routing and content.
//!
//! The shell owns a [`ConsentMachine`], a [`Router`] and a
//! [`ContentProvider`]. Front ends turn user input into [`Action`]s, feed
//! them to [`Shell::dispatch`] and draw whatever [`Shell::view`] returns.
//! The shell adds no behavior of its own beyond that wiring.

use crate::consent::{
    Category, ConsentDecision, ConsentMachine, ConsentStore, SettingsPanel, Transition, Visibility,
};
use crate::content::{
    CategoryCopy, Chrome, ConsentCopy, ContentProvider, Link, LinkTarget, Page, StaticContent,
};
use crate::history::{History, MemoryHistory};
use crate::persist::KeyValueStore;
use crate::router::{Route, Router};

/// Everything a visitor (or the browser) can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AcceptAll,
    AcceptNecessary,
    SaveSelection,
    OpenSettings,
    CloseSettings,
    ToggleCategory(Category, bool),
    /// Follow an internal link.
    Navigate(String),
    /// Browser back button.
    HistoryBack,
    /// Browser forward button.
    HistoryForward,
}

impl Action {
    /// Whether the action belongs to the consent subsystem.
    pub fn is_consent(&self) -> bool {
        !matches!(
            self,
            Action::Navigate(_) | Action::HistoryBack | Action::HistoryForward
        )
    }
}

/// What following a link asks of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The shell navigated; redraw.
    Navigated(Route),
    /// The link leaves the site; the front end decides how to open it.
    External(&'static str),
}

/// A borrowed snapshot of everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct ShellView<'a> {
    pub route: Route,
    pub pathname: &'a str,
    pub page: &'a Page,
    pub chrome: &'a Chrome,
    pub consent_copy: &'a ConsentCopy,
    pub visibility: Visibility,
    /// The active decision, if any.
    pub decision: Option<ConsentDecision>,
    /// The open settings panel, if any.
    pub settings: Option<SettingsPanel>,
    /// Copy for each category, in display order.
    pub categories: [(Category, &'a CategoryCopy); 4],
}

impl ShellView<'_> {
    pub fn banner_visible(&self) -> bool {
        self.visibility.banner_visible
    }

    pub fn settings_visible(&self) -> bool {
        self.visibility.settings_visible
    }
}

/// The shell as the front ends run it: any medium, in-process history and
/// the built-in content.
pub type SiteShell = Shell<Box<dyn KeyValueStore>, MemoryHistory, StaticContent>;

/// Composition root.
pub struct Shell<S, H: History, C> {
    consent: ConsentMachine<S>,
    router: Router<H>,
    content: C,
}

impl<S, H, C> Shell<S, H, C>
where
    S: KeyValueStore,
    H: History,
    C: ContentProvider,
{
    /// Build a shell and run the consent startup check.
    ///
    /// The check happens here so no action can ever observe the machine
    /// before it knows whether a decision exists.
    pub fn new(storage: S, history: H, content: C) -> Self {
        let consent = ConsentMachine::start(ConsentStore::new(storage));
        let router = Router::new(history);
        tracing::debug!(
            route = %router.route(),
            state = ?consent.state(),
            "shell started"
        );
        Self {
            consent,
            router,
            content,
        }
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::AcceptAll => self.consent.accept_all(),
            Action::AcceptNecessary => self.consent.accept_necessary(),
            Action::SaveSelection => self.consent.save_selection(),
            Action::OpenSettings => self.consent.open_settings(),
            Action::CloseSettings => self.consent.close_settings(),
            Action::ToggleCategory(category, granted) => self.consent.toggle(category, granted),
            Action::Navigate(path) => {
                self.router.navigate(&path);
                Transition::Applied
            }
            Action::HistoryBack => traversed(self.router.history_mut().back()),
            Action::HistoryForward => traversed(self.router.history_mut().forward()),
        }
    }

    /// Follow a content link.
    pub fn follow(&mut self, link: &Link) -> LinkOutcome {
        match link.target {
            LinkTarget::Internal(path) => {
                self.dispatch(Action::Navigate(path.to_string()));
                LinkOutcome::Navigated(self.route())
            }
            LinkTarget::External(url) => {
                tracing::debug!(url, "external link");
                LinkOutcome::External(url)
            }
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ShellView<'_> {
        let route = self.route();
        let categories = Category::ALL.map(|c| (c, self.content.category(c)));
        ShellView {
            route,
            pathname: self.router.history().pathname(),
            page: self.content.page(route),
            chrome: self.content.chrome(),
            consent_copy: self.content.consent_copy(),
            visibility: self.consent.visibility(),
            decision: self.consent.decision(),
            settings: self.consent.settings().copied(),
            categories,
        }
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    /// The current page body.
    pub fn page(&self) -> &Page {
        self.content.page(self.route())
    }

    /// Every followable link in display order: page body, consent banner
    /// while it is shown, then the footer.
    pub fn links(&self) -> Vec<Link> {
        let mut links = self.page().links();
        if self.consent.visibility().banner_visible {
            links.extend(self.content.consent_copy().banner_links.iter().copied());
        }
        links.extend(self.content.chrome().footer_links.iter().copied());
        links
    }

    pub fn consent(&self) -> &ConsentMachine<S> {
        &self.consent
    }

    pub fn consent_mut(&mut self) -> &mut ConsentMachine<S> {
        &mut self.consent
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    pub fn history(&self) -> &H {
        self.router.history()
    }

    /// Mutable access to the history, e.g. to drain scroll requests.
    pub fn history_mut(&mut self) -> &mut H {
        self.router.history_mut()
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

fn traversed(moved: bool) -> Transition {
    if moved {
        Transition::Applied
    } else {
        Transition::Ignored
    }
}

impl<S, H, C> std::fmt::Debug for Shell<S, H, C>
where
    S: std::fmt::Debug,
    H: History + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("consent", &self.consent)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}
