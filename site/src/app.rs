//! Main application state and logic

use ratatui::layout::Rect;

use site_core::consent::Category;
use site_core::content::Link;
use site_core::{Action, LinkOutcome, Route, ScrollBehavior, SiteShell, Transition};

use crate::ui::layout::AppLayout;
use crate::ui::theme::SiteTheme;
use crate::ui::widgets::consent::banner_height;
use crate::ui::widgets::page::page_lines;
use crate::ui::widgets::HotkeyContext;
use crate::ui::Overlay;

/// Body rows assumed before the first resize.
const DEFAULT_VIEWPORT: usize = 16;

/// Main application state
pub struct App {
    pub shell: SiteShell,

    // UI state
    pub theme: SiteTheme,
    overlay: Option<Overlay>,
    pub panel_cursor: usize,

    // Page display
    scroll: usize,
    scroll_animating: bool,
    viewport: usize,
    focused_link: Option<usize>,

    // Status
    status_message: Option<String>,
}

impl App {
    pub fn new(shell: SiteShell) -> Self {
        Self {
            shell,
            theme: SiteTheme::default(),
            overlay: None,
            panel_cursor: 0,
            scroll: 0,
            scroll_animating: false,
            viewport: DEFAULT_VIEWPORT,
            focused_link: None,
            status_message: None,
        }
    }

    /// Apply a shell action and react to its outcome.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let before = self.shell.route();
        let banner_before = self.shell.view().banner_visible();
        let traversal = matches!(action, Action::HistoryBack | Action::HistoryForward);
        let transition = self.shell.dispatch(action);

        match transition {
            Transition::NotPersisted => {
                self.set_status("Entscheidung konnte nicht gespeichert werden");
            }
            Transition::Ignored if traversal => self.set_status("Kein weiterer Eintrag im Verlauf"),
            _ => {}
        }

        // Link indices shift when the page or the banner changes.
        if self.shell.route() != before || self.shell.view().banner_visible() != banner_before {
            self.focused_link = None;
        }
        self.drain_scroll_requests();
        self.scroll = self.scroll.min(self.max_scroll());
        transition
    }

    fn drain_scroll_requests(&mut self) {
        while let Some(behavior) = self.shell.history_mut().take_scroll_request() {
            match behavior {
                ScrollBehavior::Smooth => self.scroll_animating = self.scroll > 0,
                ScrollBehavior::Instant => {
                    self.scroll = 0;
                    self.scroll_animating = false;
                }
            }
        }
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        if self.scroll_animating {
            // Halve the distance each frame.
            self.scroll -= self.scroll.div_ceil(2);
            self.scroll_animating = self.scroll > 0;
        }
    }

    /// Track the terminal size so scrolling can follow link focus.
    pub fn resize(&mut self, area: Rect) {
        let view = self.shell.view();
        let banner = view
            .banner_visible()
            .then(|| banner_height(view.consent_copy, area.width));
        let layout = AppLayout::calculate(area, banner);
        self.viewport = layout.body.height.saturating_sub(2).max(1) as usize;
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    fn line_count(&self) -> usize {
        page_lines(self.shell.page(), &self.theme, None).0.len()
    }

    fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_animating = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_animating = false;
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_animating = false;
        self.scroll = 0;
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// Page links, banner links while the banner shows, then footer links.
    fn focusable_links(&self) -> Vec<Link> {
        self.shell.links()
    }

    fn page_link_count(&self) -> usize {
        self.shell.page().links().len()
    }

    fn banner_link_count(&self) -> usize {
        let view = self.shell.view();
        if view.banner_visible() {
            view.consent_copy.banner_links.len()
        } else {
            0
        }
    }

    pub fn focused_link(&self) -> Option<usize> {
        self.focused_link
    }

    /// Focused link as an index into the page's links.
    pub fn focused_page_link(&self) -> Option<usize> {
        self.focused_link.filter(|i| *i < self.page_link_count())
    }

    /// Focused link as an index into the banner links.
    pub fn focused_banner_link(&self) -> Option<usize> {
        let banner_links = self.banner_link_count();
        self.focused_link
            .and_then(|i| i.checked_sub(self.page_link_count()))
            .filter(|i| *i < banner_links)
    }

    /// Focused link as an index into the footer links.
    pub fn focused_footer_link(&self) -> Option<usize> {
        let before = self.page_link_count() + self.banner_link_count();
        self.focused_link.and_then(|i| i.checked_sub(before))
    }

    /// Move link focus forward or backward, wrapping around.
    pub fn cycle_link(&mut self, forward: bool) {
        let total = self.focusable_links().len();
        if total == 0 {
            return;
        }
        let next = match (self.focused_link, forward) {
            (None, true) => 0,
            (None, false) => total - 1,
            (Some(i), true) => (i + 1) % total,
            (Some(i), false) => (i + total - 1) % total,
        };
        self.focused_link = Some(next);
        self.reveal_focused_link();
    }

    fn reveal_focused_link(&mut self) {
        let Some(index) = self.focused_page_link() else {
            return;
        };
        let (_, link_lines) = page_lines(self.shell.page(), &self.theme, None);
        let Some(&line) = link_lines.get(index) else {
            return;
        };
        self.scroll_animating = false;
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + self.viewport {
            self.scroll = line + 1 - self.viewport;
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused_link = None;
    }

    /// Follow the focused link, if any.
    pub fn follow_focused(&mut self) -> Option<LinkOutcome> {
        let link = self
            .focused_link
            .and_then(|i| self.focusable_links().get(i).copied())?;
        let before = self.shell.route();
        let outcome = self.shell.follow(&link);
        match outcome {
            LinkOutcome::Navigated(route) => {
                self.clear_status();
                if route != before {
                    self.focused_link = None;
                }
                self.drain_scroll_requests();
                self.scroll = self.scroll.min(self.max_scroll());
            }
            LinkOutcome::External(url) => self.set_status(format!("Externer Link: {url}")),
        }
        Some(outcome)
    }

    /// Navigate to one of the site's pages.
    pub fn navigate_to(&mut self, route: Route) {
        self.dispatch(Action::Navigate(route.path().to_string()));
    }

    // =========================================================================
    // Consent
    // =========================================================================

    pub fn open_settings(&mut self) {
        self.panel_cursor = 0;
        self.dispatch(Action::OpenSettings);
    }

    pub fn panel_up(&mut self) {
        self.panel_cursor = self.panel_cursor.saturating_sub(1);
    }

    pub fn panel_down(&mut self) {
        self.panel_cursor = (self.panel_cursor + 1).min(Category::ALL.len() - 1);
    }

    /// Flip the category under the panel cursor.
    pub fn toggle_selected(&mut self) {
        let category = Category::ALL[self.panel_cursor.min(Category::ALL.len() - 1)];
        let Some(panel) = self.shell.consent().settings().copied() else {
            return;
        };
        if !panel.is_interactive(category) {
            self.set_status("Notwendige Cookies sind immer aktiv");
            return;
        }
        let granted = !panel.is_checked(category);
        self.dispatch(Action::ToggleCategory(category, granted));
    }

    /// Which keys currently apply.
    pub fn hotkey_context(&self) -> HotkeyContext {
        let view = self.shell.view();
        if self.overlay.is_some() {
            HotkeyContext::Help
        } else if view.settings_visible() {
            HotkeyContext::Settings
        } else if view.banner_visible() {
            HotkeyContext::Banner
        } else {
            HotkeyContext::Browse
        }
    }

    // =========================================================================
    // Overlays and status
    // =========================================================================

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Some(Overlay::Help) => None,
            None => Some(Overlay::Help),
        };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use site_core::SiteConfig;

    pub(crate) fn test_app() -> App {
        let shell = SiteConfig::new()
            .ephemeral(true)
            .build_shell()
            .expect("valid config");
        App::new(shell)
    }

    #[test]
    fn test_smooth_scroll_animates_to_top() {
        let mut app = test_app();
        app.navigate_to(Route::PrivacyPolicy);
        app.scroll_down(12);
        let start = app.scroll();
        assert!(start > 0);

        app.navigate_to(Route::CookiePolicy);
        assert_eq!(app.scroll(), start.min(app.max_scroll()));
        for _ in 0..16 {
            app.tick();
        }
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn test_tab_cycles_into_footer() {
        let mut app = test_app();
        app.dispatch(Action::AcceptNecessary);
        let page_links = app.page_link_count();
        for _ in 0..=page_links {
            app.cycle_link(true);
        }
        assert_eq!(app.focused_page_link(), None);
        assert_eq!(app.focused_footer_link(), Some(0));
    }

    #[test]
    fn test_backtab_wraps_to_last_link() {
        let mut app = test_app();
        app.cycle_link(false);
        let total = app.focusable_links().len();
        assert_eq!(app.focused_link(), Some(total - 1));
    }

    #[test]
    fn test_follow_footer_link_navigates() {
        let mut app = test_app();
        app.dispatch(Action::AcceptNecessary);
        let page_links = app.page_link_count();
        for _ in 0..=page_links {
            app.cycle_link(true);
        }
        let outcome = app.follow_focused();
        assert_eq!(outcome, Some(LinkOutcome::Navigated(Route::LegalNotice)));
        assert_eq!(app.focused_link(), None);
    }

    #[test]
    fn test_banner_links_focusable_while_undecided() {
        let mut app = test_app();
        let page_links = app.page_link_count();
        for _ in 0..=page_links {
            app.cycle_link(true);
        }
        assert_eq!(app.focused_banner_link(), Some(0));
        assert_eq!(app.focused_footer_link(), None);

        let outcome = app.follow_focused();
        assert_eq!(outcome, Some(LinkOutcome::Navigated(Route::PrivacyPolicy)));
        assert!(app.shell.view().banner_visible());
        assert_eq!(app.shell.consent().decision(), None);
    }

    #[test]
    fn test_deciding_drops_banner_links_from_focus() {
        let mut app = test_app();
        app.cycle_link(false);
        assert!(app.focused_footer_link().is_some());

        app.dispatch(Action::AcceptAll);
        assert_eq!(app.focused_link(), None);

        let page_links = app.page_link_count();
        for _ in 0..=page_links {
            app.cycle_link(true);
        }
        assert_eq!(app.focused_footer_link(), Some(0));
    }

    #[test]
    fn test_external_link_reports_url() {
        let mut app = test_app();
        app.cycle_link(true);
        let outcome = app.follow_focused();
        assert!(matches!(outcome, Some(LinkOutcome::External(_))));
        assert!(app.status_message().is_some_and(|m| m.starts_with("Externer Link")));
        assert_eq!(app.shell.route(), Route::Home);
    }

    #[test]
    fn test_necessary_row_cannot_toggle() {
        let mut app = test_app();
        app.open_settings();
        app.toggle_selected();
        assert_eq!(
            app.status_message(),
            Some("Notwendige Cookies sind immer aktiv")
        );

        app.panel_down();
        app.toggle_selected();
        let panel = app.shell.consent().settings().copied().expect("panel open");
        assert!(panel.is_checked(Category::Analytics));
    }

    #[test]
    fn test_back_without_history_sets_status() {
        let mut app = test_app();
        assert_eq!(app.dispatch(Action::HistoryBack), Transition::Ignored);
        assert!(app.status_message().is_some());
    }

    #[test]
    fn test_hotkey_context_follows_consent_state() {
        let mut app = test_app();
        assert_eq!(app.hotkey_context(), HotkeyContext::Banner);
        app.open_settings();
        assert_eq!(app.hotkey_context(), HotkeyContext::Settings);
        app.dispatch(Action::AcceptNecessary);
        assert_eq!(app.hotkey_context(), HotkeyContext::Browse);
        app.toggle_help();
        assert_eq!(app.hotkey_context(), HotkeyContext::Help);
    }
}
