//! Event handling for the site TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use site_core::{Action, Route};

use crate::app::App;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    if app.shell.view().settings_visible() {
        return handle_settings_key(app, key);
    }

    handle_browse_key(app, key)
}

/// Keys while the help overlay is shown
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys while the consent settings panel is open
fn handle_settings_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.panel_up(),
        KeyCode::Down | KeyCode::Char('j') => app.panel_down(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('s') => {
            app.dispatch(Action::SaveSelection);
        }
        KeyCode::Char('a') => {
            app.dispatch(Action::AcceptAll);
        }
        KeyCode::Char('n') => {
            app.dispatch(Action::AcceptNecessary);
        }
        KeyCode::Esc | KeyCode::Char('c') => {
            app.dispatch(Action::CloseSettings);
        }
        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),
        KeyCode::Char('q') => return EventResult::Quit,
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Keys while reading pages
fn handle_browse_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),

        // Scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),

        // Pages
        KeyCode::Char('h') => app.navigate_to(Route::Home),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.navigate_to(Route::ALL[index]);
        }

        // Links
        KeyCode::Tab => app.cycle_link(true),
        KeyCode::BackTab => app.cycle_link(false),
        KeyCode::Enter => {
            app.follow_focused();
        }
        KeyCode::Esc => {
            app.clear_focus();
            app.clear_status();
        }

        // History
        KeyCode::Char('b') | KeyCode::Left => {
            app.dispatch(Action::HistoryBack);
        }
        KeyCode::Char('f') | KeyCode::Right => {
            app.dispatch(Action::HistoryForward);
        }

        // Consent
        KeyCode::Char('c') => app.open_settings(),
        KeyCode::Char('a') if app.shell.view().banner_visible() => {
            app.dispatch(Action::AcceptAll);
        }
        KeyCode::Char('n') if app.shell.view().banner_visible() => {
            app.dispatch(Action::AcceptNecessary);
        }

        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::KeyEventKind;
    use site_core::Category;

    fn press(app: &mut App, code: KeyCode) -> EventResult {
        handle_event(
            app,
            Event::Key(KeyEvent::new_with_kind(
                code,
                KeyModifiers::NONE,
                KeyEventKind::Press,
            )),
        )
    }

    #[test]
    fn test_banner_keys_decide() {
        let mut app = test_app();
        assert!(app.shell.view().banner_visible());
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.shell.view().banner_visible());
        assert_eq!(
            app.shell.consent().decision().map(|d| d.get(Category::Marketing)),
            Some(true)
        );
    }

    #[test]
    fn test_accept_keys_inert_after_decision() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        let decided = app.shell.consent().decision();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.shell.consent().decision(), decided);
    }

    #[test]
    fn test_settings_panel_flow() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.shell.view().settings_visible());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));

        let view = app.shell.view();
        assert!(!view.settings_visible());
        let decision = view.decision.expect("saved");
        assert!(decision.get(Category::Marketing));
        assert!(!decision.get(Category::Analytics));
    }

    #[test]
    fn test_escape_closes_settings_without_saving() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.shell.view().settings_visible());
        assert!(app.shell.view().banner_visible());
    }

    #[test]
    fn test_number_keys_route_and_back() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.shell.route(), Route::PrivacyPolicy);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.shell.route(), Route::Home);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.shell.route(), Route::PrivacyPolicy);
    }

    #[test]
    fn test_banner_link_followed_from_keyboard() {
        let mut app = test_app();
        let page_links = app.shell.page().links().len();
        for _ in 0..=page_links {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_banner_link(), Some(0));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.shell.route(), Route::PrivacyPolicy);
        assert!(app.shell.view().banner_visible());
        assert_eq!(app.shell.consent().decision(), None);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.has_overlay());
        assert_eq!(press(&mut app, KeyCode::Char('a')), EventResult::Continue);
        assert!(app.shell.view().banner_visible());
        press(&mut app, KeyCode::Esc);
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('c'));
        let result = handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert_eq!(result, EventResult::Quit);
    }
}
