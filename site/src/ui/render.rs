//! Main render function for the site TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::layout::{centered_rect_fixed, AppLayout};
use super::widgets::consent::banner_height;
use super::widgets::*;
use crate::app::App;

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Render the main application
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let view = app.shell.view();
    let theme = &app.theme;

    let banner = view
        .banner_visible()
        .then(|| banner_height(view.consent_copy, area.width));
    let layout = AppLayout::calculate(area, banner);
    let modal = view.settings_visible() || app.overlay().is_some();

    frame.render_widget(
        HeaderWidget::new(view.chrome, view.pathname, theme),
        layout.header,
    );

    let page = PageWidget::new(view.page, theme)
        .scroll(app.scroll())
        .focused_link(app.focused_page_link())
        .dimmed(modal);
    frame.render_widget(page, layout.body);

    if let Some(banner_area) = layout.banner {
        let banner = BannerWidget::new(view.consent_copy, theme)
            .focused_link(app.focused_banner_link());
        frame.render_widget(banner, banner_area);
    }

    frame.render_widget(
        FooterWidget::new(view.chrome, theme).focused_link(app.focused_footer_link()),
        layout.footer,
    );

    let status = StatusBarWidget::new(view.route, view.decision, theme)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);
    frame.render_widget(HotkeyBarWidget::new(app.hotkey_context()), layout.hotkey_bar);

    if let Some(panel) = view.settings {
        let popup_area = centered_rect_fixed(72, 20, area);
        let widget = SettingsPanelWidget::new(panel, view.consent_copy, &view.categories, theme)
            .selected(app.panel_cursor);
        frame.render_widget(widget, popup_area);
    }

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(58, 24, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Hilfe - Esc zum Schließen ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Navigation", bold)),
        Line::from("  1-4         - Startseite, Impressum, Datenschutz, Cookies"),
        Line::from("  h           - Startseite"),
        Line::from("  Tab / S-Tab - Nächster / vorheriger Link"),
        Line::from("  Enter       - Link öffnen"),
        Line::from("  b / ←       - Zurück"),
        Line::from("  f / →       - Vor"),
        Line::from("  j/k, ↑/↓    - Scrollen"),
        Line::from("  g           - Nach oben"),
        Line::from(""),
        Line::from(Span::styled("Cookies", bold)),
        Line::from("  a           - Alle akzeptieren (Banner)"),
        Line::from("  n           - Nur Notwendige (Banner)"),
        Line::from("  c           - Cookie-Einstellungen"),
        Line::from("  Leertaste   - Kategorie umschalten (Einstellungen)"),
        Line::from("  s           - Auswahl speichern (Einstellungen)"),
        Line::from(""),
        Line::from(Span::styled("Allgemein", bold)),
        Line::from("  ?           - Diese Hilfe"),
        Line::from("  q / Ctrl+C  - Beenden"),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}
