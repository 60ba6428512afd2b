//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use site_core::consent::{Category, ConsentDecision};
use site_core::Route;

use crate::ui::theme::SiteTheme;

/// Which keys the hotkey bar advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyContext {
    Browse,
    Banner,
    Settings,
    Help,
}

/// Status bar widget showing route and consent
pub struct StatusBarWidget<'a> {
    route: Route,
    decision: Option<ConsentDecision>,
    theme: &'a SiteTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(route: Route, decision: Option<ConsentDecision>, theme: &'a SiteTheme) -> Self {
        Self {
            route,
            decision,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!("-- {} --", self.route.slug().to_uppercase()),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
        ];

        match self.decision {
            None => spans.push(Span::styled("Cookies: offen", self.theme.system_style())),
            Some(decision) => {
                for category in Category::OPTIONAL {
                    let granted = decision.get(category);
                    spans.push(Span::styled(
                        format!("{}:{} ", category.as_str(), if granted { "an" } else { "aus" }),
                        Style::default().fg(if granted {
                            self.theme.granted
                        } else {
                            self.theme.denied
                        }),
                    ));
                }
            }
        }

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                msg,
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget {
    context: HotkeyContext,
}

impl HotkeyBarWidget {
    pub fn new(context: HotkeyContext) -> Self {
        Self { context }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.context {
            HotkeyContext::Browse => vec![
                ("Tab:Link", true),
                ("Enter:öffnen", true),
                ("1-4:Seiten", true),
                ("b/f:zurück/vor", true),
                ("j/k:scrollen", true),
                ("c:Cookies", false),
                ("?:Hilfe", false),
                ("q:Ende", false),
            ],
            HotkeyContext::Banner => vec![
                ("a:Alle akzeptieren", true),
                ("n:Nur Notwendige", true),
                ("c:Einstellungen", true),
                ("Tab:Link", false),
                ("?:Hilfe", false),
            ],
            HotkeyContext::Settings => vec![
                ("↑↓:wählen", true),
                ("Space:umschalten", true),
                ("s:speichern", true),
                ("a/n:akzeptieren", false),
                ("Esc:schließen", false),
            ],
            HotkeyContext::Help => vec![("Esc:schließen", true)],
        };

        let spans: Vec<Span> = hotkeys
            .iter()
            .flat_map(|(text, primary)| {
                let style = if *primary {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                vec![Span::styled(*text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
