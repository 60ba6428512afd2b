//! Consent banner and settings panel widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use site_core::consent::{Category, SettingsPanel};
use site_core::content::{CategoryCopy, ConsentCopy};

use crate::ui::theme::SiteTheme;

/// Height the banner needs at a given width.
pub fn banner_height(copy: &ConsentCopy, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let text_rows = copy.banner_text.chars().count().div_ceil(inner);
    // Borders, title, text, links, buttons.
    (text_rows + 5).min(12) as u16
}

/// Bottom-pinned consent banner
pub struct BannerWidget<'a> {
    copy: &'a ConsentCopy,
    theme: &'a SiteTheme,
    focused_link: Option<usize>,
}

impl<'a> BannerWidget<'a> {
    pub fn new(copy: &'a ConsentCopy, theme: &'a SiteTheme) -> Self {
        Self {
            copy,
            theme,
            focused_link: None,
        }
    }

    /// Index into [`ConsentCopy::banner_links`] that has focus.
    pub fn focused_link(mut self, index: Option<usize>) -> Self {
        self.focused_link = index;
        self
    }
}

impl Widget for BannerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.copy.title),
                Style::default()
                    .fg(self.theme.banner_border)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.banner_border));

        let mut links = vec![Span::styled("Mehr: ", self.theme.system_style())];
        for (i, link) in self.copy.banner_links.iter().enumerate() {
            if i > 0 {
                links.push(Span::raw("  "));
            }
            links.push(Span::styled(
                link.label,
                self.theme.link_style(self.focused_link == Some(i)),
            ));
        }

        let lines = vec![
            Line::from(Span::styled(self.copy.banner_text, self.theme.text_style())),
            Line::from(links),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!(" [c] {} ", self.copy.open_settings), self.theme.button_style(false)),
                Span::raw("  "),
                Span::styled(format!(" [n] {} ", self.copy.accept_necessary), self.theme.button_style(false)),
                Span::raw("  "),
                Span::styled(format!(" [a] {} ", self.copy.accept_all), self.theme.button_style(true)),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Centered settings panel with one row per category
pub struct SettingsPanelWidget<'a> {
    panel: SettingsPanel,
    copy: &'a ConsentCopy,
    categories: &'a [(Category, &'a CategoryCopy)],
    selected: usize,
    theme: &'a SiteTheme,
}

impl<'a> SettingsPanelWidget<'a> {
    pub fn new(
        panel: SettingsPanel,
        copy: &'a ConsentCopy,
        categories: &'a [(Category, &'a CategoryCopy)],
        theme: &'a SiteTheme,
    ) -> Self {
        Self {
            panel,
            copy,
            categories,
            selected: 0,
            theme,
        }
    }

    /// Row under the cursor.
    pub fn selected(mut self, row: usize) -> Self {
        self.selected = row;
        self
    }
}

impl Widget for SettingsPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.copy.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let mut lines = vec![
            Line::from(Span::styled(self.copy.panel_intro, self.theme.text_style())),
            Line::from(""),
        ];

        for (row, (category, copy)) in self.categories.iter().enumerate() {
            let checked = self.panel.is_checked(*category);
            let interactive = self.panel.is_interactive(*category);
            let mark = if checked { "[x]" } else { "[ ]" };

            let mut spans = vec![Span::styled(
                format!("{mark} {}", copy.label),
                self.theme
                    .toggle_style(checked, interactive, row == self.selected),
            )];
            if !interactive {
                spans.push(Span::styled("  (immer aktiv)", self.theme.system_style()));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(Span::styled(
                format!("    {}", copy.description),
                self.theme.system_style(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!(" [n] {} ", self.copy.accept_necessary), self.theme.button_style(false)),
            Span::raw(" "),
            Span::styled(format!(" [s] {} ", self.copy.save_selection), self.theme.button_style(false)),
            Span::raw(" "),
            Span::styled(format!(" [a] {} ", self.copy.accept_all), self.theme.button_style(true)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("↑/↓ wählen · Leertaste umschalten · Esc {}", self.copy.close),
            self.theme.system_style(),
        )));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
