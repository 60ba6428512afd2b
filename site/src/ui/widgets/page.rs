//! Page body widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use site_core::content::{Block as ContentBlock, Page};

use crate::ui::theme::SiteTheme;

/// Lines for `page`, plus the line index of each link in
/// [`Page::links`] order.
pub fn page_lines<'a>(
    page: &'a Page,
    theme: &SiteTheme,
    focused_link: Option<usize>,
) -> (Vec<Line<'a>>, Vec<usize>) {
    let mut lines: Vec<Line> = Vec::new();
    let mut link_lines = Vec::new();
    let mut link_index = 0;

    let mut push_link = |lines: &mut Vec<Line<'a>>, label: &'a str| {
        let focused = focused_link == Some(link_index);
        link_lines.push(lines.len());
        lines.push(Line::from(vec![
            Span::styled("→ ", theme.link_style(false)),
            Span::styled(label, theme.link_style(focused)),
        ]));
        link_index += 1;
    };

    lines.push(Line::from(Span::styled(page.title, theme.title_style())));
    lines.push(Line::from(""));

    if let Some(cta) = &page.call_to_action {
        push_link(&mut lines, cta.label);
        lines.push(Line::from(""));
    }

    for block in &page.blocks {
        match block {
            ContentBlock::Heading(text) => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(*text, theme.heading_style())));
            }
            ContentBlock::Subheading(text) => {
                lines.push(Line::from(Span::styled(*text, theme.subheading_style())));
            }
            ContentBlock::Paragraph(text) => {
                lines.push(Line::from(Span::styled(*text, theme.text_style())));
            }
            ContentBlock::List(items) => {
                for item in items {
                    lines.push(Line::from(vec![
                        Span::styled("  • ", theme.system_style()),
                        Span::styled(*item, theme.text_style()),
                    ]));
                }
            }
            ContentBlock::Link(link) => push_link(&mut lines, link.label),
        }
    }

    (lines, link_lines)
}

/// Widget for displaying the current page
pub struct PageWidget<'a> {
    page: &'a Page,
    scroll: usize,
    theme: &'a SiteTheme,
    focused_link: Option<usize>,
    dimmed: bool,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page, theme: &'a SiteTheme) -> Self {
        Self {
            page,
            scroll: 0,
            theme,
            focused_link: None,
            dimmed: false,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused_link(mut self, index: Option<usize>) -> Self {
        self.focused_link = index;
        self
    }

    /// Render behind a modal.
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(!self.dimmed));

        let inner = block.inner(area);
        block.render(area, buf);

        let (lines, _) = page_lines(self.page, self.theme, self.focused_link);

        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let mut paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });
        if self.dimmed {
            paragraph = paragraph.style(Style::default().add_modifier(Modifier::DIM));
        }

        // Leave a column for the scrollbar.
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        paragraph.render(text_area, buf);

        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            if scroll < max_scroll {
                let remaining = max_scroll - scroll;
                let hint = format!(" ↓{remaining} mehr ");
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = self.theme.system_style();
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}
