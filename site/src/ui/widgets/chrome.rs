//! Header and footer shared by every page

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use site_core::content::Chrome;

use crate::ui::theme::SiteTheme;

/// One-line header: brand, current location and the booking call to action
pub struct HeaderWidget<'a> {
    chrome: &'a Chrome,
    pathname: &'a str,
    theme: &'a SiteTheme,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(chrome: &'a Chrome, pathname: &'a str, theme: &'a SiteTheme) -> Self {
        Self {
            chrome,
            pathname,
            theme,
        }
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.chrome.brand), self.theme.brand_style()),
            Span::styled(self.pathname, self.theme.system_style()),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", self.chrome.header_cta.label),
                self.theme.button_style(true),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

/// Footer with company details and legal links
pub struct FooterWidget<'a> {
    chrome: &'a Chrome,
    theme: &'a SiteTheme,
    focused_link: Option<usize>,
}

impl<'a> FooterWidget<'a> {
    pub fn new(chrome: &'a Chrome, theme: &'a SiteTheme) -> Self {
        Self {
            chrome,
            theme,
            focused_link: None,
        }
    }

    /// Index into [`Chrome::footer_links`] that has focus.
    pub fn focused_link(mut self, index: Option<usize>) -> Self {
        self.focused_link = index;
        self
    }
}

impl Widget for FooterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        let about = Line::from(vec![
            Span::styled(self.chrome.company, self.theme.brand_style()),
            Span::raw(" · "),
            Span::styled(self.chrome.tagline, self.theme.system_style()),
            Span::raw(" · "),
            Span::styled(self.chrome.address.join(", "), self.theme.system_style()),
        ]);

        let mut links = Vec::new();
        for (i, link) in self.chrome.footer_links.iter().enumerate() {
            links.push(Span::styled(
                link.label,
                self.theme.link_style(self.focused_link == Some(i)),
            ));
            links.push(Span::raw("  "));
        }
        links.push(Span::styled(
            format!("[c] {}", self.chrome.settings_label),
            self.theme.link_style(false),
        ));

        Paragraph::new(vec![about, Line::from(links)]).render(inner, buf);
    }
}
