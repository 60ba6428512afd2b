//! Color theme and styling for the site TUI

use ratatui::style::{Color, Modifier, Style};

/// Site UI color theme
#[derive(Debug, Clone)]
pub struct SiteTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Brand
    pub brand: Color,
    pub accent: Color,

    // Text colors
    pub heading: Color,
    pub subheading: Color,
    pub body_text: Color,
    pub link: Color,
    pub link_focused: Color,
    pub system_text: Color,

    // Consent colors
    pub granted: Color,
    pub denied: Color,
    pub banner_border: Color,
}

impl Default for SiteTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            brand: Color::LightBlue,
            accent: Color::Yellow,

            heading: Color::LightBlue,
            subheading: Color::Cyan,
            body_text: Color::White,
            link: Color::LightCyan,
            link_focused: Color::Black,
            system_text: Color::DarkGray,

            granted: Color::Green,
            denied: Color::DarkGray,
            banner_border: Color::Yellow,
        }
    }
}

impl SiteTheme {
    /// Get style for body text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.body_text)
    }

    /// Get style for section headings
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for sub-headings
    pub fn subheading_style(&self) -> Style {
        Style::default()
            .fg(self.subheading)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for the page title
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a link, highlighted when it has focus
    pub fn link_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.link_focused)
                .bg(self.link)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.link)
                .add_modifier(Modifier::UNDERLINED)
        }
    }

    /// Get style for system messages and hints
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get style for the brand name
    pub fn brand_style(&self) -> Style {
        Style::default()
            .fg(self.brand)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get style for a consent checkbox row
    pub fn toggle_style(&self, checked: bool, interactive: bool, selected: bool) -> Style {
        let mut style = Style::default().fg(if checked { self.granted } else { self.denied });
        if !interactive {
            style = style.add_modifier(Modifier::DIM);
        }
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    /// Get style for a button label
    pub fn button_style(&self, primary: bool) -> Style {
        if primary {
            Style::default()
                .fg(Color::Black)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.foreground)
                .add_modifier(Modifier::BOLD)
        }
    }
}
