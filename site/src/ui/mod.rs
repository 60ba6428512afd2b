//! Terminal User Interface for the site
//!
//! Built with ratatui, providing:
//! - Scrollable page bodies with focusable links
//! - The consent banner and settings panel
//! - Header, footer and status chrome

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::Overlay;
