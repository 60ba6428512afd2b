//! TUI widgets for the site

pub mod chrome;
pub mod consent;
pub mod page;
pub mod status_bar;

pub use chrome::{FooterWidget, HeaderWidget};
pub use consent::{BannerWidget, SettingsPanelWidget};
pub use page::PageWidget;
pub use status_bar::{HotkeyBarWidget, HotkeyContext, StatusBarWidget};
