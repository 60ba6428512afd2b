//! Engine for the ARC Assessment site.
//!
//! This crate provides:
//! - A cookie-consent state machine backed by a key-value medium
//! - A client-side router over an abstract session history
//! - Static German page content for the four pages
//! - A shell that composes the three behind a single action reducer
//!
//! Front ends (the terminal UI, the headless driver, tests) own a shell,
//! feed it actions and render its view.
//!
//! # Quick Start
//!
//! ```ignore
//! use site_core::{Action, SiteConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut shell = SiteConfig::from_env().build_shell()?;
//!
//!     if shell.view().banner_visible() {
//!         shell.dispatch(Action::AcceptNecessary);
//!     }
//!     shell.dispatch(Action::Navigate("/Impressum".to_string()));
//!     println!("{}", shell.page().title);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod consent;
pub mod content;
pub mod headless;
pub mod history;
pub mod persist;
pub mod router;
pub mod shell;
pub mod testing;

// Primary public API
pub use config::{ConfigError, SiteConfig};
pub use consent::{
    Category, ConsentDecision, ConsentMachine, ConsentRecord, ConsentState, ConsentStore,
    Transition, Visibility,
};
pub use content::{ContentProvider, Link, LinkTarget, Page, StaticContent};
pub use headless::{HeadlessCommand, HeadlessConfig, HeadlessReply, HeadlessSite};
pub use history::{History, MemoryHistory, ScrollBehavior};
pub use persist::{FileStorage, KeyValueStore, MemoryStorage, PersistError};
pub use router::{resolve, Route, Router};
pub use shell::{Action, LinkOutcome, Shell, ShellView, SiteShell};
pub use testing::TestHarness;
