//! Headless site interface for programmatic use.
//!
//! This module drives the shell without a terminal UI. It's designed for:
//! - Scripted walkthroughs of the consent flow
//! - Automated checks of routing and persistence
//! - Tools that pipe commands in and read tagged lines out
//!
//! # Example
//!
//! ```ignore
//! use site_core::headless::{HeadlessCommand, HeadlessConfig, HeadlessSite};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut site = HeadlessSite::new(HeadlessConfig::in_memory().with_start_path("/Cookies"))?;
//!
//!     site.execute(HeadlessCommand::parse("settings")?);
//!     site.execute(HeadlessCommand::parse("toggle analytics on")?);
//!     let reply = site.execute(HeadlessCommand::parse("save")?);
//!     for line in &reply.lines {
//!         println!("{line}");
//!     }
//!
//!     assert!(!site.banner_visible());
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ConfigError, SiteConfig};
use crate::consent::{Category, ConsentDecision, Transition};
use crate::content::LinkTarget;
use crate::history::History;
use crate::router::Route;
use crate::shell::{Action, LinkOutcome, SiteShell};

/// Configuration for a headless session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessConfig {
    site: SiteConfig,
}

impl HeadlessConfig {
    /// Keep consent in memory; every session starts undecided.
    pub fn in_memory() -> Self {
        Self {
            site: SiteConfig::new().ephemeral(true),
        }
    }

    /// Persist consent under `base_dir` for `origin`.
    pub fn with_storage(base_dir: impl Into<PathBuf>, origin: impl Into<String>) -> Self {
        Self {
            site: SiteConfig::new()
                .with_storage_dir(base_dir)
                .with_origin(origin),
        }
    }

    /// Set the initial location.
    pub fn with_start_path(mut self, path: impl Into<String>) -> Self {
        self.site = self.site.with_start_path(path);
        self
    }

    /// The underlying site configuration.
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }
}

impl From<SiteConfig> for HeadlessConfig {
    fn from(site: SiteConfig) -> Self {
        Self { site }
    }
}

// ============================================================================
// Protocol
// ============================================================================

/// Errors from parsing a protocol line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'. Type help for help.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown category '{0}' (analytics, marketing, functional)")]
    UnknownCategory(String),

    #[error("Expected on or off, got '{0}'")]
    BadSwitch(String),

    #[error("Expected a link number, got '{0}'")]
    BadIndex(String),
}

/// One line of the headless protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    AcceptAll,
    AcceptNecessary,
    /// Open the settings panel.
    Settings,
    /// Close the settings panel.
    Close,
    /// Set a category in the open panel; `None` flips it.
    Toggle(Category, Option<bool>),
    Save,
    Go(String),
    Back,
    Forward,
    Status,
    Page,
    /// List the links on the current page.
    Links,
    /// Follow a link by its 1-based number from `links`.
    Follow(usize),
    Help,
    Quit,
}

impl HeadlessCommand {
    /// Parse one protocol line. A leading `#` is accepted and ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let line = line.strip_prefix('#').unwrap_or(line);
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb.to_lowercase().as_str() {
            "accept-all" | "all" => Self::AcceptAll,
            "accept-necessary" | "necessary" => Self::AcceptNecessary,
            "settings" | "open" => Self::Settings,
            "close" => Self::Close,
            "toggle" => {
                let name = parts
                    .next()
                    .ok_or(CommandError::Usage("toggle <category> [on|off]"))?;
                let category = Category::parse(name)
                    .ok_or_else(|| CommandError::UnknownCategory(name.to_string()))?;
                let value = match parts.next() {
                    None => None,
                    Some(s) => Some(parse_switch(s)?),
                };
                Self::Toggle(category, value)
            }
            "save" => Self::Save,
            "go" | "navigate" => {
                let path = parts.next().ok_or(CommandError::Usage("go <path>"))?;
                Self::Go(path.to_string())
            }
            "back" => Self::Back,
            "forward" => Self::Forward,
            "status" => Self::Status,
            "page" => Self::Page,
            "links" => Self::Links,
            "follow" => {
                let raw = parts.next().ok_or(CommandError::Usage("follow <number>"))?;
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => Self::Follow(n),
                    _ => return Err(CommandError::BadIndex(raw.to_string())),
                }
            }
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn parse_switch(s: &str) -> Result<bool, CommandError> {
    match s.to_lowercase().as_str() {
        "on" | "true" | "yes" | "an" => Ok(true),
        "off" | "false" | "no" | "aus" => Ok(false),
        _ => Err(CommandError::BadSwitch(s.to_string())),
    }
}

/// Output of one executed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessReply {
    /// Tagged output lines, e.g. `[ROUTE] home /`.
    pub lines: Vec<String>,
    /// Outcome of the shell action, if the command dispatched one.
    pub transition: Option<Transition>,
    /// The session should end.
    pub quit: bool,
}

impl HeadlessReply {
    fn push(&mut self, tag: &str, text: impl AsRef<str>) {
        self.lines.push(format!("[{tag}] {}", text.as_ref()));
    }

    /// Whether any line carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        let prefix = format!("[{tag}]");
        self.lines.iter().any(|l| l.starts_with(&prefix))
    }
}

// ============================================================================
// Session
// ============================================================================

/// A site session that can be controlled programmatically.
pub struct HeadlessSite {
    shell: SiteShell,
}

impl HeadlessSite {
    /// Open a session. The consent startup check runs here.
    pub fn new(config: HeadlessConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            shell: config.site.build_shell()?,
        })
    }

    /// Parse and execute one protocol line. Parse errors come back as an
    /// `[ERROR]` line.
    pub fn execute_line(&mut self, line: &str) -> HeadlessReply {
        match HeadlessCommand::parse(line) {
            Ok(command) => self.execute(command),
            Err(e) => {
                let mut reply = HeadlessReply::default();
                reply.push("ERROR", e.to_string());
                reply
            }
        }
    }

    /// Execute one command.
    pub fn execute(&mut self, command: HeadlessCommand) -> HeadlessReply {
        let mut reply = HeadlessReply::default();

        let action = match command {
            HeadlessCommand::AcceptAll => Action::AcceptAll,
            HeadlessCommand::AcceptNecessary => Action::AcceptNecessary,
            HeadlessCommand::Settings => Action::OpenSettings,
            HeadlessCommand::Close => Action::CloseSettings,
            HeadlessCommand::Save => Action::SaveSelection,
            HeadlessCommand::Toggle(category, value) => {
                let current = self
                    .shell
                    .consent()
                    .settings()
                    .is_some_and(|p| p.is_checked(category));
                Action::ToggleCategory(category, value.unwrap_or(!current))
            }
            HeadlessCommand::Go(path) => Action::Navigate(path),
            HeadlessCommand::Back => Action::HistoryBack,
            HeadlessCommand::Forward => Action::HistoryForward,
            HeadlessCommand::Status => {
                self.status_lines(&mut reply);
                return reply;
            }
            HeadlessCommand::Page => {
                let page = self.shell.page();
                for line in page.text_lines() {
                    reply.push("PAGE", line);
                }
                return reply;
            }
            HeadlessCommand::Links => {
                for (i, link) in self.shell.links().iter().enumerate() {
                    let target = match link.target {
                        LinkTarget::Internal(path) => path,
                        LinkTarget::External(url) => url,
                    };
                    reply.push("LINK", format!("{} {} -> {target}", i + 1, link.label));
                }
                return reply;
            }
            HeadlessCommand::Follow(n) => {
                self.follow(n, &mut reply);
                return reply;
            }
            HeadlessCommand::Help => {
                for line in HELP {
                    reply.push("HELP", line);
                }
                return reply;
            }
            HeadlessCommand::Quit => {
                reply.quit = true;
                return reply;
            }
        };

        let consent_action = action.is_consent();
        let transition = self.shell.dispatch(action);
        self.discard_scroll_requests();
        reply.transition = Some(transition);
        match transition {
            Transition::Applied if consent_action => self.consent_lines(&mut reply),
            Transition::Applied => self.route_line(&mut reply),
            Transition::Ignored => reply.push("IGNORED", "not applicable right now"),
            Transition::NotPersisted => {
                reply.push("ERROR", "decision could not be stored");
                self.consent_lines(&mut reply);
            }
        }
        reply
    }

    fn follow(&mut self, n: usize, reply: &mut HeadlessReply) {
        let links = self.shell.links();
        let Some(link) = n.checked_sub(1).and_then(|i| links.get(i)) else {
            reply.push("ERROR", format!("No link {n}; links are numbered 1 to {}", links.len()));
            return;
        };
        match self.shell.follow(link) {
            LinkOutcome::Navigated(_) => {
                self.discard_scroll_requests();
                self.route_line(reply);
            }
            LinkOutcome::External(url) => reply.push("EXTERNAL", url),
        }
    }

    /// There is no viewport to scroll; drop the requests navigation queues.
    fn discard_scroll_requests(&mut self) {
        while self.shell.history_mut().take_scroll_request().is_some() {}
    }

    fn route_line(&self, reply: &mut HeadlessReply) {
        reply.push(
            "ROUTE",
            format!("{} {}", self.route(), self.shell.history().pathname()),
        );
    }

    fn consent_lines(&self, reply: &mut HeadlessReply) {
        let consent = match self.decision() {
            Some(decision) => describe(decision),
            None => "undecided".to_string(),
        };
        reply.push("CONSENT", consent);
        reply.push(
            "BANNER",
            if self.banner_visible() { "visible" } else { "hidden" },
        );
        match self.shell.consent().settings() {
            Some(panel) => reply.push("SETTINGS", format!("open {}", describe(panel.draft()))),
            None => reply.push("SETTINGS", "closed"),
        }
    }

    fn status_lines(&self, reply: &mut HeadlessReply) {
        self.route_line(reply);
        self.consent_lines(reply);
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    /// The current page.
    pub fn route(&self) -> Route {
        self.shell.route()
    }

    pub fn banner_visible(&self) -> bool {
        self.shell.consent().visibility().banner_visible
    }

    pub fn settings_visible(&self) -> bool {
        self.shell.consent().visibility().settings_visible
    }

    /// The active decision, if any.
    pub fn decision(&self) -> Option<ConsentDecision> {
        self.shell.consent().decision()
    }

    /// Title of the current page.
    pub fn page_title(&self) -> &'static str {
        self.shell.page().title
    }

    /// Get the underlying shell for advanced use.
    pub fn shell(&self) -> &SiteShell {
        &self.shell
    }

    /// Get mutable access to the underlying shell.
    pub fn shell_mut(&mut self) -> &mut SiteShell {
        &mut self.shell
    }
}

/// Protocol help, one line per command.
pub const HELP: [&str; 15] = [
    "accept-all              grant every category",
    "accept-necessary        grant only necessary cookies",
    "settings                open the settings panel",
    "close                   close the panel, discarding edits",
    "toggle <cat> [on|off]   set or flip a category in the panel",
    "save                    store the panel's selection",
    "go <path>               navigate to a path",
    "back                    history back",
    "forward                 history forward",
    "status                  route, consent, banner and panel",
    "page                    print the current page",
    "links                   list page, banner and footer links",
    "follow <n>              follow link n from `links`",
    "help                    show this help",
    "quit                    end the session",
];

fn describe(decision: ConsentDecision) -> String {
    Category::OPTIONAL
        .iter()
        .map(|c| format!("{c}={}", if decision.get(*c) { "on" } else { "off" }))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> HeadlessSite {
        HeadlessSite::new(HeadlessConfig::in_memory()).expect("in-memory site")
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(HeadlessCommand::parse("accept-all"), Ok(HeadlessCommand::AcceptAll));
        assert_eq!(HeadlessCommand::parse("#quit"), Ok(HeadlessCommand::Quit));
        assert_eq!(
            HeadlessCommand::parse("  go /Impressum "),
            Ok(HeadlessCommand::Go("/Impressum".to_string()))
        );
        assert_eq!(
            HeadlessCommand::parse("toggle Marketing on"),
            Ok(HeadlessCommand::Toggle(Category::Marketing, Some(true)))
        );
        assert_eq!(
            HeadlessCommand::parse("toggle statistik"),
            Ok(HeadlessCommand::Toggle(Category::Analytics, None))
        );
        assert_eq!(HeadlessCommand::parse("follow 2"), Ok(HeadlessCommand::Follow(2)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(HeadlessCommand::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            HeadlessCommand::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert!(matches!(HeadlessCommand::parse("go"), Err(CommandError::Usage(_))));
        assert_eq!(
            HeadlessCommand::parse("toggle ads"),
            Err(CommandError::UnknownCategory("ads".to_string()))
        );
        assert_eq!(
            HeadlessCommand::parse("toggle analytics maybe"),
            Err(CommandError::BadSwitch("maybe".to_string()))
        );
        assert_eq!(
            HeadlessCommand::parse("follow 0"),
            Err(CommandError::BadIndex("0".to_string()))
        );
    }

    #[test]
    fn test_in_memory_config() {
        let config = HeadlessConfig::in_memory().with_start_path("/Impressum");
        assert!(config.site().ephemeral);
        assert_eq!(config.site().start_path, "/Impressum");
    }

    #[test]
    fn test_status_on_fresh_site() {
        let mut site = site();
        let reply = site.execute(HeadlessCommand::Status);
        assert_eq!(
            reply.lines,
            [
                "[ROUTE] home /",
                "[CONSENT] undecided",
                "[BANNER] visible",
                "[SETTINGS] closed",
            ]
        );
    }

    #[test]
    fn test_toggle_flips_without_value() {
        let mut site = site();
        site.execute(HeadlessCommand::Settings);
        site.execute_line("toggle functional");
        let reply = site.execute_line("save");

        assert_eq!(reply.transition, Some(Transition::Applied));
        assert_eq!(site.decision(), Some(ConsentDecision::new(false, false, true)));
        assert!(reply.lines.contains(&"[BANNER] hidden".to_string()));
    }

    #[test]
    fn test_ignored_actions_are_reported() {
        let mut site = site();
        let reply = site.execute_line("save");
        assert_eq!(reply.transition, Some(Transition::Ignored));
        assert!(reply.has_tag("IGNORED"));
    }

    #[test]
    fn test_navigation_reports_route() {
        let mut site = site();
        let reply = site.execute_line("go /datenschutz");
        assert_eq!(reply.lines, ["[ROUTE] privacy-policy /datenschutz"]);
        assert_eq!(site.page_title(), "Datenschutzerklärung");
    }

    #[test]
    fn test_follow_links() {
        let mut site = site();
        let reply = site.execute_line("follow 1");
        assert!(reply.has_tag("EXTERNAL"));
        assert_eq!(site.route(), Route::Home);

        site.execute_line("go /Impressum");
        let count = site.shell().page().links().len();
        let reply = site.execute(HeadlessCommand::Follow(count));
        assert_eq!(reply.lines, ["[ROUTE] home /"]);

        let reply = site.execute(HeadlessCommand::Follow(99));
        assert!(reply.has_tag("ERROR"));
    }

    #[test]
    fn test_follow_zero_is_an_error() {
        let mut site = site();
        let reply = site.execute(HeadlessCommand::Follow(0));
        assert!(reply.has_tag("ERROR"));
        assert_eq!(site.route(), Route::Home);
    }

    #[test]
    fn test_banner_links_listed_while_undecided() {
        let mut site = site();
        let page_links = site.shell().page().links().len();

        let reply = site.execute(HeadlessCommand::Links);
        let banner_line = format!("[LINK] {} Datenschutzerklärung -> /Datenschutz", page_links + 1);
        assert!(reply.lines.contains(&banner_line));

        let reply = site.execute(HeadlessCommand::Follow(page_links + 1));
        assert_eq!(reply.lines, ["[ROUTE] privacy-policy /Datenschutz"]);
        assert!(site.banner_visible());
        assert_eq!(site.decision(), None);

        site.execute(HeadlessCommand::AcceptAll);
        let reply = site.execute(HeadlessCommand::Links);
        assert!(!reply.lines.iter().any(|l| l.contains("Cookie-Richtlinie")));
    }

    #[test]
    fn test_navigation_leaves_no_scroll_backlog() {
        let mut site = site();
        for _ in 0..50 {
            site.execute_line("go /Cookies");
        }
        site.execute_line("follow 1");
        assert_eq!(site.shell().history().pending_scroll_requests(), 0);
    }

    #[test]
    fn test_unknown_line_is_error_reply() {
        let mut site = site();
        let reply = site.execute_line("jump");
        assert!(reply.has_tag("ERROR"));
        assert!(!reply.quit);
        assert!(site.execute_line("quit").quit);
    }
}
