//! Runtime configuration.
//!
//! Defaults, then environment variables, then whatever the caller sets
//! explicitly (usually command-line flags).

use std::path::PathBuf;

use thiserror::Error;

use crate::content::StaticContent;
use crate::history::MemoryHistory;
use crate::persist::{FileStorage, KeyValueStore, MemoryStorage};
use crate::shell::{Shell, SiteShell};

/// Environment variable overriding the storage base directory.
pub const ENV_STORAGE_DIR: &str = "ARC_SITE_STORAGE_DIR";
/// Environment variable overriding the origin scope.
pub const ENV_ORIGIN: &str = "ARC_SITE_ORIGIN";
/// Environment variable overriding the initial location.
pub const ENV_START_PATH: &str = "ARC_SITE_START_PATH";

const DEFAULT_STORAGE_DIR: &str = ".arc-site";
const DEFAULT_ORIGIN: &str = "arc-assessment";

/// Errors from configuration validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Start path must begin with '/': {0:?}")]
    RelativeStartPath(String),

    #[error("Origin must not be empty")]
    EmptyOrigin,
}

/// Where consent is stored and where the visitor starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base directory of the file-backed medium.
    pub storage_dir: PathBuf,
    /// Origin the stored values are scoped to.
    pub origin: String,
    /// Location the history starts at.
    pub start_path: String,
    /// Keep everything in memory; nothing survives the process.
    pub ephemeral: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            origin: DEFAULT_ORIGIN.to_string(),
            start_path: "/".to_string(),
            ephemeral: false,
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = set(ENV_STORAGE_DIR) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(origin) = set(ENV_ORIGIN) {
            config.origin = origin;
        }
        if let Some(path) = set(ENV_START_PATH) {
            config.start_path = path;
        }
        config
    }

    /// Set the storage base directory.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the origin scope.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Set the initial location.
    pub fn with_start_path(mut self, path: impl Into<String>) -> Self {
        self.start_path = path.into();
        self
    }

    /// Keep consent in memory only.
    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    /// Check the values make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_path.starts_with('/') {
            return Err(ConfigError::RelativeStartPath(self.start_path.clone()));
        }
        if self.origin.trim().is_empty() {
            return Err(ConfigError::EmptyOrigin);
        }
        Ok(())
    }

    /// Directory holding this origin's stored values.
    pub fn origin_dir(&self) -> PathBuf {
        FileStorage::open(&self.storage_dir, &self.origin)
            .dir()
            .to_path_buf()
    }

    /// The medium this configuration selects.
    pub fn open_storage(&self) -> Box<dyn KeyValueStore> {
        if self.ephemeral {
            Box::new(MemoryStorage::new())
        } else {
            Box::new(FileStorage::open(&self.storage_dir, &self.origin))
        }
    }

    /// Validate and build a shell over the built-in content.
    pub fn build_shell(&self) -> Result<SiteShell, ConfigError> {
        self.validate()?;
        tracing::info!(
            origin = %self.origin,
            storage = %self.storage_dir.display(),
            ephemeral = self.ephemeral,
            start = %self.start_path,
            "opening site"
        );
        Ok(Shell::new(
            self.open_storage(),
            MemoryHistory::new(self.start_path.clone()),
            StaticContent,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.start_path, "/");
        assert_eq!(config.origin, "arc-assessment");
        assert!(!config.ephemeral);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = SiteConfig::from_lookup(lookup(&[
            (ENV_STORAGE_DIR, "/tmp/arc"),
            (ENV_ORIGIN, "staging"),
            (ENV_START_PATH, "/Cookies"),
        ]));
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/arc"));
        assert_eq!(config.origin, "staging");
        assert_eq!(config.start_path, "/Cookies");
        assert_eq!(config.origin_dir(), PathBuf::from("/tmp/arc/staging"));
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let config = SiteConfig::from_lookup(lookup(&[(ENV_ORIGIN, "  ")]));
        assert_eq!(config.origin, "arc-assessment");
    }

    #[test]
    fn test_builder_wins_over_env() {
        let config = SiteConfig::from_lookup(lookup(&[(ENV_START_PATH, "/Cookies")]))
            .with_start_path("/Impressum")
            .ephemeral(true);
        assert_eq!(config.start_path, "/Impressum");
        assert!(config.ephemeral);
    }

    #[test]
    fn test_build_shell_ephemeral() {
        let shell = SiteConfig::new()
            .ephemeral(true)
            .with_start_path("/Cookies")
            .build_shell()
            .expect("valid config");
        assert_eq!(shell.route(), crate::router::Route::CookiePolicy);
        assert!(shell.view().banner_visible());
    }

    #[test]
    fn test_build_shell_rejects_invalid() {
        assert!(SiteConfig::new().with_start_path("x").build_shell().is_err());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            SiteConfig::new().with_start_path("Impressum").validate(),
            Err(ConfigError::RelativeStartPath("Impressum".to_string()))
        );
        assert_eq!(
            SiteConfig::new().with_origin("").validate(),
            Err(ConfigError::EmptyOrigin)
        );
    }
}
