//! Application configuration
//!
//! Re-exports the shared config types from killboard-types and adds
//! persistence plus environment overrides for AppConfig.

use std::path::{Path, PathBuf};

pub use killboard_types::{AppConfig, DEFAULT_OUTPUT_FILE, KillCounting, OutputFormat};

use super::ConfigError;

const APP_NAME: &str = "killboard";
const CONFIG_NAME: &str = "config";

/// Environment variable holding the OAuth client id
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
/// Environment variable holding the OAuth client secret
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

/// Extension trait for AppConfig persistence and overrides
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn store_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn path() -> Result<PathBuf, ConfigError>;
    fn with_env(self) -> Self;
    fn with_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>;
}

impl AppConfigExt for AppConfig {
    /// Load from disk, falling back to defaults if the file is unreadable.
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    fn store_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self.clone()).map_err(ConfigError::Save)
    }

    fn path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }

    /// Apply `CLIENT_ID` / `CLIENT_SECRET` from the process environment.
    fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply credential overrides from `lookup`. Empty values are ignored.
    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(CLIENT_ID_VAR).filter(|v| !v.is_empty()) {
            self.client_id = Some(id);
        }
        if let Some(secret) = lookup(CLIENT_SECRET_VAR).filter(|v| !v.is_empty()) {
            self.client_secret = Some(secret);
        }
        self
    }
}
