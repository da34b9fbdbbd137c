use killboard_core::context::{AppConfig, AppConfigExt, KillCounting, OutputFormat};
use std::path::PathBuf;

/// Holds all settings for one CLI invocation.
/// Built from the config file, then environment, then command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub config: AppConfig,
    /// Where to dump fetched reports as JSON, if anywhere
    pub save_reports: Option<PathBuf>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::from_config(AppConfig::load().with_env())
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self {
            config,
            save_reports: None,
        }
    }

    pub fn kill_counting(&self) -> KillCounting {
        self.config.kill_counting
    }

    pub fn output_format(&self) -> OutputFormat {
        self.config.output_format
    }

    /// Output file path; empty means stdout.
    pub fn output_file(&self) -> &str {
        &self.config.output_file
    }
}
