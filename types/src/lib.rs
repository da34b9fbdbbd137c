//! Shared configuration types for killboard
//!
//! This crate contains serializable configuration types that are shared between
//! the aggregation core (killboard-core) and the command-line frontend.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Aggregation Settings
// ─────────────────────────────────────────────────────────────────────────────

/// How kill records are counted toward a cell's kill total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillCounting {
    /// A kill only counts when it is strictly earlier than every kill seen
    /// so far for the same encounter and difficulty. Matches the historical
    /// report output, where feed order changes the kill total.
    #[default]
    OnImprovement,
    /// Every killing attempt counts.
    EveryKill,
}

impl KillCounting {
    pub fn label(&self) -> &'static str {
        match self {
            KillCounting::OnImprovement => "on improvement",
            KillCounting::EveryKill => "every kill",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Report rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Indented, human-readable dump
    #[default]
    Text,
    /// One row per encounter, one column block per difficulty
    Csv,
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Default output path when none is given on the command line.
pub const DEFAULT_OUTPUT_FILE: &str = "output";

/// Persisted application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// OAuth client id for the reporting service
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret for the reporting service
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Region used for guild lookups when none is given
    #[serde(default)]
    pub default_region: Option<String>,
    /// Server slug used for guild lookups when none is given
    #[serde(default)]
    pub default_server: Option<String>,
    #[serde(default)]
    pub kill_counting: KillCounting,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            default_region: None,
            default_server: None,
            kill_counting: KillCounting::default(),
            output_format: OutputFormat::default(),
            output_file: default_output_file(),
        }
    }
}

impl AppConfig {
    /// Both halves of the client credentials, if configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Some((id, secret)),
            _ => None,
        }
    }
}
