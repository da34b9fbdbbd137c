mod config;
mod error;

pub use config::{
    AppConfig, AppConfigExt, CLIENT_ID_VAR, CLIENT_SECRET_VAR, DEFAULT_OUTPUT_FILE, KillCounting,
    OutputFormat,
};
pub use error::ConfigError;
