//! Error types for report retrieval

use std::path::PathBuf;
use thiserror::Error;

/// Errors while fetching or loading report data
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("client id and secret are required to query the reporting service")]
    MissingCredentials,

    #[error("failed to obtain access token")]
    Auth(#[source] reqwest::Error),

    #[error("request to reporting service failed")]
    Http(#[from] reqwest::Error),

    #[error("reporting service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("query rejected: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("response did not contain report data")]
    MissingData,

    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode reports")]
    Encode(#[source] serde_json::Error),

    #[error("failed to read report file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse report file {path}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
