//! Report data sources
//!
//! Reports come either from the Warcraft Logs v2 API or from a JSON dump of
//! previously fetched reports. Both are flattened into encounter records
//! before anything reaches the aggregation table.

mod error;
mod file;
mod report;
mod warcraftlogs;

#[cfg(test)]
mod client_tests;

pub use error::SourceError;
pub use file::{load_reports, save_reports};
pub use report::{Fight, Report, reports_to_records};
pub use warcraftlogs::{
    Credentials, DEFAULT_API_URL, DEFAULT_TOKEN_URL, ReportFilter, ReportPage, WarcraftLogsClient,
};
