//! Report rendering
//!
//! Two deterministic views of an [`AggregationTable`]: an indented text dump
//! and a CSV table with one column block per observed difficulty.

mod csv_report;
mod error;
mod text;


pub use csv_report::{render_csv, write_csv};
pub use error::RenderError;
pub use text::{render_text, write_text};

use chrono::{DateTime, Utc};
use std::io::Write;

use crate::stats::AggregationTable;
use killboard_types::OutputFormat;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

/// Render a timestamp the same way in every report format
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Write the table to `out` in the requested format and flush it.
pub fn write_report<W: Write>(
    table: &AggregationTable,
    format: OutputFormat,
    mut out: W,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Text => {
            write_text(table, &mut out)?;
            out.flush()?;
        }
        OutputFormat::Csv => write_csv(table, &mut out)?,
    }
    tracing::debug!(
        format = ?format,
        encounters = table.len(),
        "report written"
    );
    Ok(())
}
