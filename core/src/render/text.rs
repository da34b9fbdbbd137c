use std::io::Write;

use super::{RenderError, format_timestamp};
use crate::stats::{AggregationTable, SummaryCell};

/// Placeholder shown in place of a first kill that never happened
const NO_KILL: &str = "--";

/// Write the indented, human-readable report.
///
/// Each encounter name is followed by one tab-indented line per difficulty
/// and a blank separator line:
///
/// ```text
/// Boss A
///     normal: <first seen> [X] <first kill or --> :: <kills>/<attempts>
/// ```
pub fn write_text<W: Write>(table: &AggregationTable, out: &mut W) -> Result<(), RenderError> {
    for name in table.encounter_names() {
        writeln!(out, "{name}")?;
        for cell in table.cells(name) {
            writeln!(out, "\t{}: {}", cell.difficulty, cell_summary(cell))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render the text report into a string.
pub fn render_text(table: &AggregationTable) -> String {
    let mut buf = Vec::new();
    write_text(table, &mut buf).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

fn cell_summary(cell: &SummaryCell) -> String {
    let kill = cell
        .first_kill
        .as_ref()
        .map(format_timestamp)
        .unwrap_or_else(|| NO_KILL.to_string());
    format!(
        "{} [X] {} :: {}/{}",
        format_timestamp(&cell.first_seen),
        kill,
        cell.kills,
        cell.attempts
    )
}
