use std::io::Write;

use super::{RenderError, format_timestamp};
use crate::stats::AggregationTable;

const ENCOUNTER_HEADER: &str = "Encounter";

/// Fields emitted for an encounter never seen on a difficulty
const MISSING_BLOCK: [&str; 4] = ["", "", "0", "0"];

/// Write the CSV report and flush it.
///
/// Columns are `Encounter` followed by four columns per difficulty, in the
/// order the difficulties were first observed. Every row has the header's
/// width; encounters missing a difficulty get a placeholder block.
pub fn write_csv<W: Write>(table: &AggregationTable, out: W) -> Result<(), RenderError> {
    let difficulties = table.difficulties();
    let width = 1 + 4 * difficulties.len();
    let mut writer = csv::Writer::from_writer(out);

    let mut header = Vec::with_capacity(width);
    header.push(ENCOUNTER_HEADER.to_string());
    for difficulty in difficulties {
        header.extend(difficulty.csv_headers());
    }
    writer.write_record(&header)?;

    for name in table.encounter_names() {
        let mut row: Vec<String> = Vec::with_capacity(width);
        row.push(name.to_string());

        for &difficulty in difficulties {
            match table.get(name, difficulty) {
                Some(cell) => {
                    row.push(format_timestamp(&cell.first_seen));
                    row.push(
                        cell.first_kill
                            .as_ref()
                            .map(format_timestamp)
                            .unwrap_or_default(),
                    );
                    row.push(cell.attempts.to_string());
                    row.push(cell.kills.to_string());
                }
                None => row.extend(MISSING_BLOCK.iter().map(|s| s.to_string())),
            }
        }

        debug_assert_eq!(row.len(), width);
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Render the CSV report into a string.
pub fn render_csv(table: &AggregationTable) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
