use serde::{Deserialize, Serialize};

use crate::record::{EncounterRecord, absolute_end_time};

/// A single uploaded log, as returned by the reporting service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub code: String,
    /// Unix epoch milliseconds
    pub start_time: f64,
    #[serde(default)]
    pub fights: Vec<Fight>,
}

/// One pull inside a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fight {
    pub name: String,
    /// Absent for trash pulls; read as tier 0
    #[serde(default)]
    pub difficulty: Option<i32>,
    /// Milliseconds since the report start
    pub end_time: f64,
    #[serde(default)]
    pub kill: Option<bool>,
}

/// Flatten reports into encounter records with absolute end times.
///
/// A missing difficulty becomes tier 0 and a missing kill flag counts as a
/// wipe.
pub fn reports_to_records(reports: &[Report]) -> Vec<EncounterRecord> {
    let mut records = Vec::new();
    let mut untiered = 0usize;

    for report in reports {
        for fight in &report.fights {
            let difficulty = fight.difficulty.unwrap_or_else(|| {
                untiered += 1;
                0
            });

            let Some(end_time) = absolute_end_time(report.start_time as i64, fight.end_time as i64)
            else {
                tracing::warn!(
                    report = %report.code,
                    fight = %fight.name,
                    start_time = report.start_time,
                    end_time = fight.end_time,
                    "skipping fight with unrepresentable end time"
                );
                continue;
            };

            records.push(EncounterRecord::new(
                fight.name.clone(),
                difficulty,
                end_time,
                fight.kill.unwrap_or(false),
            ));
        }
    }

    tracing::debug!(
        reports = reports.len(),
        records = records.len(),
        untiered,
        "flattened reports"
    );
    records
}
