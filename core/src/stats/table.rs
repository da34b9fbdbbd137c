use chrono::{DateTime, Utc};
use hashbrown::HashMap;

use super::SummaryCell;
use crate::difficulty::DifficultyTier;
use crate::record::EncounterRecord;
use killboard_types::KillCounting;

/// Summary cells keyed by encounter name, then difficulty.
///
/// Also remembers the order in which difficulties were first observed; that
/// order drives the column layout of the CSV report.
#[derive(Debug, Clone, Default)]
pub struct AggregationTable {
    encounters: HashMap<String, HashMap<DifficultyTier, SummaryCell>>,
    difficulties: Vec<DifficultyTier>,
    counting: KillCounting,
    record_count: u64,
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kill_counting(counting: KillCounting) -> Self {
        Self {
            counting,
            ..Self::default()
        }
    }

    pub fn kill_counting(&self) -> KillCounting {
        self.counting
    }

    /// Merge one attempt using the record's own end time.
    pub fn merge(&mut self, record: &EncounterRecord) {
        self.merge_at(record.end_time, record);
    }

    /// Merge one attempt, taking the end time from `end_time` rather than
    /// the record.
    pub fn merge_at(&mut self, end_time: DateTime<Utc>, record: &EncounterRecord) {
        let counting = self.counting;
        let cells = self.encounters.entry_ref(record.name.as_str()).or_default();
        cells
            .entry(record.difficulty)
            .or_insert_with(|| SummaryCell::empty(record.difficulty, end_time))
            .record(end_time, record.killed, counting);

        if !self.difficulties.contains(&record.difficulty) {
            if !record.difficulty.is_known() {
                tracing::debug!(
                    difficulty = record.difficulty.0,
                    encounter = %record.name,
                    "unrecognized difficulty tier"
                );
            }
            self.difficulties.push(record.difficulty);
        }
        self.record_count += 1;
    }

    pub fn merge_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a EncounterRecord>,
    {
        let before = self.record_count;
        for record in records {
            self.merge(record);
        }
        tracing::debug!(
            merged = self.record_count - before,
            encounters = self.encounters.len(),
            difficulties = self.difficulties.len(),
            "merged encounter records"
        );
    }

    pub fn get(&self, name: &str, difficulty: DifficultyTier) -> Option<&SummaryCell> {
        self.encounters.get(name)?.get(&difficulty)
    }

    /// Difficulties in the order they were first observed.
    pub fn difficulties(&self) -> &[DifficultyTier] {
        &self.difficulties
    }

    /// Encounter names in lexicographic order.
    pub fn encounter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.encounters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Cells recorded for an encounter, in difficulty discovery order.
    pub fn cells(&self, name: &str) -> Vec<&SummaryCell> {
        let Some(cells) = self.encounters.get(name) else {
            return Vec::new();
        };
        self.difficulties
            .iter()
            .filter_map(|difficulty| cells.get(difficulty))
            .collect()
    }

    /// Number of distinct encounter names
    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    /// Total records merged so far
    pub fn record_count(&self) -> u64 {
        self.record_count
    }
}

impl<'a> Extend<&'a EncounterRecord> for AggregationTable {
    fn extend<T: IntoIterator<Item = &'a EncounterRecord>>(&mut self, iter: T) {
        self.merge_all(iter);
    }
}
