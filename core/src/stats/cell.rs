use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::difficulty::DifficultyTier;
use killboard_types::KillCounting;

/// Summary of every attempt at one encounter on one difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCell {
    pub difficulty: DifficultyTier,
    /// Earliest end time over all attempts
    pub first_seen: DateTime<Utc>,
    /// Earliest end time over killing attempts, `None` until the first kill
    pub first_kill: Option<DateTime<Utc>>,
    pub attempts: u64,
    pub kills: u64,
}

impl SummaryCell {
    /// A cell with no attempts merged yet.
    pub(crate) fn empty(difficulty: DifficultyTier, first_seen: DateTime<Utc>) -> Self {
        Self {
            difficulty,
            first_seen,
            first_kill: None,
            attempts: 0,
            kills: 0,
        }
    }

    pub fn killed(&self) -> bool {
        self.first_kill.is_some()
    }

    /// Fold one attempt into the cell.
    pub(crate) fn record(&mut self, end_time: DateTime<Utc>, killed: bool, counting: KillCounting) {
        if end_time < self.first_seen {
            self.first_seen = end_time;
        }

        if killed {
            let improves = self.first_kill.is_none_or(|current| end_time < current);
            if improves {
                self.first_kill = Some(end_time);
            }
            if improves || counting == KillCounting::EveryKill {
                self.kills += 1;
            }
        }

        self.attempts += 1;
    }
}
