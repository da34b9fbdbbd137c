use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyTier;

/// One attempt at an encounter, with its absolute end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub name: String,
    pub difficulty: DifficultyTier,
    pub end_time: DateTime<Utc>,
    pub killed: bool,
}

impl EncounterRecord {
    pub fn new(
        name: impl Into<String>,
        difficulty: impl Into<DifficultyTier>,
        end_time: DateTime<Utc>,
        killed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            difficulty: difficulty.into(),
            end_time,
            killed,
        }
    }
}

/// Resolve a fight's end offset against its report's start time.
///
/// Both values are milliseconds: `report_start_ms` since the Unix epoch,
/// `end_offset_ms` relative to the report start. Returns `None` if the
/// result is not representable.
pub fn absolute_end_time(report_start_ms: i64, end_offset_ms: i64) -> Option<DateTime<Utc>> {
    let start = DateTime::<Utc>::from_timestamp_millis(report_start_ms)?;
    start.checked_add_signed(Duration::try_milliseconds(end_offset_ms)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_absolute_end_time_adds_offset() {
        let end = absolute_end_time(1_700_000_000_000, 90_500).unwrap();
        assert_eq!(end.timestamp_millis(), 1_700_000_090_500);
    }

    #[test]
    fn test_absolute_end_time_zero_offset() {
        let end = absolute_end_time(0, 0).unwrap();
        assert_eq!(end, Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_absolute_end_time_out_of_range() {
        assert!(absolute_end_time(i64::MAX, 0).is_none());
        assert!(absolute_end_time(0, i64::MAX).is_none());
    }
}
