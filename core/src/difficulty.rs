//! Raid difficulty tiers
//!
//! Tiers arrive from the reporting service as bare integers. Only a handful
//! are recognized; anything else is still accepted and rendered with a
//! fallback label.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Display names for the recognized tiers.
static TIER_NAMES: phf::Map<i32, &'static str> = phf_map! {
    2i32 => "raid finder",
    3i32 => "normal",
    4i32 => "heroic",
    5i32 => "mythic",
};

/// Column suffixes for one tier's block in the CSV report, in column order.
pub const CSV_HEADER_SUFFIXES: [&str; 4] = ["First Seen", "First Kill", "Encounters", "Kills"];

/// An opaque difficulty code. Any value is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTier(pub i32);

impl DifficultyTier {
    pub const RAID_FINDER: Self = Self(2);
    pub const NORMAL: Self = Self(3);
    pub const HEROIC: Self = Self(4);
    pub const MYTHIC: Self = Self(5);

    pub fn is_known(&self) -> bool {
        TIER_NAMES.contains_key(&self.0)
    }

    /// Stable display name, e.g. "heroic" or "unknown (99)"
    pub fn display_name(&self) -> Cow<'static, str> {
        match TIER_NAMES.get(&self.0) {
            Some(name) => Cow::Borrowed(*name),
            None => Cow::Owned(format!("unknown ({})", self.0)),
        }
    }

    /// The four column titles for this tier's CSV block.
    pub fn csv_headers(&self) -> [String; 4] {
        let name = self.display_name();
        CSV_HEADER_SUFFIXES.map(|suffix| format!("{name} {suffix}"))
    }
}

impl From<i32> for DifficultyTier {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
