pub mod context;
pub mod difficulty;
pub mod record;
pub mod render;
pub mod source;
pub mod stats;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt, ConfigError, KillCounting, OutputFormat};
pub use difficulty::DifficultyTier;
pub use record::{EncounterRecord, absolute_end_time};
pub use render::{RenderError, render_csv, render_text, write_csv, write_report, write_text};
pub use source::{ReportFilter, SourceError, WarcraftLogsClient};
pub use stats::{AggregationTable, SummaryCell};
