//! Per-encounter progression statistics
//!
//! Folds a flat stream of encounter records into one summary cell per
//! (encounter name, difficulty) pair.

mod cell;
mod table;


pub use cell::SummaryCell;
pub use table::AggregationTable;
