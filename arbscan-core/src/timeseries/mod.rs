//! Time-series utilities shared by connectors and orchestrator.
//!
//! Modules include:
//! - `project`: reduce records to a (timestamp, value) series for one field
//! - `align`: inner-join per-exchange series on timestamp
//! - `stats`: row-wise aggregates and pairwise exchange differences
//! - `resample`: trim to full calendar days and reduce to daily buckets
/// Field projection from raw records.
pub mod project;
/// Timestamp alignment across exchanges.
pub mod align;
/// Cross-exchange statistics.
pub mod stats;
/// Daily resampling.
pub mod resample;
/// Shared numeric helpers.
pub mod util;
