//! Aggregation and extremum search over a filtered subset.
//!
//! This module groups filtered records by year, year+quarter, or industry,
//! computes per-group means for charting, and identifies the highest/lowest
//! groups for a chosen metric under metric-specific combination rules.

pub mod aggregate;
pub mod extremum;
pub mod report;
pub mod types;
pub mod utility;
