//! Assembles the complete per-query result payload.

use anyhow::Result;
use chrono::Utc;
use tracing::debug;

use crate::analyzers::aggregate::{aggregate, aggregate_by_industry};
use crate::analyzers::extremum::extremum;
use crate::analyzers::types::{Direction, Metric, MetricExtremes, QuerySummary};
use crate::dataset::Record;

/// Builds the full presentation payload for a filtered subset: time and
/// industry aggregations plus highest/lowest results for every metric.
///
/// # Errors
///
/// Fails on an empty subset, which the caller must check for after
/// filtering.
pub fn summarize(subset: &[Record], by_quarter: bool) -> Result<QuerySummary> {
    let time_rows = aggregate(subset, by_quarter);
    let industry_rows = aggregate_by_industry(subset);

    let mut extremes = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        extremes.push(MetricExtremes {
            metric: metric.to_string(),
            highest: extremum(subset, metric, Direction::Highest, by_quarter)?,
            lowest: extremum(subset, metric, Direction::Lowest, by_quarter)?,
        });
    }

    debug!(
        time_rows = time_rows.len(),
        industry_rows = industry_rows.len(),
        "Query summary assembled"
    );

    Ok(QuerySummary {
        generated_at: Utc::now(),
        by_quarter,
        time_rows,
        industry_rows,
        extremes,
    })
}
