//! Temporal and industry filtering of the dataset.
//!
//! A query selects either every year/quarter between two endpoints (range
//! mode) or exactly the two endpoints (comparison mode). Invalid windows are
//! signalled by an empty result, never by an error, so callers distinguish
//! "no data" from "bad input" themselves.

use crate::dataset::{Dataset, Record};
use crate::quarter::Quarter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Every year/quarter between the two endpoints, inclusive.
    Range,
    /// Exactly the two endpoints, nothing between.
    Comparison,
}

/// A validated query against the dataset.
///
/// The caller guarantees `industries` is non-empty and that in range mode the
/// two quarters are both set or both unset; the filter does not re-validate.
#[derive(Debug, Clone)]
pub struct TimeQuery {
    pub start_year: i32,
    pub end_year: i32,
    pub start_quarter: Option<Quarter>,
    pub end_quarter: Option<Quarter>,
    pub industries: Vec<String>,
    pub mode: QueryMode,
}

impl TimeQuery {
    /// Whether downstream aggregation should group by quarter.
    pub fn by_quarter(&self) -> bool {
        self.start_quarter.is_some() || self.end_quarter.is_some()
    }
}

/// Selects the records matching the query's time window and industry set.
///
/// Returns an empty vector when the year bounds fall outside the dataset,
/// when the quarter window is empty (end quarter before start quarter in a
/// single year), or when no industry matches.
pub fn filter(dataset: &Dataset, query: &TimeQuery) -> Vec<Record> {
    let (Some(min_year), Some(max_year)) = (dataset.min_year(), dataset.max_year()) else {
        return Vec::new();
    };
    if query.start_year < min_year || query.end_year > max_year {
        return Vec::new();
    }

    match query.mode {
        QueryMode::Range => filter_range(dataset.records(), query),
        QueryMode::Comparison => filter_comparison(dataset.records(), query),
    }
}

fn filter_range(records: &[Record], query: &TimeQuery) -> Vec<Record> {
    if query.start_quarter.is_none() && query.end_quarter.is_none() {
        return collect(records, &query.industries, |r| {
            r.year >= query.start_year && r.year <= query.end_year
        });
    }

    // A missing side expands to all four quarters.
    let start_span = query
        .start_quarter
        .map_or(&Quarter::ALL[..], |q| q.from_start());
    let end_span = query
        .end_quarter
        .map_or(&Quarter::ALL[..], |q| q.through_end());

    if query.start_year == query.end_year {
        // Intersection of the two spans; empty when the end quarter precedes
        // the start quarter.
        collect(records, &query.industries, |r| {
            r.year == query.start_year
                && start_span.contains(&r.quarter)
                && end_span.contains(&r.quarter)
        })
    } else {
        // Partial start year, full interior years, partial end year.
        let mut subset = collect(records, &query.industries, |r| {
            r.year == query.start_year && start_span.contains(&r.quarter)
        });
        subset.extend(collect(records, &query.industries, |r| {
            r.year > query.start_year && r.year < query.end_year
        }));
        subset.extend(collect(records, &query.industries, |r| {
            r.year == query.end_year && end_span.contains(&r.quarter)
        }));
        subset
    }
}

fn filter_comparison(records: &[Record], query: &TimeQuery) -> Vec<Record> {
    let Some((start_q, end_q)) = quarter_pair(query.start_quarter, query.end_quarter) else {
        return collect(records, &query.industries, |r| {
            r.year == query.start_year || r.year == query.end_year
        });
    };

    let mut subset = collect(records, &query.industries, |r| {
        r.year == query.start_year && r.quarter == start_q
    });
    subset.extend(collect(records, &query.industries, |r| {
        r.year == query.end_year && r.quarter == end_q
    }));
    subset
}

/// Resolves the comparison-mode quarter pair: a missing side mirrors the
/// given one, and `None` means no quarter constraint at all.
fn quarter_pair(
    start: Option<Quarter>,
    end: Option<Quarter>,
) -> Option<(Quarter, Quarter)> {
    match (start, end) {
        (None, None) => None,
        (Some(s), Some(e)) => Some((s, e)),
        (Some(s), None) => Some((s, s)),
        (None, Some(e)) => Some((e, e)),
    }
}

fn collect<F>(records: &[Record], industries: &[String], pred: F) -> Vec<Record>
where
    F: Fn(&Record) -> bool,
{
    records
        .iter()
        .filter(|r| pred(r) && industries.iter().any(|i| i == &r.industry))
        .cloned()
        .collect()
}
