//! Highest/lowest search over grouped metric values.

use anyhow::{Result, bail};

use crate::analyzers::types::{Combine, Direction, ExtremumResult, Metric};
use crate::analyzers::utility::{mean, round1};
use crate::dataset::Record;

/// Finds the best (highest or lowest) group value for a metric.
///
/// Groups are keyed by year, or by "year quarter" when `by_quarter` is set.
/// Rate metrics compare per-group means; the retrenchment count compares
/// per-group sums, and the reported value is the winning group's sum divided
/// by its own size. Every group tied at the extreme is listed in `keys`, in
/// the order groups first appear in the subset.
///
/// # Errors
///
/// Returns an error for an empty subset; callers must filter first and check
/// for emptiness themselves.
pub fn extremum(
    subset: &[Record],
    metric: Metric,
    direction: Direction,
    by_quarter: bool,
) -> Result<ExtremumResult> {
    if subset.is_empty() {
        bail!("extremum search requires a non-empty subset");
    }

    // Group raw metric values by key, preserving first-appearance order.
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for record in subset {
        let key = if by_quarter {
            format!("{} {}", record.year, record.quarter)
        } else {
            record.year.to_string()
        };
        match groups.iter_mut().find(|(k, _)| k == &key) {
            Some((_, values)) => values.push(metric.value(record)),
            None => groups.push((key, vec![metric.value(record)])),
        }
    }

    let combined: Vec<f64> = groups
        .iter()
        .map(|(_, values)| match metric.combine() {
            Combine::Mean => round1(mean(values)),
            Combine::Sum => round1(values.iter().sum()),
        })
        .collect();

    // First group achieving the extreme.
    let mut best_idx = 0;
    for (idx, &candidate) in combined.iter().enumerate() {
        let better = match direction {
            Direction::Highest => candidate > combined[best_idx],
            Direction::Lowest => candidate < combined[best_idx],
        };
        if better {
            best_idx = idx;
        }
    }
    let best = combined[best_idx];

    let keys: Vec<String> = groups
        .iter()
        .zip(&combined)
        .filter(|&(_, &value)| value == best)
        .map(|((key, _), _)| key.clone())
        .collect();

    let value = match metric.combine() {
        Combine::Mean => best,
        Combine::Sum => round1(best / groups[best_idx].1.len() as f64),
    };

    Ok(ExtremumResult { value, keys })
}
