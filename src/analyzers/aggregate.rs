//! Grouping a filtered subset and computing per-group means.

use std::collections::BTreeMap;

use crate::analyzers::types::{AggregateRow, GroupKey};
use crate::analyzers::utility::{mean, round1};
use crate::dataset::Record;
use crate::quarter::Quarter;

/// Raw metric values collected for one group.
#[derive(Debug, Default)]
struct MetricColumns {
    recruitment: Vec<f64>,
    resignation: Vec<f64>,
    retrenchment: Vec<f64>,
}

impl MetricColumns {
    fn push(&mut self, record: &Record) {
        self.recruitment.push(record.recruitment_rate);
        self.resignation.push(record.resignation_rate);
        self.retrenchment.push(record.retrenchment);
    }

    fn into_row(self, group: GroupKey) -> AggregateRow {
        AggregateRow {
            group,
            recruitment_rate: round1(mean(&self.recruitment)),
            resignation_rate: round1(mean(&self.resignation)),
            retrenchment: round1(mean(&self.retrenchment)),
        }
    }
}

/// Aggregates the subset by year, or by year and quarter when `by_quarter`
/// is set. Rows are returned in ascending key order.
pub fn aggregate(subset: &[Record], by_quarter: bool) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(i32, Option<Quarter>), MetricColumns> = BTreeMap::new();

    for record in subset {
        let key = (record.year, by_quarter.then_some(record.quarter));
        groups.entry(key).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|((year, quarter), columns)| {
            let group = match quarter {
                Some(q) => GroupKey::YearQuarter(year, q),
                None => GroupKey::Year(year),
            };
            columns.into_row(group)
        })
        .collect()
}

/// Aggregates the subset by industry, in first-appearance order.
///
/// Comparison subsets mix two time points under each industry, so the year
/// dimension is deliberately dropped here.
pub fn aggregate_by_industry(subset: &[Record]) -> Vec<AggregateRow> {
    let mut groups: Vec<(String, MetricColumns)> = Vec::new();

    for record in subset {
        match groups.iter_mut().find(|(name, _)| name == &record.industry) {
            Some((_, columns)) => columns.push(record),
            None => {
                let mut columns = MetricColumns::default();
                columns.push(record);
                groups.push((record.industry.clone(), columns));
            }
        }
    }

    groups
        .into_iter()
        .map(|(industry, columns)| columns.into_row(GroupKey::Industry(industry)))
        .collect()
}
