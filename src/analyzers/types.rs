//! Data types used by the aggregation and extremum pipeline.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::dataset::Record;
use crate::quarter::Quarter;

/// The key identifying one aggregation bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    Year(i32),
    YearQuarter(i32, Quarter),
    Industry(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(year) => write!(f, "{year}"),
            GroupKey::YearQuarter(year, quarter) => write!(f, "{year} {quarter}"),
            GroupKey::Industry(industry) => write!(f, "{industry}"),
        }
    }
}

// Serialized as its display form so rows flatten to a single CSV column.
impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Per-group means of every metric column, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub group: GroupKey,
    pub recruitment_rate: f64,
    pub resignation_rate: f64,
    pub retrenchment: f64,
}

/// How values of a metric are combined within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    Mean,
    Sum,
}

/// A queryable metric column with its combination rule attached, replacing
/// branching on column-name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    RecruitmentRate,
    ResignationRate,
    Retrenchment,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::RecruitmentRate,
        Metric::ResignationRate,
        Metric::Retrenchment,
    ];

    /// Rates are averaged across a group; the retrenchment count is summed.
    pub fn combine(self) -> Combine {
        match self {
            Metric::RecruitmentRate | Metric::ResignationRate => Combine::Mean,
            Metric::Retrenchment => Combine::Sum,
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::RecruitmentRate => record.recruitment_rate,
            Metric::ResignationRate => record.resignation_rate,
            Metric::Retrenchment => record.retrenchment,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::RecruitmentRate => "recruitment_rate",
            Metric::ResignationRate => "resignation_rate",
            Metric::Retrenchment => "retrenchment",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recruitment" | "recruitment_rate" => Ok(Metric::RecruitmentRate),
            "resignation" | "resignation_rate" => Ok(Metric::ResignationRate),
            "retrenchment" => Ok(Metric::Retrenchment),
            other => bail!("unknown metric: {other:?}"),
        }
    }
}

/// Which end of the per-group values to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Highest,
    Lowest,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Highest => write!(f, "highest"),
            Direction::Lowest => write!(f, "lowest"),
        }
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "highest" | "high" | "max" => Ok(Direction::Highest),
            "lowest" | "low" | "min" => Ok(Direction::Lowest),
            other => bail!("unknown direction: {other:?}"),
        }
    }
}

/// The best group value plus every group key tied at that value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremumResult {
    pub value: f64,
    pub keys: Vec<String>,
}

/// Highest and lowest results for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricExtremes {
    pub metric: String,
    pub highest: ExtremumResult,
    pub lowest: ExtremumResult,
}

/// Complete result payload for one query, handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySummary {
    pub generated_at: DateTime<Utc>,
    pub by_quarter: bool,
    pub time_rows: Vec<AggregateRow>,
    pub industry_rows: Vec<AggregateRow>,
    pub extremes: Vec<MetricExtremes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_display() {
        assert_eq!(GroupKey::Year(2019).to_string(), "2019");
        assert_eq!(
            GroupKey::YearQuarter(2019, Quarter::Q2).to_string(),
            "2019 Q2"
        );
        assert_eq!(
            GroupKey::Industry("services".to_string()).to_string(),
            "services"
        );
    }

    #[test]
    fn test_metric_combine_rules() {
        assert_eq!(Metric::RecruitmentRate.combine(), Combine::Mean);
        assert_eq!(Metric::ResignationRate.combine(), Combine::Mean);
        assert_eq!(Metric::Retrenchment.combine(), Combine::Sum);
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!(
            "recruitment".parse::<Metric>().unwrap(),
            Metric::RecruitmentRate
        );
        assert_eq!(
            "resignation_rate".parse::<Metric>().unwrap(),
            Metric::ResignationRate
        );
        assert!("retirement".parse::<Metric>().is_err());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("highest".parse::<Direction>().unwrap(), Direction::Highest);
        assert_eq!("low".parse::<Direction>().unwrap(), Direction::Lowest);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
