//! Dataset records and CSV loading.
//!
//! The quarterly labour-market dataset is one CSV row per (year, quarter,
//! industry) observation. The `retrenchment` column uses `-` as a "no data"
//! sentinel, which is normalized to zero on load so downstream arithmetic
//! never sees it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::quarter::Quarter;

/// One observation row of the quarterly dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub quarter: Quarter,
    pub industry: String,
    pub recruitment_rate: f64,
    pub resignation_rate: f64,
    #[serde(deserialize_with = "retrenchment_or_zero")]
    pub retrenchment: f64,
}

/// Parses the retrenchment column, mapping the `-` sentinel (and blank cells)
/// to zero.
fn retrenchment_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(serde::de::Error::custom)
}

/// The loaded dataset with cached year bounds.
///
/// Bounds are computed once on construction rather than read positionally
/// from the first/last row, so correctness does not depend on row order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    bounds: Option<(i32, i32)>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let min = records.iter().map(|r| r.year).min();
        let max = records.iter().map(|r| r.year).max();
        Dataset {
            records,
            bounds: min.zip(max),
        }
    }

    /// Loads the dataset from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
        Self::from_csv_reader(file)
    }

    /// Loads the dataset from any CSV source with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in rdr.deserialize() {
            let record: Record = result?;
            records.push(record);
        }

        debug!(rows = records.len(), "Dataset loaded");
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Smallest year present, `None` for an empty dataset.
    pub fn min_year(&self) -> Option<i32> {
        self.bounds.map(|(min, _)| min)
    }

    /// Largest year present, `None` for an empty dataset.
    pub fn max_year(&self) -> Option<i32> {
        self.bounds.map(|(_, max)| max)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
