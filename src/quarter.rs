//! Quarter labels and their translation to calendar months.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// A calendar quarter as it appears in the dataset's `quarter` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All four quarters in ascending order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// First month of the quarter: Q1→1, Q2→4, Q3→7, Q4→10.
    pub fn starting_month(self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 4,
            Quarter::Q3 => 7,
            Quarter::Q4 => 10,
        }
    }

    /// The quarter containing the given month (1–12).
    pub fn from_month(month: u32) -> Quarter {
        debug_assert!((1..=12).contains(&month));
        match month {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// Quarters from `self` through Q4, ascending.
    pub fn from_start(self) -> &'static [Quarter] {
        &Self::ALL[self as usize..]
    }

    /// Quarters from Q1 through `self`, ascending.
    pub fn through_end(self) -> &'static [Quarter] {
        &Self::ALL[..=self as usize]
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Quarter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => bail!("unknown quarter label: {other:?} (expected Q1..Q4)"),
        }
    }
}
