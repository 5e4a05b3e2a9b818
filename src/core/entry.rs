use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

/// Tournament tier as written in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Minor,
    Major,
    Premier,
    /// Any other label, kept verbatim.
    Other(String),
}

impl Tier {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Minor" => Self::Minor,
            "Major" => Self::Major,
            "Premier" => Self::Premier,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Minor => "Minor",
            Self::Major => "Major",
            Self::Premier => "Premier",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub fn is_premier(&self) -> bool {
        matches!(self, Self::Premier)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player's result at one tournament.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentEntry {
    pub player_id: String,
    pub tournament_name: String,
    pub date: NaiveDate,
    /// Ordinal label such as `"1st"` or `"5th-8th"`.
    pub placement: String,
    /// Best (lowest) numeric place covered by `placement`.
    pub start_placement: u32,
    pub tier: Tier,
    pub earnings: Decimal,
    pub team: String,
}

impl TournamentEntry {
    #[must_use]
    pub fn is_international(&self) -> bool {
        self.tournament_name.contains("International")
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        date_to_unix_seconds(self.date)
    }

    pub fn earnings_f64(&self) -> ChartResult<f64> {
        decimal_to_f64(self.earnings, "earnings")
    }
}

/// One row of the aggregated top-earners table.
///
/// `values` keeps the tournament columns in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEarnerRow {
    pub player_id: String,
    pub values: IndexMap<String, Decimal>,
}

impl TopEarnerRow {
    #[must_use]
    pub fn value(&self, key: &str) -> Decimal {
        self.values.get(key).copied().unwrap_or_default()
    }
}

/// Parsed top-earners table with its tournament column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopEarnerTable {
    pub keys: Vec<String>,
    pub rows: Vec<TopEarnerRow>,
}

impl TopEarnerTable {
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.player_id.clone()).collect()
    }
}
