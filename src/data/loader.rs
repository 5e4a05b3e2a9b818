use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{Tier, TopEarnerRow, TopEarnerTable, TournamentEntry};
use crate::error::{ChartError, ChartResult};

/// One parsed row: column name → raw cell text.
pub type Record = IndexMap<String, String>;

pub const ENTRY_ID_COLUMN: &str = "id";
pub const ENTRY_TOURNAMENT_COLUMN: &str = "Tournament Name";
pub const ENTRY_DATE_COLUMN: &str = "Date";
pub const ENTRY_PLACEMENT_COLUMN: &str = "Placement";
pub const ENTRY_START_PLACEMENT_COLUMN: &str = "Start Placement";
pub const ENTRY_TIER_COLUMN: &str = "Tier";
pub const ENTRY_EARNINGS_COLUMN: &str = "Earnings";
pub const ENTRY_TEAM_COLUMN: &str = "Team";
pub const TOP_EARNER_LABEL_COLUMN: &str = "Player ID";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Picks the format from the file extension.
    pub fn detect(path: &Path) -> ChartResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ChartError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Tabular records plus the column names in header order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    fn require_column(&self, name: &str) -> ChartResult<()> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(ChartError::MissingColumn(name.to_owned()))
        }
    }
}

fn read_file(path: &Path) -> ChartResult<String> {
    fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: PathBuf::from(path),
        source,
    })
}

/// Reads `path` as CSV (with a header row) or JSON (array of objects).
pub fn load(path: impl AsRef<Path>) -> ChartResult<Dataset> {
    let path = path.as_ref();
    let format = DataFormat::detect(path)?;
    let raw = read_file(path)?;
    let dataset = match format {
        DataFormat::Csv => parse_csv_str(&raw)?,
        DataFormat::Json => parse_json_str(&raw)?,
    };
    debug!(
        path = %path.display(),
        ?format,
        rows = dataset.len(),
        columns = dataset.columns.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Reads a CSV file as raw rows, header included.
pub fn load_rows(path: impl AsRef<Path>) -> ChartResult<Vec<Vec<String>>> {
    let path = path.as_ref();
    let raw = read_file(path)?;
    parse_csv_rows_str(&raw)
}

pub fn parse_csv_str(input: &str) -> ChartResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), row.get(i).unwrap_or_default().to_owned()))
            .collect();
        records.push(record);
    }

    Ok(Dataset { columns, records })
}

pub fn parse_csv_rows_str(input: &str) -> ChartResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    for row in reader.records() {
        rows.push(row?.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

/// Parses a JSON array of flat objects. Scalars become their text form and
/// `null` becomes an empty cell.
pub fn parse_json_str(input: &str) -> ChartResult<Dataset> {
    let rows: Vec<IndexMap<String, Value>> = serde_json::from_str(input)?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let mut record = Record::with_capacity(row.len());
        for (column, value) in row {
            let cell = match value {
                Value::Null => String::new(),
                Value::String(text) => text,
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ChartError::InvalidData(format!(
                        "row {index}: column `{column}` is not a scalar"
                    )));
                }
            };
            if !columns.contains(&column) {
                columns.push(column.clone());
            }
            record.insert(column, cell);
        }
        records.push(record);
    }

    Ok(Dataset { columns, records })
}

fn cell<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map_or("", |value| value.trim())
}

/// Numeric cell as an integer place; blanks and junk become 0.
fn coerce_u32(raw: &str) -> u32 {
    raw.parse::<u32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| value as u32)
        })
        .unwrap_or(0)
}

/// Numeric cell as a decimal amount; blanks and junk become 0.
fn coerce_decimal(raw: &str) -> Decimal {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

pub fn parse_tournament_entries(dataset: &Dataset) -> ChartResult<Vec<TournamentEntry>> {
    for column in [ENTRY_ID_COLUMN, ENTRY_TOURNAMENT_COLUMN, ENTRY_DATE_COLUMN] {
        dataset.require_column(column)?;
    }

    dataset
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| -> ChartResult<TournamentEntry> {
            let raw_date = cell(record, ENTRY_DATE_COLUMN);
            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|err| {
                ChartError::InvalidData(format!("row {index}: invalid date `{raw_date}`: {err}"))
            })?;

            Ok(TournamentEntry {
                player_id: cell(record, ENTRY_ID_COLUMN).to_owned(),
                tournament_name: cell(record, ENTRY_TOURNAMENT_COLUMN).to_owned(),
                date,
                placement: cell(record, ENTRY_PLACEMENT_COLUMN).to_owned(),
                start_placement: coerce_u32(cell(record, ENTRY_START_PLACEMENT_COLUMN)),
                tier: Tier::parse(cell(record, ENTRY_TIER_COLUMN)),
                earnings: coerce_decimal(cell(record, ENTRY_EARNINGS_COLUMN)),
                team: cell(record, ENTRY_TEAM_COLUMN).to_owned(),
            })
        })
        .collect()
}

pub fn parse_top_earners(dataset: &Dataset) -> ChartResult<TopEarnerTable> {
    dataset.require_column(TOP_EARNER_LABEL_COLUMN)?;

    let keys: Vec<String> = dataset
        .columns
        .iter()
        .filter(|column| column.as_str() != TOP_EARNER_LABEL_COLUMN)
        .cloned()
        .collect();

    let rows = dataset
        .records
        .iter()
        .map(|record| TopEarnerRow {
            player_id: cell(record, TOP_EARNER_LABEL_COLUMN).to_owned(),
            values: keys
                .iter()
                .map(|key| (key.clone(), coerce_decimal(cell(record, key))))
                .collect(),
        })
        .collect::<Vec<_>>();

    if rows.is_empty() {
        warn!("top earners table has no rows");
    }

    Ok(TopEarnerTable { keys, rows })
}

pub fn load_tournament_entries(path: impl AsRef<Path>) -> ChartResult<Vec<TournamentEntry>> {
    parse_tournament_entries(&load(path)?)
}

pub fn load_top_earners(path: impl AsRef<Path>) -> ChartResult<TopEarnerTable> {
    parse_top_earners(&load(path)?)
}
