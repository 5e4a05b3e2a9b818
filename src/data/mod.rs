//! Dataset loading: CSV/JSON files into typed tournament records.

pub mod loader;

pub use loader::{
    DataFormat, Dataset, Record, load, load_rows, load_top_earners, load_tournament_entries,
    parse_csv_rows_str, parse_csv_str, parse_json_str, parse_top_earners,
    parse_tournament_entries,
};
