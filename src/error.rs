use std::path::PathBuf;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported data format for `{0}` (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("missing column `{0}`")]
    MissingColumn(String),

    #[error("scroll step {index} is out of range (step count: {len})")]
    UnknownStep { index: usize, len: usize },
}
