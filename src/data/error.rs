use std::path::PathBuf;

use thiserror::Error;

/// Load-time failures. Everything here is fatal for the load attempt and
/// surfaced to the user as-is; per-selection lookups never produce errors
/// (they collapse to `IndicatorValue::Unavailable` / empty results instead).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Malformed(String),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column: {0}")]
    MissingColumn(String),
}

impl DataError {
    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Access {
            path: path.into(),
            source,
        }
    }
}
