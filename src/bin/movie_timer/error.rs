use std::num::ParseIntError;
use std::path::PathBuf;

/// Failure to load a movie file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BackendError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Reason a single CSV row was rejected.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RecordError {
    #[error("expected 8 fields, found {found}")]
    FieldCount { found: usize },
    #[error("invalid {field} `{value}`")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
