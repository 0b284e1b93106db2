use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a package CSV.  All of them are fatal for the
/// file being loaded; nothing is partially kept.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV row {row} has {found} fields but the header has {expected}")]
    TooManyFields {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),
}
