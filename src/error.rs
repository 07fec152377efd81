// src/error.rs

use std::path::PathBuf;

use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

/// Fatal errors. Any of these aborts the run before a recommendation set is produced.
#[derive(Debug, Error)]
pub enum TunerError {
    #[error("log file is empty")]
    EmptyLog,

    #[error("could not find header line containing '{marker}'")]
    MissingHeader { marker: &'static str },

    #[error("unknown axis '{0}', expected Roll, Pitch or Yaw")]
    UnknownAxis(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("statistics over an empty or unordered window: {0}")]
    Statistics(#[from] MinMaxError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Reasons a single data line is dropped. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataLineError {
    #[error("line has {found} fields, header declares {expected}")]
    TooFewFields { found: usize, expected: usize },

    #[error("required column '{0}' is not present in the header")]
    MissingColumn(&'static str),

    #[error("malformed record: {0}")]
    Malformed(String),
}
