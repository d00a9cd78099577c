// src/error.rs

use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures while loading or filtering the program dataset.
///
/// Kept distinct from an empty result so callers can tell "nothing matched"
/// apart from "the file could not be read".
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to open dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse dataset {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {line} has {found} fields, header has {expected}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("column {0:?} not found in dataset")]
    MissingColumn(String),
}
