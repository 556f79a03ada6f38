use std::io;

use thiserror::Error;

/// Failures surfaced by the conversion pipeline.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input is empty: no title row found")]
    EmptyInput,
    #[error("table has a title row but no data rows to infer column types from")]
    EmptyTable,
    #[error("separator must not be empty")]
    EmptySeparator,
    #[error("line {line}: expected {expected} field(s) to match the title row, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{found} column type(s) given for {expected} column(s)")]
    ColumnTypeCount { expected: usize, found: usize },
    #[error("reading delimited input")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
