use std::fmt;
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use crate::error::{ConvertError, Result};
use crate::table_parser::Table;

const INTEGER_SQL: &str = "INTEGER";
const DECIMAL_SQL: &str = "DECIMAL(6,6)";
const TEXT_SQL: &str = "VARCHAR(30)";

/// the sql type assigned to a column, ordered from strictest to most general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnType {
    Integer,
    Decimal,
    Text,
}

impl ColumnType {
    /// the fixed-width sql type name used in `create table`.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer => INTEGER_SQL,
            ColumnType::Decimal => DECIMAL_SQL,
            ColumnType::Text => TEXT_SQL,
        }
    }

    /// whether values of this type are rendered as quoted literals.
    pub fn is_quoted(self) -> bool {
        matches!(self, ColumnType::Text)
    }

    /// the narrowest type able to hold values of both `self` and `other`.
    pub fn widen(self, other: ColumnType) -> ColumnType {
        self.max(other)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sql type '{0}'")]
pub struct UnknownSqlType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownSqlType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            INTEGER_SQL => Ok(ColumnType::Integer),
            DECIMAL_SQL => Ok(ColumnType::Decimal),
            TEXT_SQL => Ok(ColumnType::Text),
            other => Err(UnknownSqlType(other.to_string())),
        }
    }
}

/// how many rows are consulted when inferring a column's type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InferenceMode {
    /// classify each column from the first data row only.
    #[default]
    FirstRow,
    /// classify every value and widen integer -> decimal -> text on conflict.
    FullScan,
}

// classifies a single value. integer is tried before decimal so that "42"
// stays an integer; decimals must be finite since nan and inf have no bare
// sql literal.
pub fn infer_column_type(value: &str) -> ColumnType {
    if value.parse::<i32>().is_ok() {
        ColumnType::Integer
    } else if value.parse::<f64>().is_ok_and(f64::is_finite) {
        ColumnType::Decimal
    } else {
        ColumnType::Text
    }
}

/// widest type over all values in a column. an empty column is text.
pub fn infer_column_type_strict(column_data: &[&str]) -> ColumnType {
    let mut values = column_data.iter();
    let Some(first) = values.next() else {
        return ColumnType::Text;
    };

    let mut inferred = infer_column_type(first);
    for value in values {
        if inferred == ColumnType::Text {
            break;
        }
        inferred = inferred.widen(infer_column_type(value));
    }
    inferred
}

/// infers one column type per title from the first data row.
pub fn infer_schema(table: &Table) -> Result<Vec<ColumnType>> {
    infer_schema_with(table, InferenceMode::FirstRow)
}

pub fn infer_schema_with(table: &Table, mode: InferenceMode) -> Result<Vec<ColumnType>> {
    let first_row = table.rows().first().ok_or(ConvertError::EmptyTable)?;

    let inferred: Vec<ColumnType> = match mode {
        InferenceMode::FirstRow => first_row
            .iter()
            .map(|value| infer_column_type(value))
            .collect(),
        InferenceMode::FullScan => (0..table.column_count())
            .into_par_iter()
            .map(|i| infer_column_type_strict(&table.column(i)))
            .collect(),
    };

    debug!("inferred column types ({mode:?}): {inferred:?}");
    Ok(inferred)
}
