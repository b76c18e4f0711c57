use std::{fmt::Display, num::ParseIntError};

use crate::sql::types::DataType;

/// Custom Result type for PrimitiveDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PrimitiveDB
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed command text
    Parse(String),
    /// First word of the command is not a known command
    UnknownCommand(String),
    /// Command is well-formed but does not fit the schema or data
    Validation(ValidationError),
    /// Reading or writing persisted state failed
    Storage(String),
}

/// Reasons a table operation is rejected. The state is never modified when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidTableName(String),
    TableExists(String),
    TableNotFound(String),
    /// A `name:type` declaration that cannot be turned into a column
    InvalidColumnSpec(String),
    ColumnNotFound {
        table: String,
        column: String,
    },
    TypeMismatch {
        column: String,
        /// 1-based position of the value in an insert
        position: Option<usize>,
        expected: DataType,
        found: DataType,
    },
    ValueCount {
        expected: usize,
        found: usize,
    },
    ImmutableColumn(String),
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::Validation(value)
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "syntax error: {}", err),
            Error::UnknownCommand(cmd) => write!(f, "unknown command \"{}\", try \"help\"", cmd),
            Error::Validation(err) => write!(f, "{}", err),
            Error::Storage(err) => write!(f, "storage error: {}", err),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidTableName(name) => {
                write!(f, "invalid table name \"{}\"", name)
            }
            ValidationError::TableExists(name) => write!(f, "table \"{}\" already exists", name),
            ValidationError::TableNotFound(name) => write!(f, "table \"{}\" does not exist", name),
            ValidationError::InvalidColumnSpec(spec) => {
                write!(f, "invalid column \"{}\", expected name:int|str|bool", spec)
            }
            ValidationError::ColumnNotFound { table, column } => {
                write!(f, "column \"{}\" not found in table \"{}\"", column, table)
            }
            ValidationError::TypeMismatch {
                column,
                position: Some(pos),
                expected,
                found,
            } => write!(
                f,
                "wrong type for column \"{}\" ({}): expected {}, got {}",
                column, pos, expected, found
            ),
            ValidationError::TypeMismatch {
                column,
                position: None,
                expected,
                found,
            } => write!(
                f,
                "wrong type for column \"{}\": expected {}, got {}",
                column, expected, found
            ),
            ValidationError::ValueCount { expected, found } => {
                write!(f, "expected {} values, got {}", expected, found)
            }
            ValidationError::ImmutableColumn(column) => {
                write!(f, "column \"{}\" cannot be updated", column)
            }
        }
    }
}
