//! Errors raised while loading or validating data tables.
//!
//! Everything past the configuration boundary is either a programmer
//! precondition (asserted) or an intentional no-op, so this is the only
//! recoverable error type in the workspace.

use std::fmt;

#[derive(Debug)]
pub enum TableError {
    /// The table file could not be read.
    Io(std::io::Error),
    /// The table file is not valid JSON for `DataTables`.
    Parse(serde_json::Error),
    /// A table has fewer rows than its type enumeration has variants.
    MissingRows {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    /// A row holds values the simulation cannot use.
    InvalidRow {
        table: &'static str,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "failed to read data tables: {e}"),
            TableError::Parse(e) => write!(f, "failed to parse data tables: {e}"),
            TableError::MissingRows {
                table,
                expected,
                found,
            } => write!(f, "{table} table has {found} rows, expected {expected}"),
            TableError::InvalidRow {
                table,
                index,
                reason,
            } => write!(f, "{table} table row {index}: {reason}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(e) => Some(e),
            TableError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        TableError::Io(e)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::Parse(e)
    }
}
