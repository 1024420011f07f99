//! Error types for the document model

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while addressing or mutating a workbook
///
/// Row and column numbers in messages are 1-based, the way a spreadsheet
/// user would count them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid column label '{label}': {reason}")]
    InvalidColumnLabel { label: String, reason: &'static str },

    #[error("Invalid cell address '{0}'")]
    InvalidAddress(String),

    #[error("Row {row} is beyond the last worksheet row ({max})")]
    RowOutOfBounds { row: u64, max: u32 },

    #[error("Column {column} is beyond the last worksheet column ({max})")]
    ColumnOutOfBounds { column: u64, max: u16 },

    #[error("No worksheet at index {index} (sheet count: {count})")]
    SheetOutOfBounds { index: usize, count: usize },

    #[error("Invalid sheet title '{title}': {reason}")]
    InvalidSheetTitle { title: String, reason: String },

    #[error("A sheet titled '{0}' already exists")]
    DuplicateSheetTitle(String),
}

impl Error {
    pub(crate) fn row_out_of_bounds(row_number: u64) -> Self {
        Error::RowOutOfBounds {
            row: row_number,
            max: crate::MAX_ROWS,
        }
    }

    pub(crate) fn column_out_of_bounds(column_number: u64) -> Self {
        Error::ColumnOutOfBounds {
            column: column_number,
            max: crate::MAX_COLS,
        }
    }
}
