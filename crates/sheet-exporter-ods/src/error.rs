//! ODS error types

use thiserror::Error;

/// Result type for ODS operations
pub type OdsResult<T> = std::result::Result<T, OdsError>;

/// Errors that can occur during ODS writing
#[derive(Debug, Error)]
pub enum OdsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The workbook cannot be represented as ODS
    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(String),
}
