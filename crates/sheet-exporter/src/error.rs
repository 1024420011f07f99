//! Error types for the exporter

use std::io;

use sheet_exporter_csv::CsvError;
use sheet_exporter_ods::OdsError;
use sheet_exporter_xlsx::XlsxError;
use thiserror::Error;

/// Result type for exporter operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors raised while building, generating or streaming a document
#[derive(Debug, Error)]
pub enum ExportError {
    /// The sheet index was never created
    #[error("No sheet with index {index} defined (sheet count: {count})")]
    InvalidSheetIndex { index: usize, count: usize },

    /// The document was released by a disconnecting generation
    #[error("Cannot {operation}: the document was disconnected after generation")]
    Disconnected { operation: &'static str },

    /// No writer exists for the requested format
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// XLSX serialization failed
    #[error("XLSX export failed: {0}")]
    Xlsx(#[from] XlsxError),

    /// CSV serialization failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] CsvError),

    /// ODS serialization failed
    #[error("ODS export failed: {0}")]
    Ods(#[from] OdsError),

    /// Document model error (limits, sheet names)
    #[error(transparent)]
    Core(#[from] sheet_exporter_core::Error),

    /// Reading the generated artifact failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The output sink rejected metadata or a chunk
    #[error("Output error: {0}")]
    Output(#[source] io::Error),
}

impl ExportError {
    /// Whether the failure happened while producing the file
    pub fn is_serialization_failure(&self) -> bool {
        matches!(
            self,
            ExportError::UnsupportedFormat(_)
                | ExportError::Xlsx(_)
                | ExportError::Csv(_)
                | ExportError::Ods(_)
        )
    }
}
