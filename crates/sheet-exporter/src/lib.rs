//! # sheet-exporter
//!
//! Build spreadsheet documents row by row, write them as XLSX, CSV or ODS
//! and stream the result to a consumer.
//!
//! - [`Exporter`] - buffers rows per sheet and generates the file
//! - [`Sheet`] and [`Cursor`] - direct row and bulk writes with bounds tracking
//! - [`FormatHook`] - formatting step run before the file is written
//! - [`OutputSink`] - receiver of the streamed file
//!
//! ## Example
//!
//! ```rust
//! use sheet_exporter::prelude::*;
//!
//! let dir = std::env::temp_dir();
//! let mut exporter = Exporter::new(ExporterConfig::new(&dir)).unwrap();
//!
//! exporter.write_row(["name", "qty"], 0).unwrap();
//! exporter.write_row(["apples", "3"], 0).unwrap();
//!
//! let mut sink = BufferSink::new();
//! exporter.output_file(&mut sink, "fruit.csv", "CSV", true).unwrap();
//! assert_eq!(sink.bytes(), b"name,qty\r\napples,3\r\n");
//! ```

pub mod binder;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod exporter;
pub mod format;
pub mod hook;
pub mod output;
pub mod prelude;
pub mod sheet;

pub use binder::ValueBinder;
pub use config::{ExporterConfig, DEFAULT_CHUNK_SIZE};
pub use cursor::Cursor;
pub use document::DocumentState;
pub use error::{ExportError, ExportResult};
pub use exporter::Exporter;
pub use format::{resolve_format_alias, ExportFormat};
pub use hook::{AutoSizeColumns, FormatContext, FormatHook};
pub use output::{BufferSink, HeaderSink, OutputSink, TransferMetadata, WriterSink};
pub use sheet::Sheet;

// Re-export the document model and codec
pub use sheet_exporter_core::column::{self, compare, index_to_label, label_to_index};
pub use sheet_exporter_core::{
    CellAddress, CellRange, CellValue, ColumnLabel, Workbook, Worksheet, MAX_COLS, MAX_ROWS,
};

// Re-export the writers
pub use sheet_exporter_csv::{CsvError, CsvWriteOptions, CsvWriter, LineTerminator};
pub use sheet_exporter_ods::{OdsError, OdsWriter};
pub use sheet_exporter_xlsx::{XlsxError, XlsxWriter};
