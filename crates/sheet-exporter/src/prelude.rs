//! Prelude module - common imports for sheet-exporter users
//!
//! ```rust
//! use sheet_exporter::prelude::*;
//! ```

pub use crate::{
    AutoSizeColumns,
    BufferSink,
    // Cell types
    CellValue,
    ColumnLabel,

    CsvWriteOptions,
    ExportError,
    ExportFormat,
    ExportResult,
    // Main types
    Exporter,
    ExporterConfig,

    FormatContext,
    // Hooks
    FormatHook,
    HeaderSink,
    // Output
    OutputSink,
    Sheet,
    ValueBinder,
    WriterSink,
};
