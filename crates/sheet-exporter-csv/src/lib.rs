//! # sheet-exporter-csv
//!
//! CSV writer for sheet-exporter. CSV holds a single sheet, so the writer
//! serializes one worksheet of the workbook (the active one by default).

mod error;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator};
pub use writer::CsvWriter;
