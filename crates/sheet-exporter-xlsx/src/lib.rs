//! # sheet-exporter-xlsx
//!
//! XLSX (Office Open XML) writer for sheet-exporter.

pub mod error;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
