//! # sheet-exporter-ods
//!
//! OpenDocument spreadsheet (ODS) writer for sheet-exporter.
//!
//! The package holds the `mimetype` marker, a manifest and a single
//! `content.xml` with one `table:table` per worksheet.

pub mod error;
pub mod writer;

pub use error::{OdsError, OdsResult};
pub use writer::OdsWriter;
