//! # sheet-exporter-core
//!
//! Document model shared by the sheet-exporter writers: a [`Workbook`] of
//! sparse [`Worksheet`]s holding [`CellValue`]s, plus the [`column`] label
//! codec (`A` = 1, `Z` = 26, `AA` = 27, ...).
//!
//! ```rust
//! use sheet_exporter_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value_at(0, 1, CellValue::Number(42.0)).unwrap();
//! assert_eq!(sheet.used_range().unwrap().to_string(), "A1:B1");
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellRange, CellValue};
pub use column::ColumnLabel;
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Rows per worksheet (the XLSX limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per worksheet (`XFD`, the XLSX limit)
pub const MAX_COLS: u16 = 16_384;

/// Longest sheet title, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
