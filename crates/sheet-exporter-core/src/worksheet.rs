//! Worksheet: a named, sparse grid of cell values

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// One sheet of a [`crate::Workbook`]
///
/// Only non-empty cells are stored. Keys order row-major, so iteration
/// yields cells in the order the file writers need.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<CellAddress, CellValue>,
    /// Custom widths in characters, keyed by 0-based column
    column_widths: BTreeMap<u16, f64>,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name without validation; use
    /// [`crate::Workbook::rename_worksheet`] for checked renames.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Value at an A1-style address, [`CellValue::Empty`] when unset
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let address = CellAddress::parse(address)?;
        Ok(self.get_value_at(address.row, address.col))
    }

    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.value_ref_at(row, col).cloned().unwrap_or_default()
    }

    pub fn value_ref_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&CellAddress::new(row, col))
    }

    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let address = CellAddress::parse(address)?;
        self.put(address, value.into());
        Ok(())
    }

    /// Store a value at 0-based coordinates. Storing
    /// [`CellValue::Empty`] clears the cell.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_bounds(u64::from(row), u64::from(col))?;
        self.put(CellAddress::new(row, col), value.into());
        Ok(())
    }

    /// Copy a block of rows into the sheet with its top-left corner at
    /// `origin`.
    ///
    /// Rows may be ragged. Empty entries leave the target cell untouched.
    /// Nothing is written unless the whole block fits the sheet.
    pub fn load_rows(&mut self, origin: CellAddress, rows: &[Vec<CellValue>]) -> Result<()> {
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        if widest == 0 {
            return Ok(());
        }

        check_bounds(
            u64::from(origin.row) + rows.len() as u64 - 1,
            u64::from(origin.col) + widest as u64 - 1,
        )?;

        for (row, values) in (origin.row..).zip(rows) {
            for (col, value) in (origin.col..).zip(values) {
                if !value.is_empty() {
                    self.cells.insert(CellAddress::new(row, col), value.clone());
                }
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Bounding box of the non-empty cells
    pub fn used_range(&self) -> Option<CellRange> {
        let first = self.cells.keys().next()?;
        let last = self.cells.keys().next_back()?;
        let (min_col, max_col) = self
            .cells
            .keys()
            .fold((u16::MAX, 0), |(lo, hi), a| (lo.min(a.col), hi.max(a.col)));
        Some(CellRange::from_indices(first.row, min_col, last.row, max_col))
    }

    /// Block from `A1` to the bottom-right used cell; this is what gets
    /// serialized. `None` for an empty sheet.
    pub fn data_range(&self) -> Option<CellRange> {
        self.used_range()
            .map(|used| CellRange::from_indices(0, 0, used.end.row, used.end.col))
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Set the width of a 0-based column, in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        check_bounds(0, u64::from(col))?;
        self.column_widths.insert(col, width);
        Ok(())
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-empty cells as `(row, col, value)`, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells
            .iter()
            .map(|(address, value)| (address.row, address.col, value))
    }

    /// Dense copy of [`Self::data_range`], one `Vec` per row
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        let Some(range) = self.data_range() else {
            return Vec::new();
        };
        range
            .rows()
            .map(|row| {
                range
                    .columns()
                    .map(|col| self.get_value_at(row, col))
                    .collect()
            })
            .collect()
    }

    fn put(&mut self, address: CellAddress, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&address);
        } else {
            self.cells.insert(address, value);
        }
    }
}

/// Check 0-based coordinates against the worksheet limits
fn check_bounds(last_row: u64, last_col: u64) -> Result<()> {
    if last_row >= u64::from(MAX_ROWS) {
        return Err(Error::row_out_of_bounds(last_row + 1));
    }
    if last_col >= u64::from(MAX_COLS) {
        return Err(Error::column_out_of_bounds(last_col + 1));
    }
    Ok(())
}
