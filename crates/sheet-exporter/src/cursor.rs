//! Grid cursor and bounding-box tracker

use sheet_exporter_core::ColumnLabel;

/// Write position of a sheet plus the bounding box of the cells written so far.
///
/// Rows are 1-based. A fresh cursor sits on `A1` and reports `A1` as its
/// bounds. The bounds only grow while writing; [`Cursor::reset`] with
/// `reset_bounds` and the bulk setters are the only ways to shrink them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    current_column: ColumnLabel,
    current_row: u32,
    max_column: ColumnLabel,
    max_row: u32,
    /// The current coordinate already holds a value from an unfinished row
    on_written_cell: bool,
}

impl Cursor {
    /// Create a cursor at `A1`
    pub fn new() -> Self {
        Self {
            current_column: ColumnLabel::FIRST,
            current_row: 1,
            max_column: ColumnLabel::FIRST,
            max_row: 1,
            on_written_cell: false,
        }
    }

    /// Move back to `A1`, optionally resetting the bounds to `A1` as well
    pub fn reset(&mut self, reset_bounds: bool) {
        self.current_column = ColumnLabel::FIRST;
        self.current_row = 1;
        self.on_written_cell = false;
        if reset_bounds {
            self.max_column = ColumnLabel::FIRST;
            self.max_row = 1;
        }
    }

    /// Step one column to the right
    pub fn advance_column(&mut self) {
        self.current_column = self.current_column.next();
        self.max_column = self.max_column.max(self.current_column);
        self.on_written_cell = false;
    }

    /// Step one row down, optionally returning to column `A`
    pub fn advance_row(&mut self, reset_column: bool) {
        self.current_row = self.current_row.saturating_add(1);
        if reset_column {
            self.current_column = ColumnLabel::FIRST;
        }
        self.on_written_cell = false;
    }

    /// Record that the current coordinate now holds a value
    pub fn mark_written(&mut self) {
        self.max_column = self.max_column.max(self.current_column);
        self.max_row = self.max_row.max(self.current_row);
        self.on_written_cell = true;
    }

    /// Stamp the row bound directly
    pub fn set_max_row(&mut self, max_row: u32) {
        self.max_row = max_row;
    }

    /// Stamp the column bound directly
    pub fn set_max_column(&mut self, max_column: ColumnLabel) {
        self.max_column = max_column;
    }

    /// Jump to a coordinate without touching the bounds
    pub fn set_position(&mut self, column: ColumnLabel, row: u32) {
        self.current_column = column;
        self.current_row = row;
        self.on_written_cell = false;
    }

    pub fn current_column(&self) -> ColumnLabel {
        self.current_column
    }

    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    pub fn max_column(&self) -> ColumnLabel {
        self.max_column
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Whether the next value of an unfinished row goes one column further
    pub fn is_on_written_cell(&self) -> bool {
        self.on_written_cell
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}
