//! Sheet view: one worksheet paired with its cursor

use sheet_exporter_core::{CellAddress, CellValue, ColumnLabel, Error, Worksheet, MAX_COLS};

use crate::binder::ValueBinder;
use crate::cursor::Cursor;
use crate::error::ExportResult;

/// A mutable view of one worksheet and its write cursor.
///
/// Views borrow the exporter's document, so they cannot outlive a
/// disconnecting generation.
#[derive(Debug)]
pub struct Sheet<'a> {
    index: usize,
    cursor: &'a mut Cursor,
    worksheet: &'a mut Worksheet,
}

impl<'a> Sheet<'a> {
    /// Pair a worksheet with its cursor
    pub fn new(index: usize, cursor: &'a mut Cursor, worksheet: &'a mut Worksheet) -> Self {
        Self {
            index,
            cursor,
            worksheet,
        }
    }

    /// Index of the sheet in the document
    pub fn index(&self) -> usize {
        self.index
    }

    /// Write a row of values at the cursor.
    ///
    /// Values fill consecutive columns. With `finalize` the cursor moves to
    /// column `A` of the next row; without it the cursor stays on the last
    /// written cell and the next call continues the same row after it.
    ///
    /// ```
    /// use sheet_exporter::{Cursor, Sheet, Worksheet};
    ///
    /// let mut cursor = Cursor::new();
    /// let mut worksheet = Worksheet::new("Data");
    /// let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);
    ///
    /// sheet.write_row(["a", "b"], false).unwrap();
    /// sheet.write_row(["c"], true).unwrap();
    /// assert_eq!(sheet.max_column().to_string(), "C");
    /// assert_eq!(sheet.current_row(), 2);
    /// ```
    pub fn write_row<I, V>(&mut self, values: I, finalize: bool) -> ExportResult<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut advance = self.cursor.is_on_written_cell();

        for value in values {
            let column = if advance {
                self.cursor.current_column().next()
            } else {
                self.cursor.current_column()
            };
            let address = cell_address(column, self.cursor.current_row())?;
            self.worksheet
                .set_cell_value_at(address.row, address.col, value)?;

            if advance {
                self.cursor.advance_column();
            }
            self.cursor.mark_written();
            advance = true;
        }

        if finalize {
            self.cursor.advance_row(true);
        }

        Ok(self)
    }

    /// Load a 2-D array starting at `A1` in one pass.
    ///
    /// Values go through `binder` first. Afterwards the bounds are stamped
    /// from the array shape (`max_row` = row count, `max_column` = longest
    /// row) and the cursor sits on column `A` below the data. An empty
    /// array leaves `max_row` at 0 and `max_column` at the empty label.
    pub fn write_data(
        &mut self,
        rows: &[Vec<CellValue>],
        binder: ValueBinder,
    ) -> ExportResult<&mut Self> {
        let bound: Vec<Vec<CellValue>> = rows
            .iter()
            .map(|row| row.iter().cloned().map(|value| binder.bind(value)).collect())
            .collect();
        self.worksheet.load_rows(CellAddress::new(0, 0), &bound)?;

        let row_count = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);

        self.cursor.set_max_row(row_count);
        self.cursor.set_max_column(ColumnLabel::from_index(widest as u64));
        self.cursor
            .set_position(ColumnLabel::FIRST, row_count.saturating_add(1));

        Ok(self)
    }

    /// Last used row; one less when `offset_by_one` (never below 0)
    pub fn max_row(&self, offset_by_one: bool) -> u32 {
        if offset_by_one {
            self.cursor.max_row().saturating_sub(1)
        } else {
            self.cursor.max_row()
        }
    }

    /// Widest used column
    pub fn max_column(&self) -> ColumnLabel {
        self.cursor.max_column()
    }

    pub fn current_column(&self) -> ColumnLabel {
        self.cursor.current_column()
    }

    pub fn current_row(&self) -> u32 {
        self.cursor.current_row()
    }

    pub fn cursor(&self) -> &Cursor {
        &*self.cursor
    }

    /// Every column label from `A` through [`Sheet::max_column`]
    pub fn used_columns(&self) -> Vec<ColumnLabel> {
        ColumnLabel::FIRST
            .range_inclusive(self.cursor.max_column())
            .collect()
    }

    /// Move the cursor back to `A1`, optionally resetting the bounds too
    pub fn reset_coordinates(&mut self, reset_bounds: bool) -> &mut Self {
        self.cursor.reset(reset_bounds);
        self
    }

    pub fn worksheet(&self) -> &Worksheet {
        &*self.worksheet
    }

    pub fn worksheet_mut(&mut self) -> &mut Worksheet {
        self.worksheet
    }
}

/// Worksheet address of a cursor coordinate
fn cell_address(column: ColumnLabel, row: u32) -> ExportResult<CellAddress> {
    let col = column.to_column_index().ok_or(Error::ColumnOutOfBounds {
        column: column.index(),
        max: MAX_COLS,
    })?;
    Ok(CellAddress::new(row.saturating_sub(1), col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label(s: &str) -> ColumnLabel {
        ColumnLabel::parse(s).unwrap()
    }

    fn values(worksheet: &Worksheet, addresses: &[&str]) -> Vec<String> {
        addresses
            .iter()
            .map(|a| worksheet.get_value(a).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_write_rows() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        sheet.write_row(["a", "b", "c"], true).unwrap();
        sheet.write_row(["d", "e"], true).unwrap();

        assert_eq!(sheet.max_column(), label("C"));
        assert_eq!(sheet.max_row(false), 2);
        assert_eq!(sheet.max_row(true), 1);
        assert_eq!(sheet.current_column(), ColumnLabel::FIRST);
        assert_eq!(sheet.current_row(), 3);
        assert_eq!(
            values(sheet.worksheet(), &["A1", "B1", "C1", "A2", "B2", "C2"]),
            vec!["a", "b", "c", "d", "e", ""]
        );
    }

    #[test]
    fn test_unfinished_row_continues() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        sheet.write_row(["a", "b", "c"], false).unwrap();
        assert_eq!(sheet.current_column(), label("C"));
        assert_eq!(sheet.current_row(), 1);

        sheet.write_row(["d"], true).unwrap();
        assert_eq!(
            values(sheet.worksheet(), &["A1", "B1", "C1", "D1"]),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(sheet.max_column(), label("D"));
        assert_eq!(sheet.current_row(), 2);
    }

    #[test]
    fn test_empty_row() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        sheet.write_row(Vec::<CellValue>::new(), true).unwrap();
        assert_eq!(sheet.current_row(), 2);
        assert_eq!(sheet.max_row(false), 1);
        assert_eq!(sheet.max_column(), ColumnLabel::FIRST);
        assert!(sheet.worksheet().is_empty());

        sheet.write_row(["x"], true).unwrap();
        assert_eq!(sheet.worksheet().get_value("A2").unwrap(), CellValue::from("x"));
        assert_eq!(sheet.max_row(false), 2);
    }

    #[test]
    fn test_bounds_are_monotonic() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        let rows: Vec<Vec<i32>> = vec![vec![1, 2, 3, 4], vec![5], vec![], vec![6, 7]];
        let mut last = (sheet.max_column(), sheet.max_row(false));
        for row in rows {
            sheet.write_row(row, true).unwrap();
            let now = (sheet.max_column(), sheet.max_row(false));
            assert!(now.0 >= last.0 && now.1 >= last.1);
            last = now;
        }
        assert_eq!(last, (label("D"), 4));
    }

    #[test]
    fn test_row_past_last_column_fails() {
        let mut cursor = Cursor::new();
        cursor.set_position(ColumnLabel::from_index(u64::from(MAX_COLS)), 1);
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        sheet.write_row(["last"], false).unwrap();
        assert!(sheet.write_row(["overflow"], true).is_err());
        assert_eq!(sheet.max_column().to_string(), "XFD");
        assert_eq!(sheet.worksheet().cell_count(), 1);
    }

    #[test]
    fn test_write_data() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        let rows = vec![
            vec![CellValue::from("a"), CellValue::from("=1+1")],
            vec![CellValue::from(1), CellValue::Empty, CellValue::from(true)],
        ];
        sheet.write_data(&rows, ValueBinder::Default).unwrap();

        assert_eq!(sheet.max_row(false), 2);
        assert_eq!(sheet.max_column(), label("C"));
        assert_eq!(sheet.current_column(), ColumnLabel::FIRST);
        assert_eq!(sheet.current_row(), 3);
        assert_eq!(
            sheet.worksheet().get_value("B1").unwrap(),
            CellValue::Formula("=1+1".into())
        );
        assert_eq!(sheet.worksheet().get_value("C2").unwrap(), CellValue::Boolean(true));
        assert_eq!(
            sheet.used_columns(),
            vec![label("A"), label("B"), label("C")]
        );
    }

    #[test]
    fn test_write_empty_data() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        sheet.write_data(&[], ValueBinder::Default).unwrap();

        assert_eq!(sheet.max_row(false), 0);
        assert_eq!(sheet.max_row(true), 0);
        assert_eq!(sheet.max_column(), ColumnLabel::EMPTY);
        assert_eq!(sheet.max_column().to_string(), "");
        assert!(sheet.used_columns().is_empty());
    }

    #[test]
    fn test_reset_coordinates() {
        let mut cursor = Cursor::new();
        let mut worksheet = Worksheet::new("Data");
        let mut sheet = Sheet::new(0, &mut cursor, &mut worksheet);

        sheet.write_row(["a", "b"], true).unwrap();
        sheet.reset_coordinates(false);
        assert_eq!(sheet.current_row(), 1);
        assert_eq!(sheet.max_column(), label("B"));

        sheet.reset_coordinates(true);
        assert_eq!(sheet.max_column(), ColumnLabel::FIRST);
        assert_eq!(sheet.max_row(false), 1);
    }
}
