//! A1-style cell addresses and rectangular blocks

use crate::column::ColumnLabel;
use crate::error::{Error, Result};
use crate::MAX_ROWS;
use std::fmt;
use std::str::FromStr;

/// Position of a single cell
///
/// Both coordinates are 0-based, so `A1` is `row: 0, col: 0`. The derived
/// ordering is row-major, which is the order every writer emits cells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Address of `column` on the 1-based `row_number`
    pub fn from_label(column: ColumnLabel, row_number: u32) -> Result<Self> {
        if column.is_empty() || row_number == 0 {
            return Err(Error::InvalidAddress(format!("{}{}", column, row_number)));
        }
        let col = column
            .to_column_index()
            .ok_or_else(|| Error::column_out_of_bounds(column.index()))?;
        if row_number > MAX_ROWS {
            return Err(Error::row_out_of_bounds(u64::from(row_number)));
        }
        Ok(Self::new(row_number - 1, col))
    }

    /// Parse `"B7"`-style notation (letters are case-insensitive)
    ///
    /// ```
    /// use sheet_exporter_core::CellAddress;
    ///
    /// let address = CellAddress::parse("c12").unwrap();
    /// assert_eq!((address.row, address.col), (11, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;
        let (letters, digits) = s.split_at(digits_at);

        let column = ColumnLabel::parse(letters)?;
        let row_number = digits
            .parse::<u64>()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?;
        let row_number =
            u32::try_from(row_number).map_err(|_| Error::row_out_of_bounds(row_number))?;

        Self::from_label(column, row_number)
    }

    pub fn column_label(&self) -> ColumnLabel {
        ColumnLabel::from_column_index(self.col)
    }

    /// 1-based row number as shown in a spreadsheet
    pub fn row_number(&self) -> u32 {
        self.row + 1
    }

    pub fn to_a1_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_label(), self.row_number())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Rectangular block of cells, always stored top-left to bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Block spanned by two opposite corners, in either order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start.row..=self.end.row
    }

    pub fn columns(&self) -> std::ops::RangeInclusive<u16> {
        self.start.col..=self.end.col
    }

    /// `"A1:C4"`, or a single address when the block is one cell
    pub fn to_a1_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse(" ab10 ").unwrap(), CellAddress::new(9, 27));
        assert_eq!(
            CellAddress::parse("XFD1048576").unwrap(),
            CellAddress::new(MAX_ROWS - 1, 16383)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_addresses() {
        for input in ["", "A", "12", "A0", "1A", "A1B", "A-1"] {
            assert!(CellAddress::parse(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            CellAddress::parse("A1048577"),
            Err(Error::RowOutOfBounds { row: 1_048_577, .. })
        ));
        assert!(matches!(
            CellAddress::parse("XFE1"),
            Err(Error::ColumnOutOfBounds { column: 16_385, .. })
        ));
        assert!(CellAddress::parse("A99999999999").is_err());
    }

    #[test]
    fn test_display_uses_column_labels() {
        assert_eq!(CellAddress::new(0, 25).to_string(), "Z1");
        assert_eq!(CellAddress::new(41, 26).to_string(), "AA42");
        assert_eq!(CellAddress::new(2, 702).column_label().to_string(), "AAA");
    }

    #[test]
    fn test_from_label() {
        let column = ColumnLabel::parse("C").unwrap();
        assert_eq!(CellAddress::from_label(column, 2).unwrap().to_string(), "C2");
        assert!(CellAddress::from_label(ColumnLabel::EMPTY, 1).is_err());
        assert!(CellAddress::from_label(ColumnLabel::FIRST, 0).is_err());
    }

    #[test]
    fn test_range_is_normalized() {
        let range = CellRange::from_indices(3, 2, 0, 0);
        assert_eq!(range.to_string(), "A1:C4");
        assert_eq!(range.rows(), 0..=3);
        assert_eq!(range.columns(), 0..=2);

        let single = CellRange::from_indices(2, 2, 2, 2);
        assert_eq!(single.to_a1_string(), "C3");
    }
}
