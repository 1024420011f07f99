//! Column label codec
//!
//! Spreadsheet columns are labelled with a bijective base-26 encoding:
//! `A`=1 … `Z`=26, `AA`=27 … `ZZ`=702, `AAA`=703, with no upper bound on
//! the label length. Index 0 has no natural label; it is represented by the
//! empty label `""`, which is what an empty sheet reports as its widest column.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Convert a 1-based column index to its letter label (1 = A, 27 = AA).
///
/// Index 0 yields the empty label.
///
/// # Examples
/// ```
/// use sheet_exporter_core::column::index_to_label;
///
/// assert_eq!(index_to_label(26), "Z");
/// assert_eq!(index_to_label(27), "AA");
/// assert_eq!(index_to_label(703), "AAA");
/// ```
pub fn index_to_label(index: u64) -> String {
    let mut letters = Vec::new();
    let mut n = index;

    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }

    letters.iter().rev().collect()
}

/// Convert a letter label back to its 1-based column index (A = 1, AA = 27).
///
/// Letters are case-insensitive. The empty label maps to 0.
pub fn label_to_index(label: &str) -> Result<u64> {
    let mut index: u64 = 0;

    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumnLabel {
                label: label.to_string(),
                reason: "only the letters A-Z are allowed",
            });
        }
        let digit = u64::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| Error::InvalidColumnLabel {
                label: label.to_string(),
                reason: "label is too long",
            })?;
    }

    Ok(index)
}

/// Compare two labels by the column they denote, so `Z` < `AA`.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(label_to_index(a)?.cmp(&label_to_index(b)?))
}

/// Label of the column right after `label`.
pub fn next(label: &str) -> Result<String> {
    Ok(index_to_label(label_to_index(label)?.saturating_add(1)))
}

/// A column label, stored as its 1-based index.
///
/// Ordering is numeric, which matches spreadsheet ordering across label
/// lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnLabel(u64);

impl ColumnLabel {
    /// The empty label (index 0)
    pub const EMPTY: ColumnLabel = ColumnLabel(0);

    /// Column `A`
    pub const FIRST: ColumnLabel = ColumnLabel(1);

    /// Create a label from a 1-based index (0 gives [`ColumnLabel::EMPTY`])
    pub fn from_index(index: u64) -> Self {
        ColumnLabel(index)
    }

    /// Parse a label such as `"AB"`
    pub fn parse(label: &str) -> Result<Self> {
        label_to_index(label.trim()).map(ColumnLabel)
    }

    /// The 1-based index of this label
    pub fn index(self) -> u64 {
        self.0
    }

    /// Whether this is the empty label
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The following column
    #[must_use]
    pub fn next(self) -> Self {
        ColumnLabel(self.0.saturating_add(1))
    }

    /// 0-based worksheet column, if the label addresses a real column
    /// within the worksheet limit.
    pub fn to_column_index(self) -> Option<u16> {
        if self.0 == 0 || self.0 > u64::from(MAX_COLS) {
            None
        } else {
            Some((self.0 - 1) as u16)
        }
    }

    /// Label for a 0-based worksheet column
    pub fn from_column_index(col: u16) -> Self {
        ColumnLabel(u64::from(col) + 1)
    }

    /// Every label from `self` up to and including `end`, in order.
    ///
    /// Empty when `end` precedes `self`. The empty label is never yielded.
    pub fn range_inclusive(self, end: ColumnLabel) -> impl Iterator<Item = ColumnLabel> {
        (self.0.max(1)..=end.0).map(ColumnLabel)
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", index_to_label(self.0))
    }
}

impl FromStr for ColumnLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
