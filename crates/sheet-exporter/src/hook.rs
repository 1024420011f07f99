//! Formatting hooks run during generation
//!
//! A hook runs after the buffered rows are loaded and before the file is
//! written, with mutable access to every sheet.

use std::collections::BTreeMap;

use sheet_exporter_core::Workbook;

use crate::cursor::Cursor;
use crate::error::{ExportError, ExportResult};
use crate::sheet::Sheet;

/// Sheets handed to a [`FormatHook`]
pub struct FormatContext<'a> {
    workbook: &'a mut Workbook,
    cursors: &'a mut [Cursor],
}

impl<'a> FormatContext<'a> {
    pub(crate) fn new(workbook: &'a mut Workbook, cursors: &'a mut [Cursor]) -> Self {
        Self { workbook, cursors }
    }

    /// Number of sheets in the document
    pub fn sheet_count(&self) -> usize {
        self.cursors.len()
    }

    /// View of one sheet
    pub fn sheet(&mut self, index: usize) -> ExportResult<Sheet<'_>> {
        let count = self.cursors.len();
        let invalid = ExportError::InvalidSheetIndex { index, count };
        let cursor = self.cursors.get_mut(index).ok_or(invalid)?;
        let worksheet = self
            .workbook
            .worksheet_mut(index)
            .ok_or(ExportError::InvalidSheetIndex { index, count })?;
        Ok(Sheet::new(index, cursor, worksheet))
    }
}

/// Formatting step applied to the document before it is written
pub trait FormatHook {
    fn format(&mut self, ctx: &mut FormatContext<'_>) -> ExportResult<()>;
}

impl<F> FormatHook for F
where
    F: FnMut(&mut FormatContext<'_>) -> ExportResult<()>,
{
    fn format(&mut self, ctx: &mut FormatContext<'_>) -> ExportResult<()> {
        self(ctx)
    }
}

/// Size every used column to its longest rendered value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoSizeColumns {
    /// Narrowest width, in characters
    pub min_width: f64,
    /// Widest width, in characters
    pub max_width: f64,
}

impl Default for AutoSizeColumns {
    fn default() -> Self {
        Self {
            min_width: 8.0,
            max_width: 60.0,
        }
    }
}

impl AutoSizeColumns {
    /// Extra characters added to the longest value
    const PADDING: f64 = 2.0;

    fn width_for(&self, chars: usize) -> f64 {
        (chars as f64 + Self::PADDING).clamp(self.min_width, self.max_width)
    }
}

impl FormatHook for AutoSizeColumns {
    fn format(&mut self, ctx: &mut FormatContext<'_>) -> ExportResult<()> {
        for index in 0..ctx.sheet_count() {
            let mut sheet = ctx.sheet(index)?;

            let mut longest: BTreeMap<u16, usize> = BTreeMap::new();
            for (_, col, value) in sheet.worksheet().iter_cells() {
                let len = value.to_string().chars().count();
                let entry = longest.entry(col).or_default();
                *entry = (*entry).max(len);
            }

            for label in sheet.used_columns() {
                let Some(col) = label.to_column_index() else {
                    continue;
                };
                let width = self.width_for(longest.get(&col).copied().unwrap_or(0));
                sheet.worksheet_mut().set_column_width(col, width)?;
            }
        }
        Ok(())
    }
}
