//! Workbook: the ordered list of worksheets being exported

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Characters a sheet title may not contain
const FORBIDDEN_TITLE_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Spreadsheet document
///
/// Sheets can be appended but never removed, so an index stays valid for
/// the life of the workbook. Titles are unique ignoring case.
#[derive(Debug)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    active_sheet: usize,
}

impl Workbook {
    /// Workbook holding a single sheet titled `Sheet1`
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            active_sheet: 0,
        }
    }

    /// Workbook with no sheets; the writers refuse to serialize it
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            active_sheet: 0,
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Index of the sheet with this title, compared case-insensitively
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.worksheets
            .iter()
            .position(|sheet| same_title(sheet.name(), title))
    }

    /// Append a sheet titled `SheetN`, using the first free `N` starting
    /// at the new sheet's 1-based position
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let title = (self.worksheets.len() + 1..)
            .map(|n| format!("Sheet{}", n))
            .find(|title| self.index_of(title).is_none())
            .unwrap_or_default();
        self.add_worksheet_with_name(&title)
    }

    /// Append a sheet with an explicit title and return its index
    pub fn add_worksheet_with_name(&mut self, title: &str) -> Result<usize> {
        check_title(title)?;
        if self.index_of(title).is_some() {
            return Err(Error::DuplicateSheetTitle(title.to_string()));
        }
        self.worksheets.push(Worksheet::new(title));
        Ok(self.worksheets.len() - 1)
    }

    /// Retitle a sheet; giving a sheet its own title in another case is allowed
    pub fn rename_worksheet(&mut self, index: usize, title: &str) -> Result<()> {
        self.check_index(index)?;
        check_title(title)?;
        match self.index_of(title) {
            Some(other) if other != index => {
                Err(Error::DuplicateSheetTitle(title.to_string()))
            }
            _ => {
                self.worksheets[index].set_name(title);
                Ok(())
            }
        }
    }

    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    /// Select the sheet a spreadsheet application opens on
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active_sheet = index;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.worksheets.len() {
            Ok(())
        } else {
            Err(Error::SheetOutOfBounds {
                index,
                count: self.worksheets.len(),
            })
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn check_title(title: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidSheetTitle {
        title: title.to_string(),
        reason,
    };

    if title.trim().is_empty() {
        return Err(invalid("title is blank".into()));
    }
    if title.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(invalid(format!(
            "longer than {} characters",
            MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = title.chars().find(|c| FORBIDDEN_TITLE_CHARS.contains(c)) {
        return Err(invalid(format!("contains '{}'", c)));
    }
    Ok(())
}
