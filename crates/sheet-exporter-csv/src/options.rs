//! Settings for CSV output

/// How a worksheet is rendered as delimited text
///
/// The defaults produce RFC 4180 output: comma separated, double-quoted
/// where needed, CRLF line endings.
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field separator byte
    pub delimiter: u8,
    pub quote: u8,
    pub line_terminator: LineTerminator,
    /// Prefix the output with a UTF-8 byte order mark
    pub write_bom: bool,
    /// Sheet to write; `None` writes the workbook's active sheet
    pub sheet_index: Option<usize>,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::CRLF,
            write_bom: false,
            sheet_index: None,
        }
    }
}

impl CsvWriteOptions {
    /// Use a different field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a different line terminator
    #[must_use]
    pub fn with_line_terminator(mut self, line_terminator: LineTerminator) -> Self {
        self.line_terminator = line_terminator;
        self
    }

    /// Enable or disable the UTF-8 byte order mark
    #[must_use]
    pub fn with_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }

    /// Write a specific sheet instead of the active one
    #[must_use]
    pub fn with_sheet_index(mut self, sheet_index: usize) -> Self {
        self.sheet_index = Some(sheet_index);
        self
    }
}

/// Record separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// `\n`
    LF,
    /// `\r\n`
    CRLF,
    /// `\r`
    CR,
}
