//! Export formats and legacy format names

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use sheet_exporter_core::Workbook;
use sheet_exporter_csv::{CsvWriteOptions, CsvWriter};
use sheet_exporter_ods::OdsWriter;
use sheet_exporter_xlsx::XlsxWriter;

use crate::error::{ExportError, ExportResult};

/// Legacy format names and the canonical names they stand for
const FORMAT_ALIASES: &[(&str, &str)] = &[
    ("Excel2007", "Xlsx"),
    ("Excel5", "Xls"),
    ("CSV", "Csv"),
    ("OOCalc", "Ods"),
    ("HTML", "Html"),
    ("PDF", "Pdf"),
];

/// Map a legacy format name to its canonical name.
///
/// Names that are not aliases are returned unchanged.
///
/// ```
/// use sheet_exporter::resolve_format_alias;
///
/// assert_eq!(resolve_format_alias("Excel2007"), "Xlsx");
/// assert_eq!(resolve_format_alias("Ods"), "Ods");
/// ```
pub fn resolve_format_alias(name: &str) -> &str {
    FORMAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| *canonical)
}

/// A file format the exporter can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Office Open XML workbook
    Xlsx,
    /// Comma separated values (one sheet)
    Csv,
    /// OpenDocument spreadsheet
    Ods,
}

impl ExportFormat {
    /// Resolve a format name, accepting legacy aliases and any letter case
    pub fn from_name(name: &str) -> ExportResult<Self> {
        let canonical = resolve_format_alias(name.trim());
        match canonical.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "ods" => Ok(ExportFormat::Ods),
            _ => Err(ExportError::UnsupportedFormat(name.to_string())),
        }
    }

    /// Canonical format name
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "Xlsx",
            ExportFormat::Csv => "Csv",
            ExportFormat::Ods => "Ods",
        }
    }

    /// File extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Ods => "ods",
        }
    }

    /// MIME type announced when the file is streamed
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
            ExportFormat::Ods => "application/vnd.oasis.opendocument.spreadsheet",
        }
    }

    /// Serialize a workbook to `path`
    pub fn write_file(
        self,
        workbook: &Workbook,
        path: &Path,
        csv_options: &CsvWriteOptions,
    ) -> ExportResult<()> {
        match self {
            ExportFormat::Xlsx => XlsxWriter::write_file(workbook, path)?,
            ExportFormat::Csv => CsvWriter::write_file(workbook, path, csv_options)?,
            ExportFormat::Ods => OdsWriter::write_file(workbook, path)?,
        }
        Ok(())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> ExportResult<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_format_alias("Excel2007"), "Xlsx");
        assert_eq!(resolve_format_alias("Excel5"), "Xls");
        assert_eq!(resolve_format_alias("CSV"), "Csv");
        assert_eq!(resolve_format_alias("OOCalc"), "Ods");
        assert_eq!(resolve_format_alias("HTML"), "Html");
        assert_eq!(resolve_format_alias("PDF"), "Pdf");
        assert_eq!(resolve_format_alias("Xlsx"), "Xlsx");
        assert_eq!(resolve_format_alias("Whatever"), "Whatever");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ExportFormat::from_name("Xlsx").unwrap(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_name("xlsx").unwrap(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_name("Excel2007").unwrap(), ExportFormat::Xlsx);
        assert_eq!(ExportFormat::from_name("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_name("OOCalc").unwrap(), ExportFormat::Ods);
        assert_eq!("ods".parse::<ExportFormat>().unwrap(), ExportFormat::Ods);
    }

    #[test]
    fn test_formats_without_writer() {
        for name in ["Excel5", "Xls", "HTML", "PDF", "Mp3", ""] {
            match ExportFormat::from_name(name) {
                Err(ExportError::UnsupportedFormat(reported)) => assert_eq!(reported, name),
                other => panic!("expected UnsupportedFormat for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_format_details() {
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        assert_eq!(
            ExportFormat::Ods.content_type(),
            "application/vnd.oasis.opendocument.spreadsheet"
        );
        assert_eq!(ExportFormat::Ods.to_string(), "Ods");
    }
}
