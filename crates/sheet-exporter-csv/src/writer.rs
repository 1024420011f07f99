//! CSV writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::{CsvWriteOptions, LineTerminator};
use sheet_exporter_core::{Workbook, Worksheet};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write one sheet of a workbook to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        workbook: &Workbook,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        Self::write(workbook, &mut out, options)?;
        out.flush()?;
        Ok(())
    }

    /// Write one sheet of a workbook to a writer
    pub fn write<W: Write>(
        workbook: &Workbook,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let index = options.sheet_index.unwrap_or_else(|| workbook.active_sheet());
        let worksheet = workbook
            .worksheet(index)
            .ok_or(CsvError::SheetNotFound {
                index,
                count: workbook.sheet_count(),
            })?;

        if workbook.sheet_count() > 1 {
            log::debug!(
                "CSV holds one sheet; writing '{}' of {} sheets",
                worksheet.name(),
                workbook.sheet_count()
            );
        }

        Self::write_worksheet(worksheet, writer, options)
    }

    /// Write a single worksheet to a writer
    ///
    /// The grid always starts at A1 and extends to the bottom-right used
    /// cell, so leading blank rows and columns are kept.
    pub fn write_worksheet<W: Write>(
        worksheet: &Worksheet,
        mut writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        if options.write_bom {
            writer.write_all(UTF8_BOM)?;
        }

        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(false)
            .from_writer(writer);

        if let Some(range) = worksheet.data_range() {
            for row in range.rows() {
                let record: Vec<String> = range
                    .columns()
                    .map(|col| {
                        worksheet
                            .value_ref_at(row, col)
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    })
                    .collect();

                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
