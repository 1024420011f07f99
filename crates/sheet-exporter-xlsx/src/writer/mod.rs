//! XLSX writer
//!
//! Every part is rendered to a string first and then stored in the ZIP
//! package in one pass.

mod parts;
mod worksheet;

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use sheet_exporter_core::Workbook;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{XlsxError, XlsxResult};

pub(crate) const XML_HEADER: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Writes a [`Workbook`] as an Office Open XML spreadsheet
pub struct XlsxWriter;

impl XlsxWriter {
    /// Create (or truncate) `path` and write the workbook to it
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        Self::write(workbook, &mut out)?;
        out.flush()?;
        Ok(())
    }

    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidWorkbook(
                "an XLSX file needs at least one worksheet".into(),
            ));
        }

        let mut zip = ZipWriter::new(writer);
        for (name, xml) in Self::package(workbook) {
            zip.start_file(name, SimpleFileOptions::default())?;
            zip.write_all(xml.as_bytes())?;
        }
        zip.finish()?;

        log::debug!("wrote XLSX package with {} sheet(s)", workbook.sheet_count());
        Ok(())
    }

    /// Part name and content of every entry, in storage order
    fn package(workbook: &Workbook) -> Vec<(String, String)> {
        let sheet_count = workbook.sheet_count();
        let mut entries = vec![
            ("[Content_Types].xml".to_string(), parts::content_types(sheet_count)),
            ("_rels/.rels".to_string(), parts::root_rels()),
            ("xl/workbook.xml".to_string(), parts::workbook(workbook)),
            (
                "xl/_rels/workbook.xml.rels".to_string(),
                parts::workbook_rels(sheet_count),
            ),
            ("xl/styles.xml".to_string(), parts::styles()),
        ];

        entries.extend(workbook.worksheets().enumerate().map(|(i, sheet)| {
            (
                format!("xl/worksheets/sheet{}.xml", i + 1),
                worksheet::worksheet(sheet, i == workbook.active_sheet()),
            )
        }));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_exporter_core::CellValue;
    use std::io::{Cursor, Read};

    fn write_to_buffer(workbook: &Workbook) -> Vec<u8> {
        let mut buf = Vec::new();
        XlsxWriter::write(workbook, Cursor::new(&mut buf)).unwrap();
        buf
    }

    fn read_part(buf: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_entries() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Second").unwrap();
        let buf = write_to_buffer(&wb);

        let archive = zip::ZipArchive::new(Cursor::new(&buf)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/_rels/workbook.xml.rels",
                "xl/styles.xml",
                "xl/workbook.xml",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
            ]
        );
        assert!(read_part(&buf, "xl/workbook.xml")
            .contains(r#"<sheet name="Second" sheetId="2" r:id="rId2"/>"#));
    }

    #[test]
    fn test_sheet_contents() {
        let mut wb = Workbook::new();
        let sheet = wb.worksheet_mut(0).unwrap();
        sheet.set_cell_value("A1", "Special: <>&").unwrap();
        sheet.set_cell_value("B1", 42.5).unwrap();
        sheet.set_cell_value("C1", true).unwrap();
        sheet.set_cell_value("A2", CellValue::formula("=B1*2")).unwrap();

        let xml = read_part(&write_to_buffer(&wb), "xl/worksheets/sheet1.xml");
        assert!(xml.contains(r#"<dimension ref="A1:C2"/>"#));
        assert!(xml.contains(
            r#"<c r="A1" t="inlineStr"><is><t>Special: &lt;&gt;&amp;</t></is></c>"#
        ));
        assert!(xml.contains(r#"<c r="B1"><v>42.5</v></c>"#));
        assert!(xml.contains(r#"<c r="A2"><f>B1*2</f></c>"#));
        assert!(xml.contains(r#"tabSelected="1""#));
    }

    #[test]
    fn test_active_sheet_and_column_widths() {
        let mut wb = Workbook::new();
        wb.add_worksheet().unwrap();
        wb.set_active_sheet(1).unwrap();
        wb.worksheet_mut(1)
            .unwrap()
            .set_column_width(2, 18.5)
            .unwrap();

        let buf = write_to_buffer(&wb);
        assert!(read_part(&buf, "xl/workbook.xml").contains(r#"activeTab="1""#));
        assert!(!read_part(&buf, "xl/worksheets/sheet1.xml").contains("tabSelected"));

        let second = read_part(&buf, "xl/worksheets/sheet2.xml");
        assert!(second.contains(r#"tabSelected="1""#));
        assert!(second.contains(r#"<col min="3" max="3" width="18.5" customWidth="1"/>"#));
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        let mut buf = Vec::new();
        let result = XlsxWriter::write(&Workbook::empty(), Cursor::new(&mut buf));
        assert!(matches!(result, Err(XlsxError::InvalidWorkbook(_))));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        XlsxWriter::write_file(&Workbook::new(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
