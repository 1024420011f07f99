//! End-to-end tests for the exporter (buffer -> generate -> output)

use sheet_exporter::prelude::*;
use std::io::{Cursor as IoCursor, Read};
use std::path::Path;

fn read_zip_part(path: &Path, name: &str) -> String {
    let bytes = std::fs::read(path).unwrap();
    read_zip_part_from(&bytes, name)
}

fn read_zip_part_from(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(IoCursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

/// Two rows on a fresh sheet land in A1:C2
#[test]
fn test_rows_fill_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();

    exporter.write_row(["a", "b", "c"], 0).unwrap();
    exporter.write_row(["d", "e"], 0).unwrap();
    exporter.generate_file("grid.xlsx", "Xlsx", false).unwrap();

    let sheet = exporter.sheet(0).unwrap();
    let worksheet = sheet.worksheet();
    for (address, expected) in [("A1", "a"), ("B1", "b"), ("C1", "c"), ("A2", "d"), ("B2", "e")] {
        assert_eq!(
            worksheet.get_value(address).unwrap(),
            CellValue::from(expected),
            "cell {address}"
        );
    }
    assert_eq!(worksheet.get_value("C2").unwrap(), CellValue::Empty);
    assert_eq!(sheet.max_column().to_string(), "C");
    assert_eq!(sheet.max_row(false), 2);
    assert_eq!(sheet.max_row(true), 1);
}

/// Rows buffered for two sheets end up in their own sheets, and the first
/// sheet is active whatever the write order
#[test]
fn test_two_sheets_first_active() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    exporter.add_sheet(Some("Second")).unwrap();
    exporter.set_active_sheet(1).unwrap();

    exporter.write_row(["y"], 1).unwrap();
    exporter.write_row(["x"], 0).unwrap();
    let (path, _) = exporter.generate_file("two.xlsx", "Xlsx", false).unwrap();

    let workbook = exporter.workbook().unwrap();
    assert_eq!(workbook.active_sheet(), 0);
    assert_eq!(
        workbook.worksheet(0).unwrap().get_value("A1").unwrap(),
        CellValue::from("x")
    );
    assert_eq!(
        workbook.worksheet(1).unwrap().get_value("A1").unwrap(),
        CellValue::from("y")
    );

    assert!(read_zip_part(&path, "xl/workbook.xml").contains(r#"activeTab="0""#));
    assert!(read_zip_part(&path, "xl/worksheets/sheet1.xml").contains("<t>x</t>"));
    assert!(read_zip_part(&path, "xl/worksheets/sheet2.xml").contains("<t>y</t>"));
}

/// Streaming before anything was written still yields a valid, empty file
#[test]
fn test_output_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();

    let mut sink = BufferSink::new();
    let streamed = exporter.output_file(&mut sink, "", "Xlsx", true).unwrap();

    assert!(streamed > 0);
    assert!(exporter.is_generated());
    assert!(exporter.is_disconnected());
    assert_eq!(
        sink.metadata().unwrap().content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let sheet_xml = read_zip_part_from(sink.bytes(), "xl/worksheets/sheet1.xml");
    assert!(sheet_xml.contains("<sheetData>\n    </sheetData>"));
}

#[test]
fn test_regenerate_until_disconnected() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    exporter.write_row([1, 2], 0).unwrap();

    exporter.generate_file("first.csv", "Csv", false).unwrap();
    exporter.write_row([3], 0).unwrap();
    exporter.generate_file("second.csv", "Csv", false).unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("second.csv")).unwrap(),
        "1,2\r\n3,\r\n"
    );

    exporter.generate_file("third.csv", "Csv", true).unwrap();
    assert!(matches!(
        exporter.generate_file("fourth.csv", "Csv", true),
        Err(ExportError::Disconnected { .. })
    ));
    assert!(matches!(
        exporter.write_row(["late"], 0),
        Err(ExportError::Disconnected { .. })
    ));
    assert!(matches!(exporter.sheet(0), Err(ExportError::Disconnected { .. })));
    assert!(matches!(exporter.workbook(), Err(ExportError::Disconnected { .. })));
    assert_eq!(exporter.file_name(), Some("third.csv"));
}

#[test]
fn test_format_aliases() {
    let dir = tempfile::tempdir().unwrap();

    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    exporter.write_row(["legacy"], 0).unwrap();
    let (path, _) = exporter.generate_file("legacy.xlsx", "Excel2007", true).unwrap();
    assert!(read_zip_part(&path, "xl/worksheets/sheet1.xml").contains("<t>legacy</t>"));

    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    exporter.write_row(["calc"], 0).unwrap();
    let (path, _) = exporter.generate_file("calc.ods", "OOCalc", true).unwrap();
    assert!(read_zip_part(&path, "content.xml").contains("<text:p>calc</text:p>"));

    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    for name in ["Excel5", "HTML", "PDF", "Numbers"] {
        let err = exporter.generate_file("x", name, false).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(_)));
        assert!(err.is_serialization_failure());
    }
}

#[test]
fn test_format_hook_runs_before_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    exporter
        .write_rows([["item", "price"], ["pen", "2"], ["notebook", "5"]], 0)
        .unwrap();

    exporter.set_format_hook(|ctx: &mut FormatContext<'_>| -> ExportResult<()> {
        let mut sheet = ctx.sheet(0)?;
        let total_row = sheet.max_row(false) + 1;
        sheet
            .worksheet_mut()
            .set_cell_value_at(total_row - 1, 1, CellValue::formula("=SUM(B2:B3)"))?;
        Ok(())
    });
    let (path, _) = exporter.generate_file("totals.xlsx", "Xlsx", true).unwrap();

    let sheet_xml = read_zip_part(&path, "xl/worksheets/sheet1.xml");
    assert!(sheet_xml.contains(r#"<c r="B4"><f>SUM(B2:B3)</f></c>"#));
}

#[test]
fn test_auto_size_and_advanced_binder() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExporterConfig::new(dir.path()).with_value_binder(ValueBinder::Advanced);
    let mut exporter = Exporter::new(config).unwrap();
    exporter.set_format_hook(AutoSizeColumns::default());

    exporter.write_row(["city", "population", "share"], 0).unwrap();
    exporter.write_row(["Springfield", "30720", "12.5%"], 0).unwrap();
    let (path, _) = exporter.generate_file("cities.xlsx", "Xlsx", true).unwrap();

    let sheet_xml = read_zip_part(&path, "xl/worksheets/sheet1.xml");
    assert!(sheet_xml.contains(r#"<c r="B2"><v>30720</v></c>"#));
    assert!(sheet_xml.contains(r#"<c r="C2"><v>0.125</v></c>"#));
    assert!(sheet_xml.contains(r#"<col min="1" max="1" width="13" customWidth="1"/>"#));
    assert!(sheet_xml.contains(r#"<col min="2" max="2" width="12" customWidth="1"/>"#));
    assert!(sheet_xml.contains(r#"<col min="3" max="3" width="8" customWidth="1"/>"#));
}

#[test]
fn test_header_sink_response() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();
    exporter.write_row(["a", "b"], 0).unwrap();

    let mut sink = HeaderSink::new(Vec::new());
    exporter.output_file(&mut sink, "report.csv", "CSV", true).unwrap();

    let response = String::from_utf8(sink.into_inner()).unwrap();
    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    assert_eq!(body, "a,b\r\n");
    assert!(head.contains("Content-Type: text/csv"));
    assert!(head.contains("Content-Disposition: attachment; filename=report.csv"));
    assert!(head.ends_with("Content-Length: 5"));
}

#[test]
fn test_empty_dataset_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = Exporter::new(ExporterConfig::new(dir.path())).unwrap();

    let mut sheet = exporter.sheet(0).unwrap();
    sheet.write_data(&[], ValueBinder::Default).unwrap();
    assert_eq!(sheet.max_row(false), 0);
    assert_eq!(sheet.max_row(true), 0);
    assert_eq!(sheet.max_column(), ColumnLabel::EMPTY);
    assert!(sheet.used_columns().is_empty());
}
