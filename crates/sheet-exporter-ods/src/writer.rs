//! ODS writer

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use sheet_exporter_core::{CellValue, Workbook, Worksheet};

use crate::error::{OdsError, OdsResult};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// Approximate width of one character in centimetres (default font)
const CM_PER_CHAR: f64 = 0.2;

/// ODS file writer
pub struct OdsWriter;

impl OdsWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> OdsResult<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        Self::write(workbook, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> OdsResult<()> {
        if workbook.is_empty() {
            return Err(OdsError::InvalidWorkbook(
                "an ODS file needs at least one table".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);

        // Readers sniff the package type from an uncompressed first entry
        zip.start_file(
            "mimetype",
            zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored),
        )?;
        zip.write_all(MIMETYPE.as_bytes())?;

        Self::write_manifest(&mut zip)?;
        Self::write_settings(&mut zip, workbook)?;
        Self::write_content(&mut zip, workbook)?;

        zip.finish()?;
        log::debug!("wrote ODS package with {} table(s)", workbook.sheet_count());
        Ok(())
    }

    fn write_manifest<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> OdsResult<()> {
        zip.start_file("META-INF/manifest.xml", zip::write::SimpleFileOptions::default())?;

        let content = format!(
            r#"{XML_HEADER}
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
    <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="{MIMETYPE}"/>
    <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
    <manifest:file-entry manifest:full-path="settings.xml" manifest:media-type="text/xml"/>
</manifest:manifest>"#
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// The active table lives in the view settings
    fn write_settings<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> OdsResult<()> {
        zip.start_file("settings.xml", zip::write::SimpleFileOptions::default())?;

        let active = workbook
            .worksheet(workbook.active_sheet())
            .map(Worksheet::name)
            .unwrap_or_default();

        let content = format!(
            r#"{XML_HEADER}
<office:document-settings xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:config="urn:oasis:names:tc:opendocument:xmlns:config:1.0" office:version="1.2">
    <office:settings>
        <config:config-item-set config:name="ooo:view-settings">
            <config:config-item-map-indexed config:name="Views">
                <config:config-item-map-entry>
                    <config:config-item config:name="ViewId" config:type="string">view1</config:config-item>
                    <config:config-item config:name="ActiveTable" config:type="string">{}</config:config-item>
                </config:config-item-map-entry>
            </config:config-item-map-indexed>
        </config:config-item-set>
    </office:settings>
</office:document-settings>"#,
            escape(active)
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> OdsResult<()> {
        zip.start_file("content.xml", zip::write::SimpleFileOptions::default())?;

        let mut content = format!(
            r#"{XML_HEADER}
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" xmlns:of="urn:oasis:names:tc:opendocument:xmlns:of:1.2" office:version="1.2">
    <office:automatic-styles>"#
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            for (&col, width) in sheet.custom_column_widths() {
                content.push_str(&format!(
                    r#"
        <style:style style:name="{}" style:family="table-column"><style:table-column-properties style:column-width="{:.3}cm"/></style:style>"#,
                    column_style_name(i, col),
                    width * CM_PER_CHAR
                ));
            }
        }

        content.push_str(
            r#"
    </office:automatic-styles>
    <office:body>
        <office:spreadsheet>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::push_table(&mut content, sheet, i);
        }

        content.push_str(
            r#"
        </office:spreadsheet>
    </office:body>
</office:document-content>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn push_table(content: &mut String, sheet: &Worksheet, index: usize) {
        content.push_str(&format!(
            "\n            <table:table table:name=\"{}\">",
            escape(sheet.name())
        ));

        let widths = sheet.custom_column_widths();
        if let Some(&last_custom) = widths.keys().next_back() {
            for col in 0..=last_custom {
                if widths.contains_key(&col) {
                    content.push_str(&format!(
                        "\n                <table:table-column table:style-name=\"{}\"/>",
                        column_style_name(index, col)
                    ));
                } else {
                    content.push_str("\n                <table:table-column/>");
                }
            }
        } else {
            content.push_str("\n                <table:table-column/>");
        }

        if sheet.is_empty() {
            // A table needs at least one row
            push_blank_rows(content, 1);
        } else {
            let mut next_row = 0u32;
            let mut current_row: Option<u32> = None;
            let mut next_col = 0u16;

            for (row, col, value) in sheet.iter_cells() {
                if current_row != Some(row) {
                    if current_row.is_some() {
                        content.push_str("</table:table-row>");
                    }
                    push_blank_rows(content, row - next_row);
                    content.push_str("\n                <table:table-row>");
                    current_row = Some(row);
                    next_row = row + 1;
                    next_col = 0;
                }

                push_blank_cells(content, col - next_col);
                push_cell(content, value);
                next_col = col + 1;
            }

            if current_row.is_some() {
                content.push_str("</table:table-row>");
            }
        }

        content.push_str("\n            </table:table>");
    }
}

fn column_style_name(sheet: usize, col: u16) -> String {
    format!("co{}_{}", sheet + 1, col + 1)
}

fn push_blank_rows(content: &mut String, count: u32) {
    match count {
        0 => {}
        1 => content
            .push_str("\n                <table:table-row><table:table-cell/></table:table-row>"),
        n => content.push_str(&format!(
            "\n                <table:table-row table:number-rows-repeated=\"{}\"><table:table-cell/></table:table-row>",
            n
        )),
    }
}

fn push_blank_cells(content: &mut String, count: u16) {
    match count {
        0 => {}
        1 => content.push_str("<table:table-cell/>"),
        n => content.push_str(&format!(
            "<table:table-cell table:number-columns-repeated=\"{}\"/>",
            n
        )),
    }
}

fn push_cell(content: &mut String, value: &CellValue) {
    match value {
        CellValue::Number(n) if n.is_finite() => {
            content.push_str(&format!(
                r#"<table:table-cell office:value-type="float" office:value="{}"><text:p>{}</text:p></table:table-cell>"#,
                n, value
            ));
        }
        CellValue::Boolean(b) => {
            content.push_str(&format!(
                r#"<table:table-cell office:value-type="boolean" office:boolean-value="{}"><text:p>{}</text:p></table:table-cell>"#,
                b, value
            ));
        }
        CellValue::Formula(text) => {
            content.push_str(&format!(
                r#"<table:table-cell table:formula="of:={}"/>"#,
                escape(&to_open_formula(text))
            ));
        }
        CellValue::Empty => content.push_str("<table:table-cell/>"),
        CellValue::Number(_) | CellValue::String(_) => {
            content.push_str(&format!(
                r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                escape(&value.to_string())
            ));
        }
    }
}

/// Rewrite A1-style references into OpenFormula cell references.
///
/// `=SUM(A1:B2)*$C$3` becomes `SUM([.A1:.B2])*[.$C$3]`, and a sheet prefix
/// moves inside the brackets (`Sheet2!A1` becomes `[Sheet2.A1]`). Text inside string
/// literals is left alone, and names that are not followed by a row number
/// (function names) pass through.
pub(crate) fn to_open_formula(formula: &str) -> String {
    let body = formula.strip_prefix('=').unwrap_or(formula);
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            // copy the literal, "" is an escaped quote
            out.push(c);
            i += 1;
            while i < chars.len() {
                out.push(chars[i]);
                if chars[i] == '"' {
                    if chars.get(i + 1) == Some(&'"') {
                        out.push('"');
                        i += 2;
                        continue;
                    }
                    i += 1;
                    break;
                }
                i += 1;
            }
            continue;
        }

        let boundary = i == 0 || !is_name_char(chars[i - 1]);
        if boundary {
            let (sheet, start) = match scan_sheet_prefix(&chars, i) {
                Some(bang) if scan_reference(&chars, bang + 1).is_some() => {
                    (chars[i..bang].iter().collect::<String>(), bang + 1)
                }
                _ => (String::new(), i),
            };
            if let Some(end) = scan_reference(&chars, start) {
                let first: String = chars[start..end].iter().collect();
                if chars.get(end) == Some(&':') {
                    if let Some(range_end) = scan_reference(&chars, end + 1) {
                        let second: String = chars[end + 1..range_end].iter().collect();
                        out.push_str(&format!("[{}.{}:.{}]", sheet, first, second));
                        i = range_end;
                        continue;
                    }
                }
                out.push_str(&format!("[{}.{}]", sheet, first));
                i = end;
                continue;
            }
        }

        out.push(c);
        i += 1;
    }

    out
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$'
}

/// Match a `Sheet2!` or `'Q1 Sales'!` prefix at `start`; returns the index
/// of the `!`.
fn scan_sheet_prefix(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    if chars.get(i) == Some(&'\'') {
        i += 1;
        loop {
            match chars.get(i).copied() {
                None => return None,
                Some('\'') if chars.get(i + 1) == Some(&'\'') => i += 2,
                Some('\'') => break,
                Some(_) => i += 1,
            }
        }
        i += 1;
    } else {
        while chars
            .get(i)
            .is_some_and(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            i += 1;
        }
        if i == start {
            return None;
        }
    }
    (chars.get(i) == Some(&'!')).then_some(i)
}

/// Match `$?LETTERS$?DIGITS` at `start`; returns the end index of the match.
fn scan_reference(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    if chars.get(i) == Some(&'$') {
        i += 1;
    }
    let letters_start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_alphabetic()) {
        i += 1;
    }
    if i == letters_start || i - letters_start > 3 {
        return None;
    }
    if chars.get(i) == Some(&'$') {
        i += 1;
    }
    let digits_start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    // SUM1( or A1B are names, not references
    if chars
        .get(i)
        .is_some_and(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '(')
    {
        return None;
    }
    Some(i)
}
