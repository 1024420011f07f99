//! `xl/worksheets/sheetN.xml`

use quick_xml::escape::escape;
use sheet_exporter_core::{CellAddress, CellValue, Worksheet};

use super::parts::MAIN_NS;
use super::XML_HEADER;

/// Serialize one worksheet. Strings are written inline, so the package
/// needs no shared-string table.
pub(super) fn worksheet(sheet: &Worksheet, active: bool) -> String {
    let dimension = sheet
        .data_range()
        .map_or_else(|| "A1".to_string(), |range| range.to_a1_string());
    let selected = if active { r#" tabSelected="1""# } else { "" };

    format!(
        r#"{XML_HEADER}
<worksheet xmlns="{MAIN_NS}">
    <dimension ref="{dimension}"/>
    <sheetViews>
        <sheetView{selected} workbookViewId="0"/>
    </sheetViews>{cols}
    <sheetData>{rows}
    </sheetData>
</worksheet>"#,
        cols = columns(sheet),
        rows = rows(sheet),
    )
}

/// `<cols>` block for custom widths, empty when there are none
fn columns(sheet: &Worksheet) -> String {
    let widths = sheet.custom_column_widths();
    if widths.is_empty() {
        return String::new();
    }

    let entries: String = widths
        .iter()
        .map(|(&col, width)| {
            let n = u32::from(col) + 1;
            format!("\n        <col min=\"{n}\" max=\"{n}\" width=\"{width}\" customWidth=\"1\"/>")
        })
        .collect();
    format!("\n    <cols>{entries}\n    </cols>")
}

/// `<row>` elements; cells arrive row-major so a row closes when the
/// next one starts
fn rows(sheet: &Worksheet) -> String {
    let mut out = String::new();
    let mut open_row = None;

    for (row, col, value) in sheet.iter_cells() {
        if open_row != Some(row) {
            if open_row.is_some() {
                out.push_str("\n        </row>");
            }
            out.push_str(&format!("\n        <row r=\"{}\">", row + 1));
            open_row = Some(row);
        }
        out.push_str("\n            ");
        out.push_str(&cell(CellAddress::new(row, col), value));
    }
    if open_row.is_some() {
        out.push_str("\n        </row>");
    }
    out
}

fn cell(address: CellAddress, value: &CellValue) -> String {
    match value {
        CellValue::Number(n) if n.is_finite() => format!(r#"<c r="{address}"><v>{n}</v></c>"#),
        // NaN and infinities have no numeric form in the file format
        CellValue::Number(n) => inline_string(address, &n.to_string()),
        CellValue::String(text) => inline_string(address, text),
        CellValue::Boolean(b) => format!(r#"<c r="{address}" t="b"><v>{}</v></c>"#, u8::from(*b)),
        CellValue::Formula(text) => format!(
            r#"<c r="{address}"><f>{}</f></c>"#,
            escape(text.strip_prefix('=').unwrap_or(text))
        ),
        CellValue::Empty => String::new(),
    }
}

fn inline_string(address: CellAddress, text: &str) -> String {
    let space = if text.trim() == text {
        ""
    } else {
        r#" xml:space="preserve""#
    };
    format!(
        r#"<c r="{address}" t="inlineStr"><is><t{space}>{}</t></is></c>"#,
        escape(text)
    )
}
