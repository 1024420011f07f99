//! Package plumbing: content types, relationships, workbook and styles

use quick_xml::escape::escape;
use sheet_exporter_core::Workbook;

use super::XML_HEADER;

const SPREADSHEETML: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml";
pub(super) const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const DOC_RELS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// `[Content_Types].xml`
pub(super) fn content_types(sheet_count: usize) -> String {
    let sheets: String = (1..=sheet_count)
        .map(|n| {
            format!(
                "\n    <Override PartName=\"/xl/worksheets/sheet{n}.xml\" ContentType=\"{SPREADSHEETML}.worksheet+xml\"/>"
            )
        })
        .collect();

    format!(
        r#"{XML_HEADER}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="{SPREADSHEETML}.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="{SPREADSHEETML}.styles+xml"/>{sheets}
</Types>"#
    )
}

/// `_rels/.rels`, pointing the package at the workbook part
pub(super) fn root_rels() -> String {
    format!(
        r#"{XML_HEADER}
<Relationships xmlns="{PACKAGE_RELS_NS}">
    <Relationship Id="rId1" Type="{DOC_RELS_NS}/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
    )
}

/// `xl/workbook.xml`: sheet list plus the tab shown on open
pub(super) fn workbook(workbook: &Workbook) -> String {
    let sheets: String = workbook
        .worksheets()
        .zip(1..)
        .map(|(sheet, n)| {
            format!(
                "\n        <sheet name=\"{}\" sheetId=\"{n}\" r:id=\"rId{n}\"/>",
                escape(sheet.name())
            )
        })
        .collect();

    format!(
        r#"{XML_HEADER}
<workbook xmlns="{MAIN_NS}" xmlns:r="{DOC_RELS_NS}">
    <bookViews>
        <workbookView activeTab="{}"/>
    </bookViews>
    <sheets>{sheets}
    </sheets>
</workbook>"#,
        workbook.active_sheet()
    )
}

/// `xl/_rels/workbook.xml.rels`
///
/// Sheet `n` is `rIdn`; the stylesheet takes the id after the last sheet.
pub(super) fn workbook_rels(sheet_count: usize) -> String {
    let sheets: String = (1..=sheet_count)
        .map(|n| {
            format!(
                "\n    <Relationship Id=\"rId{n}\" Type=\"{DOC_RELS_NS}/worksheet\" Target=\"worksheets/sheet{n}.xml\"/>"
            )
        })
        .collect();

    format!(
        r#"{XML_HEADER}
<Relationships xmlns="{PACKAGE_RELS_NS}">{sheets}
    <Relationship Id="rId{}" Type="{DOC_RELS_NS}/styles" Target="styles.xml"/>
</Relationships>"#,
        sheet_count + 1
    )
}

/// `xl/styles.xml` with the single default cell format
pub(super) fn styles() -> String {
    format!(
        r#"{XML_HEADER}
<styleSheet xmlns="{MAIN_NS}">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_types_lists_every_sheet() {
        let xml = content_types(2);
        assert!(xml.contains(r#"PartName="/xl/worksheets/sheet1.xml""#));
        assert!(xml.contains(r#"PartName="/xl/worksheets/sheet2.xml""#));
        assert!(!xml.contains("sheet3.xml"));
        assert!(xml.ends_with("+xml\"/>\n</Types>"));
    }

    #[test]
    fn test_workbook_lists_sheets_in_order() {
        let mut book = Workbook::new();
        book.add_worksheet_with_name("Q&A").unwrap();
        book.set_active_sheet(1).unwrap();

        let xml = workbook(&book);
        let first = xml.find(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#);
        let second = xml.find(r#"<sheet name="Q&amp;A" sheetId="2" r:id="rId2"/>"#);
        assert!(first.is_some() && second.is_some());
        assert!(first < second);
        assert!(xml.contains(r#"<workbookView activeTab="1"/>"#));
    }

    #[test]
    fn test_styles_relationship_follows_sheets() {
        let xml = workbook_rels(3);
        assert_eq!(xml.matches("/worksheet\"").count(), 3);
        assert!(xml.contains(r#"<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#));
    }
}
