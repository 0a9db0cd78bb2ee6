use super::{RawRow, RawTable};
use crate::process::utils::{cell_value, format_number};
use anyhow::{Context, Result};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use std::io::Cursor;
use tracing::debug;

const SHEET: &str = "Sheet1";

/// Read the odds sheet of a season workbook. Falls back to the first sheet
/// when the workbook has no `Sheet1`.
pub fn parse_workbook(bytes: &[u8]) -> Result<RawTable> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).context("opening workbook")?;

    let names = workbook.sheet_names();
    let sheet = if names.iter().any(|n| n == SHEET) {
        SHEET.to_string()
    } else {
        let first = names.first().context("workbook has no sheets")?.clone();
        debug!(sheet = %first, "no Sheet1, using first sheet");
        first
    };

    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet {sheet}"))?;

    let rows = range
        .rows()
        .map(|cells| RawRow::new(cells.iter().map(cell_text).collect()))
        .collect();
    Ok(RawTable { rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => cell_value(s),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => cell_value(s),
        Data::Error(_) => None,
    }
}

/// In-memory `.xlsx` builder for tests. Cells that parse as numbers are
/// numeric, empty strings are left out, everything else is an inline string.
#[cfg(test)]
pub(crate) mod fixture {
    use anyhow::Result;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    fn column_letters(mut idx: usize) -> String {
        let mut out = Vec::new();
        loop {
            out.push(b'A' + (idx % 26) as u8);
            if idx < 26 {
                break;
            }
            idx = idx / 26 - 1;
        }
        out.reverse();
        String::from_utf8_lossy(&out).into_owned()
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    fn sheet_xml(rows: &[Vec<&str>]) -> String {
        let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="{MAIN_NS}"><sheetData>"#);
        for (r, row) in rows.iter().enumerate() {
            let r = r + 1;
            xml.push_str(&format!(r#"<row r="{r}">"#));
            for (c, text) in row.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let cell = format!("{}{r}", column_letters(c));
                if text.parse::<f64>().is_ok() {
                    xml.push_str(&format!(r#"<c r="{cell}"><v>{text}</v></c>"#));
                } else {
                    xml.push_str(&format!(
                        r#"<c r="{cell}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        escape(text)
                    ));
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }

    pub fn workbook(sheets: &[(&str, Vec<Vec<&str>>)]) -> Result<Vec<u8>> {
        let mut content_types = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        );
        let mut sheet_list = String::new();
        let mut rels = String::new();
        for (i, (name, _)) in sheets.iter().enumerate() {
            let n = i + 1;
            content_types.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
            ));
            sheet_list.push_str(&format!(
                r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
                escape(name)
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{n}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{n}.xml"/>"#
            ));
        }
        content_types.push_str("</Types>");

        let mut parts = vec![
            ("[Content_Types].xml".to_string(), content_types),
            (
                "_rels/.rels".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                ),
            ),
            (
                "xl/workbook.xml".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets>{sheet_list}</sheets></workbook>"#
                ),
            ),
            (
                "xl/_rels/workbook.xml.rels".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
                ),
            ),
        ];
        for (i, (_, rows)) in sheets.iter().enumerate() {
            parts.push((format!("xl/worksheets/sheet{}.xml", i + 1), sheet_xml(rows)));
        }

        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options: FileOptions<'_, ()> =
                FileOptions::default().compression_method(CompressionMethod::Stored);
            for (name, body) in &parts {
                zip.start_file(name.as_str(), options)?;
                zip.write_all(body.as_bytes())?;
            }
            zip.finish()?;
        }
        Ok(buf)
    }

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(22), "W");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
    }
}
