//! Test fixtures: small real PDFs and workbooks, plus a fixed-output OCR engine.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::ocr::OcrEngine;

/// PNG signature bytes; enough for a file that only has to exist.
pub const PNG_STUB: &[u8] = b"\x89PNG\r\n\x1a\n";

/// OCR engine that ignores the image and returns the same paragraphs every time.
#[derive(Debug, Clone, Default)]
pub struct FixedOcr {
    pub paragraphs: Vec<String>,
}

impl FixedOcr {
    #[must_use]
    pub fn new<S: Into<String>>(paragraphs: impl IntoIterator<Item = S>) -> Self {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }
}

impl OcrEngine for FixedOcr {
    async fn recognize(&self, _image: &Path) -> Result<Vec<String>> {
        Ok(self.paragraphs.clone())
    }
}

/// Write a PDF with one page per entry of `pages`, each line set in Helvetica.
///
/// # Errors
///
/// Returns an error if the content stream cannot be encoded or the file cannot be written.
#[allow(clippy::cast_possible_wrap)]
pub fn write_pdf(path: &Path, pages: &[&[&str]]) -> io::Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![16.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ];
        for line in *lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }.encode().map_err(io::Error::other)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut file = File::create(path)?;
    doc.save_to(&mut file).map_err(io::Error::other)?;
    Ok(())
}

/// One sheet of a fixture workbook.
#[derive(Debug, Clone)]
pub enum SheetPart<'a> {
    /// A worksheet: a name plus rows of cells, as described on [`write_xlsx`].
    Grid(&'a str, Vec<Vec<&'a str>>),
    /// A chart sheet with no chart attached.
    Chart(&'a str),
}

const CHARTSHEET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><chartsheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetViews><sheetView workbookViewId="0"/></sheetViews></chartsheet>"#;

/// Write a minimal `.xlsx` workbook.
///
/// Each sheet is a name plus rows of cells. An empty string leaves the cell
/// absent; text that parses as a number is stored as a number, anything else
/// as an inline string with whitespace preserved.
///
/// # Errors
///
/// Returns an error if the archive cannot be written.
pub fn write_xlsx(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) -> io::Result<()> {
    let parts: Vec<SheetPart<'_>> = sheets
        .iter()
        .map(|(name, rows)| SheetPart::Grid(name, rows.clone()))
        .collect();
    write_workbook(path, &parts)
}

/// Write a `.xlsx` workbook whose sheets may mix worksheets and chart sheets,
/// in the given order.
///
/// # Errors
///
/// Returns an error if the archive cannot be written.
pub fn write_workbook(path: &Path, sheets: &[SheetPart<'_>]) -> io::Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default();

    let mut overrides = String::new();
    let mut entries = String::new();
    let mut rels = String::new();
    let mut bodies = Vec::with_capacity(sheets.len());
    for (index, sheet) in sheets.iter().enumerate() {
        let n = index + 1;
        let (name, kind, dir, body) = match sheet {
            SheetPart::Grid(name, rows) => (name, "worksheet", "worksheets", worksheet_xml(rows)),
            SheetPart::Chart(name) => (name, "chartsheet", "chartsheets", CHARTSHEET_XML.to_owned()),
        };
        let _ = write!(
            overrides,
            r#"<Override PartName="/xl/{dir}/sheet{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.{kind}+xml"/>"#
        );
        let _ = write!(
            entries,
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape(name)
        );
        let _ = write!(
            rels,
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{kind}" Target="{dir}/sheet{n}.xml"/>"#
        );
        bodies.push((format!("xl/{dir}/sheet{n}.xml"), body));
    }

    let parts = [
        (
            "[Content_Types].xml".to_owned(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{overrides}</Types>"#
            ),
        ),
        (
            "_rels/.rels".to_owned(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_owned(),
        ),
        (
            "xl/workbook.xml".to_owned(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{entries}</sheets></workbook>"#
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels".to_owned(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
            ),
        ),
    ];
    for (name, body) in parts.into_iter().chain(bodies) {
        zip.start_file(name, options).map_err(io::Error::other)?;
        zip.write_all(body.as_bytes())?;
    }

    zip.finish().map_err(io::Error::other)?;
    Ok(())
}

fn worksheet_xml(rows: &[Vec<&str>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        let row_num = r + 1;
        let _ = write!(xml, r#"<row r="{row_num}">"#);
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{row_num}", column_name(c));
            if value.parse::<f64>().is_ok() {
                let _ = write!(xml, r#"<c r="{cell_ref}"><v>{value}</v></c>"#);
            } else {
                let _ = write!(
                    xml,
                    r#"<c r="{cell_ref}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape(value)
                );
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Zero-based column index to spreadsheet letters: 0 -> A, 26 -> AA.
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + u8::try_from(index % 26).unwrap_or(0));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn worksheet_skips_absent_cells() {
        let xml = worksheet_xml(&[vec!["Name", "", "3"]]);
        assert!(xml.contains(r#"<c r="A1" t="inlineStr">"#));
        assert!(!xml.contains(r#"r="B1""#));
        assert!(xml.contains(r#"<c r="C1"><v>3</v></c>"#));
    }
}
