//! SpreadsheetML 2003 serialization of a styled document.

use crate::error::RustyTabulateError;
use crate::helpers::xml::XmlWriter;
use crate::helpers::xml::XmlWriterHelper;
use crate::spreadsheet::cell::CellStyle;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::cell::StyledCell;
use crate::spreadsheet::SpreadsheetDocument;
use crate::write_xml_element;
use std::io::Write;

const WORKBOOK_NAMESPACES: [(&str, &str); 4] = [
    ("xmlns", "urn:schemas-microsoft-com:office:spreadsheet"),
    ("xmlns:o", "urn:schemas-microsoft-com:office:office"),
    ("xmlns:x", "urn:schemas-microsoft-com:office:excel"),
    ("xmlns:ss", "urn:schemas-microsoft-com:office:spreadsheet"),
];

const HEADER_FILL: &str = "#FFC107";
const BORDER_COLOR: &str = "#333333";

/// Serializes the document to SpreadsheetML text.
pub fn to_xml(document: &SpreadsheetDocument) -> Result<String, RustyTabulateError> {
    let bytes = write_document(document, Vec::new())?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes the whole workbook into `inner` and hands it back.
pub fn write_document<W: Write>(document: &SpreadsheetDocument, inner: W) -> Result<W, RustyTabulateError> {
    let mut writer = XmlWriter::new(inner);
    writer.declaration()?;
    writer.processing_instruction(r#"mso-application progid="Excel.Sheet""#)?;
    write_xml_element!(writer, "Workbook", [
        WORKBOOK_NAMESPACES[0], WORKBOOK_NAMESPACES[1], WORKBOOK_NAMESPACES[2], WORKBOOK_NAMESPACES[3],
    ] => {
        write_styles(&mut writer)?;
        write_worksheet(&mut writer, document)?;
    });
    Ok(writer.into_inner())
}

fn write_styles<W: Write>(writer: &mut XmlWriter<W>) -> Result<(), RustyTabulateError> {
    write_xml_element!(writer, "Styles", [] => {
        for style in [CellStyle::Header, CellStyle::Text, CellStyle::Warning, CellStyle::Number] {
            write_style(writer, style)?;
        }
    });
    Ok(())
}

fn write_style<W: Write>(writer: &mut XmlWriter<W>, style: CellStyle) -> Result<(), RustyTabulateError> {
    write_xml_element!(writer, "Style", [("ss:ID", style.id())] => {
        match style {
            CellStyle::Header => {
                writer.empty("Font", &[("ss:Bold", "1"), ("ss:Color", "#000000")])?;
                writer.empty("Alignment", &[("ss:Horizontal", "Center"), ("ss:Vertical", "Center")])?;
                writer.empty("Interior", &[("ss:Color", HEADER_FILL), ("ss:Pattern", "Solid")])?;
            }
            CellStyle::Warning => {
                writer.empty("Font", &[("ss:Color", HEADER_FILL), ("ss:Bold", "1")])?;
                writer.empty("Alignment", &[("ss:Horizontal", "Left"), ("ss:Vertical", "Center")])?;
                write_bottom_border(writer)?;
            }
            CellStyle::Text => {
                writer.empty("Alignment", &[("ss:Horizontal", "Left"), ("ss:Vertical", "Center")])?;
                write_bottom_border(writer)?;
            }
            CellStyle::Number => {
                writer.empty("Alignment", &[("ss:Horizontal", "Right"), ("ss:Vertical", "Center")])?;
                write_bottom_border(writer)?;
            }
        }
    });
    Ok(())
}

fn write_bottom_border<W: Write>(writer: &mut XmlWriter<W>) -> Result<(), RustyTabulateError> {
    write_xml_element!(writer, "Borders", [] => {
        writer.empty("Border", &[
            ("ss:Position", "Bottom"),
            ("ss:LineStyle", "Continuous"),
            ("ss:Weight", "1"),
            ("ss:Color", BORDER_COLOR),
        ])?;
    });
    Ok(())
}

fn write_worksheet<W: Write>(writer: &mut XmlWriter<W>, document: &SpreadsheetDocument) -> Result<(), RustyTabulateError> {
    let column_count = document.columns().len().to_string();
    let row_count = document.rows().len().to_string();
    write_xml_element!(writer, "Worksheet", [("ss:Name", document.sheet_name())] => {
        write_xml_element!(writer, "Table", [
            ("ss:ExpandedColumnCount", column_count.as_str()),
            ("ss:ExpandedRowCount", row_count.as_str()),
        ] => {
            for column in document.columns() {
                let auto_fit = if column.auto_fit { "1" } else { "0" };
                writer.empty("Column", &[("ss:AutoFitWidth", auto_fit)])?;
            }
            for row in document.rows() {
                write_xml_element!(writer, "Row", [] => {
                    for cell in row {
                        write_cell(writer, cell)?;
                    }
                });
            }
        });
    });
    Ok(())
}

fn write_cell<W: Write>(writer: &mut XmlWriter<W>, cell: &StyledCell) -> Result<(), RustyTabulateError> {
    write_xml_element!(writer, "Cell", [("ss:StyleID", cell.style.id())] => {
        write_xml_element!(writer, "Data", [("ss:Type", cell.value.data_type())] => {
            match &cell.value {
                CellValue::Number(number) => writer.text(&number.to_string())?,
                CellValue::Text(text) => writer.text(text)?,
            }
        });
    });
    Ok(())
}
