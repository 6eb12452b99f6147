//! # Spreadsheet Rendering Module
//!
//! Turns a finalized [`Table`] into a styled single-sheet spreadsheet document and
//! hands the serialized file to a [`FileSink`]. Style decisions (header, number,
//! text, warning) are made while building the document; XML syntax lives in
//! [`writer`].

pub mod cell;
pub mod criteria;
pub mod sink;
pub mod writer;

use crate::error::ResultMessage;
use crate::error::RustyTabulateError;
use crate::spreadsheet::cell::StyledCell;
use crate::spreadsheet::criteria::ExportCriteria;
use crate::spreadsheet::criteria::NumericPolicy;
use crate::spreadsheet::sink::ExportFile;
use crate::spreadsheet::sink::FileSink;
use crate::table::Table;
use thiserror::Error;

/// Errors raised while rendering a table into a spreadsheet.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The table has no columns left to export
    #[error("Nothing to export: table has no columns")]
    NoColumns,

    /// Worksheet name rejected by spreadsheet applications
    #[error("Invalid sheet name '{0}'")]
    InvalidSheetName(String),

    /// Export file name is empty
    #[error("Invalid file name '{0}'")]
    InvalidFileName(String),
}

/// Per-column metadata.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Let the spreadsheet application size the column to its content
    pub auto_fit: bool,
}

/// Single-sheet document of styled rows, header row first.
#[derive(Clone, Debug, PartialEq)]
pub struct SpreadsheetDocument {
    sheet_name: String,
    columns: Vec<ColumnMeta>,
    rows: Vec<Vec<StyledCell>>,
}

impl SpreadsheetDocument {
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<StyledCell>] {
        &self.rows
    }
}

/// Accumulates typed rows; serialized once through [`writer::to_xml`].
pub struct DocumentBuilder {
    sheet_name: String,
    columns: Vec<ColumnMeta>,
    rows: Vec<Vec<StyledCell>>,
}

impl DocumentBuilder {
    pub fn new(sheet_name: &str) -> Self {
        Self {
            sheet_name: sheet_name.to_owned(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Adds the header row and declares one auto-fit column per header.
    pub fn header(&mut self, headers: &[String]) -> &mut Self {
        self.columns = headers.iter().map(|_| ColumnMeta { auto_fit: true }).collect();
        self.rows.push(headers.iter().map(|header| StyledCell::header(header)).collect());
        self
    }

    /// Adds a data row, classifying each cell.
    pub fn row(&mut self, cells: &[String], policy: &NumericPolicy) -> &mut Self {
        self.rows.push(cells.iter().map(|cell| StyledCell::data(cell, policy)).collect());
        self
    }

    pub fn build(self) -> SpreadsheetDocument {
        SpreadsheetDocument {
            sheet_name: self.sheet_name,
            columns: self.columns,
            rows: self.rows,
        }
    }
}

/// Builds the styled document for a table.
pub fn render(table: &Table, criteria: &ExportCriteria) -> Result<SpreadsheetDocument, SpreadsheetError> {
    criteria.validate()?;
    if table.width() == 0 {
        return Err(SpreadsheetError::NoColumns);
    }
    let mut builder = DocumentBuilder::new(criteria.sheet_name.trim());
    builder.header(table.headers());
    for row in table.rows() {
        builder.row(row, &criteria.numeric);
    }
    Ok(builder.build())
}

/// Renders the table and saves it through the sink in a single attempt.
pub fn export<S: FileSink + ?Sized>(
    table: &Table,
    criteria: &ExportCriteria,
    sink: &mut S,
) -> Result<(), RustyTabulateError> {
    let document = render(table, criteria)?;
    let xml = writer::to_xml(&document)?;
    let file = ExportFile {
        name: criteria.file_name.trim().to_owned(),
        mime_type: criteria.mime_type.to_owned(),
        bytes: xml.into_bytes(),
    };
    tracing::debug!(file = file.name.as_str(), rows = document.rows().len(), "exporting spreadsheet");
    let result = sink.save(&file).with_prefix(&format!("Save '{}' failed", file.name));
    if let Err(error) = &result {
        tracing::warn!(%error, "export failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellStyle;
    use crate::spreadsheet::cell::CellValue;
    use crate::spreadsheet::sink::MemorySink;

    fn table() -> Table {
        Table::from_rows(vec![
            vec!["Name".to_owned(), "Qty".to_owned()],
            vec!["Asha".to_owned(), "12".to_owned()],
        ])
    }

    struct FailingSink;

    impl FileSink for FailingSink {
        fn save(&mut self, _file: &ExportFile) -> Result<(), RustyTabulateError> {
            Err(RustyTabulateError::WithContextError("download blocked".to_owned()))
        }
    }

    #[test]
    fn render_styles_rows() {
        let document = render(&table(), &ExportCriteria::default()).unwrap();
        assert_eq!(document.sheet_name(), "Extracted");
        assert_eq!(document.columns(), [ColumnMeta { auto_fit: true }; 2]);
        assert_eq!(document.rows()[0][0].style, CellStyle::Header);
        assert_eq!(document.rows()[1][0].style, CellStyle::Text);
        assert_eq!(document.rows()[1][1].value, CellValue::Number(12.0));
    }

    #[test]
    fn render_rejects_empty_table() {
        let result = render(&Table::default(), &ExportCriteria::default());
        assert!(matches!(result, Err(SpreadsheetError::NoColumns)));
    }

    #[test]
    fn export_hands_file_to_sink() {
        let mut sink = MemorySink::new();
        export(&table(), &ExportCriteria::default(), &mut sink).unwrap();
        let files = sink.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "extracted-data.xls");
        assert_eq!(files[0].mime_type, "application/vnd.ms-excel");
        assert!(String::from_utf8_lossy(&files[0].bytes).contains("<Data ss:Type=\"Number\">12</Data>"));
    }

    #[test]
    fn export_failure_is_reported() {
        let error = export(&table(), &ExportCriteria::default(), &mut FailingSink).unwrap_err();
        assert_eq!(error.to_string(), "Save 'extracted-data.xls' failed: download blocked");
    }
}
