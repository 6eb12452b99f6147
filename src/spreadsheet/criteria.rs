use crate::error::RustyTabulateError;
use crate::spreadsheet::SpreadsheetError;
use serde::Deserialize;

/// Characters Excel refuses in a worksheet name.
const INVALID_SHEET_NAME_CHARACTERS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Longest worksheet name Excel accepts.
const MAX_SHEET_NAME_LENGTH: usize = 31;

/// Guard that keeps identifiers such as phone numbers from being exported as numbers.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NumericPolicy {
    /// Digit count at which a value stops being numeric (exclusive upper bound).
    pub max_digits: usize,
    /// Treat zero-padded values such as `007` as text.
    pub reject_leading_zero: bool,
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self {
            max_digits: 10,
            reject_leading_zero: true,
        }
    }
}

/// Options controlling the exported spreadsheet file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportCriteria {
    /// Worksheet name.
    pub sheet_name: String,

    /// Name the file is saved under.
    pub file_name: String,

    /// MIME type handed to the file sink.
    pub mime_type: String,

    /// Numeric classification of data cells.
    pub numeric: NumericPolicy,
}

impl Default for ExportCriteria {
    fn default() -> Self {
        Self {
            sheet_name: "Extracted".to_owned(),
            file_name: "extracted-data.xls".to_owned(),
            mime_type: "application/vnd.ms-excel".to_owned(),
            numeric: NumericPolicy::default(),
        }
    }
}

impl ExportCriteria {
    /// Reads criteria from JSON; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, RustyTabulateError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Checks that the sheet and file names can be written.
    pub fn validate(&self) -> Result<(), SpreadsheetError> {
        let sheet_name = self.sheet_name.trim();
        if sheet_name.is_empty()
            || sheet_name.chars().count() > MAX_SHEET_NAME_LENGTH
            || sheet_name.contains(INVALID_SHEET_NAME_CHARACTERS)
        {
            return Err(SpreadsheetError::InvalidSheetName(self.sheet_name.to_owned()));
        }
        if self.file_name.trim().is_empty() {
            return Err(SpreadsheetError::InvalidFileName(self.file_name.to_owned()));
        }
        Ok(())
    }
}
