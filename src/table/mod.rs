//! # Table Module
//!
//! The central normalized form of the engine: a header row followed by data rows of
//! strings. Submodules implement each pipeline stage that produces or reshapes a
//! [`Table`]: shape classification, table building, header reconciliation, row
//! normalization, the contact-directory remapper and the selection filter.

pub mod builder;
pub mod header;
pub mod row;
pub mod schema;
pub mod selection;
pub mod shape;

use serde_json::Value;

/// Header row followed by data rows.
///
/// Once finalized by [`Table::finalize`] every data row has exactly as many cells as
/// the header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from a header row and data rows, as given.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Treats the first row as the header row.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        Self { headers, rows }
    }

    /// Single-cell table used when the payload has no tabular interpretation.
    /// Strings are shown verbatim, other values pretty-printed.
    pub fn raw_result(value: &Value) -> Self {
        let text = match value {
            Value::String(text) => text.to_owned(),
            other => pretty_payload(other),
        };
        Self::new(vec!["Result".to_owned()], vec![vec![text]])
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns, taken from the header row.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// True when every data row matches the header width.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.headers.len())
    }

    /// Replaces the header row, keeping data rows.
    pub fn with_headers(self, headers: Vec<String>) -> Self {
        Self { headers, rows: self.rows }
    }

    /// Header row and data rows as one sequence, header first.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.headers.clone())
            .chain(self.rows.iter().cloned())
            .collect()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }

    /// Repairs every data row to the header width.
    ///
    /// Tables whose header is the seven-column contact directory layout are re-derived
    /// by [`schema::remap_row`]; all others go through [`row::normalize_row`].
    pub fn finalize(self) -> Self {
        let (headers, rows) = self.into_parts();
        let rows = if schema::is_contact_directory(&headers) {
            tracing::debug!(rows = rows.len(), "remapping contact directory rows");
            rows.into_iter().map(schema::remap_row).collect()
        } else {
            rows.into_iter()
                .map(|row| row::normalize_row(&headers, row))
                .collect()
        };
        Self { headers, rows }
    }

    /// Tab-separated text of the table, one newline-terminated line per row.
    pub fn to_tsv(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| format!("{}\n", row.join("\t")))
            .collect()
    }
}

/// Two-space indented JSON text of a payload, as copied to the clipboard.
pub fn pretty_payload(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn first_row_becomes_header() {
        let table = Table::from_rows(vec![strings(&["a", "b"]), strings(&["1", "2"])]);
        assert_eq!(table.headers(), strings(&["a", "b"]).as_slice());
        assert_eq!(table.rows(), &[strings(&["1", "2"])]);
        assert_eq!(table.width(), 2);
        assert!(Table::from_rows(vec![]).is_empty());
    }

    #[test]
    fn raw_result_for_scalars() {
        assert_eq!(
            Table::raw_result(&json!("garbled output")).to_rows(),
            vec![strings(&["Result"]), strings(&["garbled output"])]
        );
        assert_eq!(
            Table::raw_result(&json!([])).to_rows(),
            vec![strings(&["Result"]), strings(&["[]"])]
        );
    }

    #[test]
    fn finalize_makes_rows_rectangular() {
        let table = Table::new(
            strings(&["Name", "Phone"]),
            vec![strings(&["Asha"]), strings(&["Ravi", "98", "extra"])],
        )
        .finalize();
        assert!(table.is_rectangular());
        assert_eq!(table.rows()[0], strings(&["Asha", ""]));
        assert_eq!(table.rows()[1], strings(&["Ravi", "98"]));
    }

    #[test]
    fn tsv_lines() {
        let table = Table::new(strings(&["a", "b"]), vec![strings(&["1", "2"])]);
        assert_eq!(table.to_tsv(), "a\tb\n1\t2\n");
    }

    #[test]
    fn pretty_payload_indents() {
        assert_eq!(pretty_payload(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }
}
