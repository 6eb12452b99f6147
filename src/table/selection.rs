//! Row and column selection applied before display and export.

use crate::table::Table;
use std::collections::BTreeSet;

/// Row and column indices chosen by the user.
///
/// Row indices count data rows only (0 is the first row under the header). An empty
/// set selects everything on that axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected data row indices (0-based, header excluded)
    pub rows: BTreeSet<usize>,
    /// Selected column indices (0-based)
    pub columns: BTreeSet<usize>,
}

impl Selection {
    pub fn new(rows: impl IntoIterator<Item = usize>, columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            columns: columns.into_iter().collect(),
        }
    }

    /// Selects every row and column.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn accept_row(&self, index: usize) -> bool {
        self.rows.is_empty() || self.rows.contains(&index)
    }

    pub fn accept_column(&self, index: usize) -> bool {
        self.columns.is_empty() || self.columns.contains(&index)
    }

    /// Projects the table onto the selected rows and columns. The header row is always kept.
    pub fn filter(&self, table: &Table) -> Table {
        let project = |row: &[String]| -> Vec<String> {
            row.iter()
                .enumerate()
                .filter(|(index, _)| self.accept_column(*index))
                .map(|(_, cell)| cell.to_owned())
                .collect()
        };
        let headers = project(table.headers());
        let rows = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(index, _)| self.accept_row(*index))
            .map(|(_, row)| project(row.as_slice()))
            .collect();
        Table::new(headers, rows)
    }
}
