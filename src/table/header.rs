//! Header reconciliation against saved column templates.

use crate::table::Table;
use serde::Deserialize;
use serde_json::Value;

/// Name given to the final padding slot when the built table ends with remarks.
pub const REMARKS_HEADER: &str = "remarks";

/// Placeholder name of the column at 1-based `position`.
pub fn placeholder(position: usize) -> String {
    format!("column_{}", position)
}

/// One column of a saved extraction template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub instruction: Option<String>,
    pub row_count: Option<u64>,
}

/// Header names taken from a saved template or history entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderOverride {
    names: Vec<String>,
}

impl HeaderOverride {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Keeps the records' non-empty names, in order.
    pub fn from_records(records: &[ColumnRecord]) -> Self {
        Self::new(
            records
                .iter()
                .filter_map(|record| record.name.as_deref())
                .filter(|name| !name.is_empty()),
        )
    }

    /// Reads persisted `[{"name": ...}, ...]` column records.
    /// Returns `None` when the value is not such a list or names nothing.
    pub fn from_json(value: &Value) -> Option<Self> {
        let records = Vec::<ColumnRecord>::deserialize(value).ok()?;
        let header = Self::from_records(&records);
        (!header.is_empty()).then_some(header)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Replaces the built header row with the override, length-matched to the built width.
///
/// Missing names become `column_{n}`; the last one becomes `remarks` when the built
/// table's last header mentions remarks. Extra names are dropped. Data rows are kept.
pub fn reconcile(table: Table, header_override: Option<&HeaderOverride>) -> Table {
    let Some(header_override) = header_override.filter(|names| !names.is_empty()) else {
        return table;
    };
    let target = table.width();
    let mut headers = header_override.names().to_vec();
    if headers.len() < target {
        let last_is_remarks = table
            .headers()
            .last()
            .is_some_and(|header| header.to_lowercase().contains(REMARKS_HEADER));
        while headers.len() < target {
            if last_is_remarks && headers.len() == target - 1 {
                headers.push(REMARKS_HEADER.to_owned());
            } else {
                headers.push(placeholder(headers.len() + 1));
            }
        }
    } else {
        headers.truncate(target);
    }
    tracing::debug!(columns = headers.len(), "applied header override");
    table.with_headers(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(headers: &[&str]) -> Table {
        Table::new(
            headers.iter().map(|header| header.to_string()).collect(),
            vec![vec!["x".to_owned(); headers.len()]],
        )
    }

    #[test]
    fn absent_or_empty_override_keeps_table() {
        let original = table(&["a", "b"]);
        assert_eq!(reconcile(original.clone(), None), original);
        assert_eq!(reconcile(original.clone(), Some(&HeaderOverride::default())), original);
    }

    #[test]
    fn shorter_override_padded_with_placeholders() {
        let result = reconcile(
            table(&["col_1", "col_2", "col_3"]),
            Some(&HeaderOverride::new(["Name", "Email"])),
        );
        assert_eq!(result.headers(), ["Name", "Email", "column_3"]);
        assert_eq!(result.rows(), table(&["col_1", "col_2", "col_3"]).rows());
    }

    #[test]
    fn remarks_slot_preserved() {
        let result = reconcile(table(&["col_1", "remarks"]), Some(&HeaderOverride::new(["Name"])));
        assert_eq!(result.headers(), ["Name", "remarks"]);

        let result = reconcile(
            table(&["a", "b", "c", "Remarks / Notes"]),
            Some(&HeaderOverride::new(["Name"])),
        );
        assert_eq!(result.headers(), ["Name", "column_2", "column_3", "remarks"]);
    }

    #[test]
    fn longer_override_truncated() {
        let result = reconcile(table(&["a", "b"]), Some(&HeaderOverride::new(["x", "y", "z"])));
        assert_eq!(result.headers(), ["x", "y"]);
    }

    #[test]
    fn override_from_template_records() {
        let value = json!([
            {"id": "1", "name": "Name", "instruction": "Full name", "rowCount": 5},
            {"id": "2", "name": ""},
            {"id": "3"},
            {"name": "Phone"}
        ]);
        assert_eq!(HeaderOverride::from_json(&value), Some(HeaderOverride::new(["Name", "Phone"])));
        assert_eq!(HeaderOverride::from_json(&json!([{"id": "1"}])), None);
        assert_eq!(HeaderOverride::from_json(&json!({"name": "x"})), None);
    }
}
