//! Table building for each classified [`Shape`].

use crate::helpers::string::compare_natural;
use crate::helpers::string::to_cell;
use crate::table::header::placeholder;
use crate::table::shape::classify_array;
use crate::table::shape::Shape;
use crate::table::Table;
use serde_json::Value;
use std::collections::HashSet;

/// Header of the single column built from an array of scalars.
pub const VALUE_HEADER: &str = "Value";

/// Headers of the table built from a plain object.
pub const KEY_VALUE_HEADERS: [&str; 2] = ["Key", "Value"];

/// Builds headers and rows for a shape, or `None` when it has no tabular reading.
pub fn build(shape: Shape) -> Option<Table> {
    match shape {
        Shape::ArrayOfArrays(items) => Some(from_arrays(&items)),
        Shape::ArrayOfObjects(items) => Some(from_objects(&items)),
        Shape::ArrayOfPrimitives(items) => Some(from_primitives(&items)),
        Shape::WrappedArray { records, columns: Some(columns), .. } if !records.is_empty() => {
            Some(from_column_map(&records, &column_names(&columns)))
        }
        Shape::WrappedArray { records, .. } => build(classify_array(records)),
        Shape::KeyValueObject(fields) => Some(Table::new(
            KEY_VALUE_HEADERS.iter().map(|header| header.to_string()).collect(),
            fields
                .iter()
                .map(|(key, value)| vec![key.to_owned(), to_cell(value)])
                .collect(),
        )),
        Shape::Primitive(_) => None,
    }
}

/// Every inner array is a row; the first one is the header row.
/// An empty header row is named with placeholders up to the widest data row.
fn from_arrays(items: &[Value]) -> Table {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| match item {
            Value::Array(cells) => cells.iter().map(to_cell).collect(),
            other => vec![to_cell(other)],
        })
        .collect();
    let table = Table::from_rows(rows);
    if table.width() > 0 {
        return table;
    }
    let width = table.rows().iter().map(Vec::len).max().unwrap_or_default();
    table.with_headers((1..=width).map(placeholder).collect())
}

/// Headers are the union of all keys in first-seen order; missing keys become empty.
fn from_objects(items: &[Value]) -> Table {
    let mut seen = HashSet::new();
    let mut headers = Vec::<String>::new();
    for item in items {
        if let Value::Object(fields) = item {
            for key in fields.keys() {
                if seen.insert(key.as_str()) {
                    headers.push(key.to_owned());
                }
            }
        }
    }
    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header.as_str()).map(to_cell).unwrap_or_default())
                .collect()
        })
        .collect();
    Table::new(headers, rows)
}

fn from_primitives(items: &[Value]) -> Table {
    Table::new(
        vec![VALUE_HEADER.to_owned()],
        items.iter().map(|item| vec![to_cell(item)]).collect(),
    )
}

/// Display names of a `columns` map ordered by numeric-aware key order.
/// Empty names are dropped.
pub fn column_names(columns: &Value) -> Vec<String> {
    let names: Vec<String> = match columns {
        Value::Object(fields) => {
            let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_natural(a, b));
            entries.into_iter().map(|(_, name)| to_cell(name)).collect()
        }
        Value::Array(names) => names.iter().map(to_cell).collect(),
        _ => Vec::new(),
    };
    names.into_iter().filter(|name| !name.is_empty()).collect()
}

/// Positionally resolved records: cell `i` is looked up by header name, then
/// `column_{i+1}`, then index `i`.
fn from_column_map(records: &[Value], names: &[String]) -> Table {
    let headers = if names.is_empty() {
        record_keys(&records[0])
    } else {
        names.to_vec()
    };
    tracing::trace!(columns = headers.len(), records = records.len(), "building from column map");
    let rows = records
        .iter()
        .map(|record| {
            (0..headers.len())
                .map(|index| resolve_cell(record, &headers[index], index))
                .collect()
        })
        .collect();
    Table::new(headers, rows)
}

fn record_keys(record: &Value) -> Vec<String> {
    match record {
        Value::Object(fields) => fields.keys().cloned().collect(),
        Value::Array(cells) => (0..cells.len()).map(|index| index.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn resolve_cell(record: &Value, name: &str, index: usize) -> String {
    let present = |value: &&Value| !value.is_null();
    record
        .get(name)
        .filter(present)
        .or_else(|| record.get(format!("column_{}", index + 1).as_str()).filter(present))
        .or_else(|| record.get(index).filter(present))
        .or_else(|| record.get(index.to_string().as_str()).filter(present))
        .map(to_cell)
        .unwrap_or_default()
}
