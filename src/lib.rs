//! # Rusty Tabulate
//!
//! Normalizes the loosely shaped JSON returned by AI extraction webhooks into
//! rectangular tables of strings, and exports them as styled spreadsheets.
//!
//! ## Pipeline
//!
//! - **Coercion**: stringified or malformed JSON is repaired where possible
//!   ([`helpers::json::safe_parse`])
//! - **Classification**: the payload is tagged with a [`Shape`]
//! - **Building**: each shape has its own table builder ([`table::builder::build`])
//! - **Header reconciliation**: saved template names replace built headers
//!   ([`table::header::reconcile`])
//! - **Row normalization**: every row is repaired to the header width, with a
//!   dedicated remapper for the seven-column contact directory layout
//! - **Selection**: rows and columns picked by the user ([`Selection`])
//! - **Export**: SpreadsheetML document saved through a [`FileSink`] ([`export`])
//!
//! Every stage except the export is a pure function of its inputs and never fails:
//! payloads without a tabular reading degrade into key/value or single-cell tables.

pub mod error;
pub mod helpers;
pub mod spreadsheet;
pub mod table;

pub use crate::error::RustyTabulateError;
pub use crate::spreadsheet::criteria::ExportCriteria;
pub use crate::spreadsheet::criteria::NumericPolicy;
pub use crate::spreadsheet::export;
pub use crate::spreadsheet::render;
pub use crate::spreadsheet::sink::DirectorySink;
pub use crate::spreadsheet::sink::FileSink;
pub use crate::spreadsheet::sink::MemorySink;
pub use crate::spreadsheet::SpreadsheetDocument;
pub use crate::table::header::HeaderOverride;
pub use crate::table::selection::Selection;
pub use crate::table::shape::Shape;
pub use crate::table::Table;

use crate::helpers::json::coerce_fields;
use crate::helpers::json::safe_parse;
use crate::table::builder::build;
use crate::table::header::reconcile;
use crate::table::shape::classify;
use serde_json::Value;

/// Turns a webhook payload into a finalized table.
///
/// The saved header override, when given, replaces the built header names. Every data
/// row of the result has the header width.
pub fn tabulate(raw: Value, header_override: Option<&HeaderOverride>) -> Table {
    let table = match classify(raw.clone()) {
        Shape::Primitive(value) => Table::raw_result(&value),
        shape => build(shape)
            .filter(|table| table.width() > 0)
            .unwrap_or_else(|| fallback_table(raw)),
    };
    let table = reconcile(table, header_override).finalize();
    tracing::debug!(columns = table.width(), rows = table.rows().len(), "tabulated payload");
    table
}

/// Runs [`tabulate`] and keeps only the selected rows and columns.
pub fn tabulate_selected(raw: Value, header_override: Option<&HeaderOverride>, selection: &Selection) -> Table {
    selection.filter(&tabulate(raw, header_override))
}

/// Objects become key/value tables; anything else is shown as raw text.
fn fallback_table(raw: Value) -> Table {
    match safe_parse(raw) {
        Value::Object(fields) => {
            build(Shape::KeyValueObject(coerce_fields(fields))).unwrap_or_default()
        }
        other => Table::raw_result(&other),
    }
}
