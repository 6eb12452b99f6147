//! Shape classification of coerced webhook payloads.
//!
//! A payload is inspected once and tagged with the [`Shape`] that decides which
//! table-building strategy applies. Stringified children are unwrapped on the way down.

use crate::helpers::json::coerce_fields;
use crate::helpers::json::coerce_items;
use crate::helpers::json::safe_parse;
use serde_json::Map;
use serde_json::Value;

/// Property names searched, in order, for the array wrapped by an object.
pub const PREFERRED_ARRAY_KEYS: [&str; 5] = ["records", "data", "items", "rows", "result"];

/// Property holding the positional column-name map next to a wrapped array.
pub const COLUMNS_KEY: &str = "columns";

/// Closed set of payload shapes, each carrying the data its builder needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Array whose first element is an array; the first inner array is the header row.
    ArrayOfArrays(Vec<Value>),
    /// Array whose first element is an object.
    ArrayOfObjects(Vec<Value>),
    /// Non-empty array of scalars.
    ArrayOfPrimitives(Vec<Value>),
    /// Array found inside an object, with its sibling `columns` map if any.
    WrappedArray {
        key: String,
        records: Vec<Value>,
        columns: Option<Value>,
    },
    /// Object without any array property.
    KeyValueObject(Map<String, Value>),
    /// Scalar, unparseable text or empty array.
    Primitive(Value),
}

impl Shape {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArrayOfArrays(_) => "array_of_arrays",
            Self::ArrayOfObjects(_) => "array_of_objects",
            Self::ArrayOfPrimitives(_) => "array_of_primitives",
            Self::WrappedArray { .. } => "wrapped_array",
            Self::KeyValueObject(_) => "key_value_object",
            Self::Primitive(_) => "primitive",
        }
    }
}

/// Coerces the payload and decides its shape.
pub fn classify(value: Value) -> Shape {
    let shape = match safe_parse(value) {
        Value::Array(items) => {
            let items = coerce_items(items);
            match single_wrapper(&items) {
                Some(shape) => shape,
                None => classify_array(items),
            }
        }
        Value::Object(fields) => {
            let fields = coerce_fields(fields);
            match find_array_key(&fields) {
                Some(key) => unwrap_array(fields, key),
                None => Shape::KeyValueObject(fields),
            }
        }
        other => Shape::Primitive(other),
    };
    tracing::debug!(shape = shape.as_str(), "classified payload");
    shape
}

/// Classifies an array by its first element.
pub fn classify_array(items: Vec<Value>) -> Shape {
    match items.first() {
        None => Shape::Primitive(Value::Array(items)),
        Some(Value::Array(_)) => Shape::ArrayOfArrays(items),
        Some(Value::Object(_)) => Shape::ArrayOfObjects(items),
        Some(_) => Shape::ArrayOfPrimitives(items),
    }
}

/// `[ { "records": [...] } ]`: a one-element array around an object that wraps an array.
fn single_wrapper(items: &[Value]) -> Option<Shape> {
    let [Value::Object(wrapper)] = items else {
        return None;
    };
    let fields = coerce_fields(wrapper.clone());
    let key = find_array_key(&fields)?;
    Some(unwrap_array(fields, key))
}

/// Picks the preferred array property, else the first array-valued property.
pub fn find_array_key(fields: &Map<String, Value>) -> Option<String> {
    PREFERRED_ARRAY_KEYS
        .iter()
        .find(|key| fields.get(**key).is_some_and(Value::is_array))
        .map(|key| key.to_string())
        .or_else(|| {
            fields
                .iter()
                .find(|(_, value)| value.is_array())
                .map(|(key, _)| key.to_owned())
        })
}

fn unwrap_array(mut fields: Map<String, Value>, key: String) -> Shape {
    let columns = fields
        .get(COLUMNS_KEY)
        .filter(|columns| columns.is_object() || columns.is_array())
        .cloned();
    let records = match fields.remove(&key) {
        Some(Value::Array(records)) => coerce_items(records),
        _ => Vec::new(),
    };
    tracing::trace!(key = key.as_str(), records = records.len(), "found wrapped array");
    Shape::WrappedArray { key, records, columns }
}
