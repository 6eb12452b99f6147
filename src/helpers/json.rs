//! Lenient JSON coercion for payloads produced by language-model webhooks.
//! Strings that carry JSON (possibly prefixed, with trailing commas or single quotes)
//! are turned into values; anything unrecoverable is handed back untouched.

use regex::Captures;
use regex::Regex;
use serde_json::Map;
use serde_json::Value;
use std::sync::LazyLock;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("Hardcode regex pattern"));

static OBJECT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:'(\w+)'|"(\w+)"|(\w+))\s*:"#).expect("Hardcode regex pattern")
});

static SINGLE_QUOTED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*'([^']*)'").expect("Hardcode regex pattern"));

/// Coerces a value that may be stringified JSON into a JSON value.
///
/// Non-string values are returned as-is. Strings are parsed leniently; when no
/// repair succeeds the original string comes back unchanged.
pub fn safe_parse(value: Value) -> Value {
    match value {
        Value::String(text) => match parse_lenient(&text) {
            Some(parsed) => parsed,
            None => Value::String(text),
        },
        other => other,
    }
}

/// Applies [`safe_parse`] to every item of an array.
pub(crate) fn coerce_items(items: Vec<Value>) -> Vec<Value> {
    items.into_iter().map(safe_parse).collect()
}

/// Applies [`safe_parse`] to every field value of an object, one level deep.
pub(crate) fn coerce_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key, safe_parse(value)))
        .collect()
}

/// Parses JSON embedded in text, returning `None` when every repair fails.
/// Only text that is bracket-delimited once leading labels are dropped is parsed.
fn parse_lenient(text: &str) -> Option<Value> {
    let text = text.trim();
    // Drop labels such as "json " or "Here is the data:" before the first bracket
    let index = text.find(['{', '['])?;
    let text = text[index..].trim();
    if !is_bracket_delimited(text) {
        return None;
    }

    if let Some(value) = parse_repaired(text) {
        return Some(value);
    }

    let normalized = OBJECT_KEY.replace_all(text, |captures: &Captures| {
        let key = captures
            .get(1)
            .or_else(|| captures.get(2))
            .or_else(|| captures.get(3))
            .map(|matcher| matcher.as_str())
            .unwrap_or_default();
        format!("\"{}\":", key)
    });
    let normalized = SINGLE_QUOTED_VALUE.replace_all(&normalized, ": \"$1\"");
    parse_repaired(&normalized)
}

/// Strict parse after stripping trailing commas, retried once truncated at the last closer.
fn parse_repaired(text: &str) -> Option<Value> {
    let candidate = TRAILING_COMMA.replace_all(text, "$1");
    if let Ok(value) = serde_json::from_str(&candidate) {
        return Some(value);
    }
    let last_close = candidate.rfind(['}', ']'])?;
    if last_close == 0 {
        return None;
    }
    serde_json::from_str(&candidate[..=last_close]).ok()
}

fn is_bracket_delimited(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_strings_pass_through() {
        assert_eq!(safe_parse(json!(42)), json!(42));
        assert_eq!(safe_parse(json!({"a": "1"})), json!({"a": "1"}));
        assert_eq!(safe_parse(Value::Null), Value::Null);
    }

    #[test]
    fn plain_text_stays_text() {
        assert_eq!(safe_parse(json!("9876543210")), json!("9876543210"));
        assert_eq!(safe_parse(json!("no table here")), json!("no table here"));
    }

    #[test]
    fn prefix_and_trailing_comma_recovered() {
        let raw = json!("json [{\"name\": \"Asha\", \"city\": \"Pune\",},]");
        assert_eq!(safe_parse(raw), json!([{"name": "Asha", "city": "Pune"}]));
    }

    #[test]
    fn label_before_object() {
        let raw = json!("Here is the extracted data: {\"records\": [1, 2, 3,]}");
        assert_eq!(safe_parse(raw), json!({"records": [1, 2, 3]}));
    }

    #[test]
    fn brackets_inside_prose_stay_text() {
        for text in ["See clause [4] for terms", "Total [5] units", "{\"a\": 1} -- end of output"] {
            assert_eq!(safe_parse(json!(text)), json!(text));
        }
    }

    #[test]
    fn single_quoted_object_normalized() {
        let raw = json!("{'name': 'Ravi', age: 31, 'active': true, note: null}");
        assert_eq!(
            safe_parse(raw),
            json!({"name": "Ravi", "age": 31, "active": true, "note": null})
        );
    }

    #[test]
    fn unrecoverable_returns_original() {
        let raw = json!("{this is :: not json at all");
        assert_eq!(safe_parse(raw.clone()), raw);
    }

    #[test]
    fn children_are_unwrapped_one_level() {
        let raw = json!({"records": "[{\"a\": \"[1]\"}]", "count": 1});
        let Value::Object(fields) = raw else { unreachable!() };
        assert_eq!(
            Value::Object(coerce_fields(fields)),
            json!({"records": [{"a": "[1]"}], "count": 1})
        );
    }
}
