//! Text utilities shared by the table pipeline and the spreadsheet renderer.
//! Covers cell stringification, digit counting and numeric-aware key ordering.

use serde_json::Number;
use serde_json::Value;
use std::cmp::Ordering;

/// Converts a JSON value to its cell text.
/// `null` becomes empty, strings are taken verbatim, containers are JSON-stringified.
pub(crate) fn to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_to_cell(number),
        Value::String(text) => text.to_owned(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Prints integers as-is and floats in shortest form, so `1.0` reads as `1`.
fn number_to_cell(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        number.to_string()
    } else {
        number
            .as_f64()
            .map(|float| float.to_string())
            .unwrap_or_else(|| number.to_string())
    }
}

/// Counts ASCII digits in the text.
#[inline]
pub(crate) fn digit_count(text: &str) -> usize {
    text.bytes().filter(u8::is_ascii_digit).count()
}

/// Keeps only ASCII digits.
#[inline]
pub(crate) fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Replaces every whitespace run with a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits text into alternating digit and non-digit chunks.
fn chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut previous: Option<bool> = None;
    for (index, character) in text.char_indices() {
        let is_digit = character.is_ascii_digit();
        if previous.is_some_and(|was_digit| was_digit != is_digit) {
            chunks.push(&text[start..index]);
            start = index;
        }
        previous = Some(is_digit);
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Orders keys the way a numeric-aware collator does: `column_2` sorts before `column_10`.
/// Digit runs compare by value, other runs compare case-insensitively.
pub(crate) fn compare_natural(left: &str, right: &str) -> Ordering {
    let left_chunks = chunks(left);
    let right_chunks = chunks(right);
    for (a, b) in left_chunks.iter().zip(right_chunks.iter()) {
        let a_is_digit = a.starts_with(|c: char| c.is_ascii_digit());
        let b_is_digit = b.starts_with(|c: char| c.is_ascii_digit());
        let ordering = if a_is_digit && b_is_digit {
            let a_trimmed = a.trim_start_matches('0');
            let b_trimmed = b.trim_start_matches('0');
            a_trimmed
                .len()
                .cmp(&b_trimmed.len())
                .then_with(|| a_trimmed.cmp(b_trimmed))
        } else {
            a.to_lowercase().cmp(&b.to_lowercase())
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left_chunks
        .len()
        .cmp(&right_chunks.len())
        .then_with(|| left.cmp(right))
}
