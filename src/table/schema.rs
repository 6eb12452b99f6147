//! Contact-directory remapping.
//!
//! Rows of the seven-column `coverage, locality, apnany, narone, primafone, second,
//! remarks` layout are re-derived from their text: phone numbers are pulled out by
//! pattern and the remaining text is split into coverage and locality.

use crate::helpers::string::collapse_whitespace;
use crate::helpers::string::digits_only;
use crate::table::row::normalize_row;
use regex::Regex;
use std::sync::LazyLock;

/// Header vocabulary of the contact directory layout, in column order.
pub const CONTACT_DIRECTORY_HEADERS: [&str; 7] = [
    "coverage",
    "locality",
    "apnany",
    "narone",
    "primafone",
    "second",
    "remarks",
];

/// Phone columns filled in order of appearance.
const PHONE_SLOTS: usize = 4;
const PHONE_DIGITS_MIN: usize = 10;
const PHONE_DIGITS_MAX: usize = 12;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?91[\- ]*)?([0-9][0-9\- ]{9,13})").expect("Hardcode regex pattern")
});

/// Strategies for splitting the leftover text, tried in order.
const LOCATION_SPLITTERS: [fn(&str) -> Option<(String, String)>; 4] = [
    split_at_colon,
    split_at_dash,
    split_at_pipe_or_semicolon,
    split_at_commas,
];

/// True when the header row is exactly the contact directory layout.
pub fn is_contact_directory(headers: &[String]) -> bool {
    headers.len() == CONTACT_DIRECTORY_HEADERS.len()
        && headers
            .iter()
            .zip(CONTACT_DIRECTORY_HEADERS)
            .all(|(header, expected)| header.trim().to_lowercase() == expected)
}

/// Re-derives a contact directory row from its text.
pub fn remap_row(row: Vec<String>) -> Vec<String> {
    let source = row.join(" ");
    let source = source.trim();
    let (phones, remainder) = extract_phones(source);
    let text = collapse_whitespace(&remainder);
    let (coverage, locality) = LOCATION_SPLITTERS
        .iter()
        .find_map(|splitter| splitter(&text))
        .unwrap_or((text, String::new()));

    let mut phones = phones.into_iter();
    let mut mapped = vec![coverage, locality];
    mapped.extend((0..PHONE_SLOTS).map(|_| phones.next().unwrap_or_default()));
    mapped.push(String::new());

    let headers: Vec<String> = CONTACT_DIRECTORY_HEADERS.iter().map(|h| h.to_string()).collect();
    normalize_row(&headers, mapped)
}

/// Pulls up to four 10-12 digit phone numbers out of the text.
/// Returns the digits of each number and the text with the matched spans removed.
fn extract_phones(source: &str) -> (Vec<String>, String) {
    let mut phones = Vec::new();
    let mut remainder = String::with_capacity(source.len());
    let mut last = 0;
    let mut position = 0;
    while phones.len() < PHONE_SLOTS {
        let Some(captures) = PHONE.captures_at(source, position) else {
            break;
        };
        let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
            break;
        };
        match phone_end(body.as_str()) {
            Some(length) => {
                let end = body.start() + length;
                phones.push(digits_only(&source[body.start()..end]));
                remainder.push_str(&source[last..whole.start()]);
                last = end;
                position = end;
            }
            None => position = whole.end(),
        }
    }
    remainder.push_str(&source[last..]);
    (phones, remainder)
}

/// Byte length of the phone number at the start of a matched body.
///
/// The whole body is taken when it holds 10-12 digits; a longer body is cut back at
/// the last digit group boundary that still leaves 10-12 digits.
fn phone_end(body: &str) -> Option<usize> {
    let digits = body.bytes().filter(u8::is_ascii_digit).count();
    if (PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&digits) {
        return Some(body.len());
    }
    if digits < PHONE_DIGITS_MIN {
        return None;
    }
    let bytes = body.as_bytes();
    let mut count = 0;
    let mut end = None;
    for (index, byte) in bytes.iter().enumerate() {
        if !byte.is_ascii_digit() {
            continue;
        }
        count += 1;
        let at_boundary = bytes.get(index + 1).is_some_and(|next| !next.is_ascii_digit());
        if at_boundary && (PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&count) {
            end = Some(index + 1);
        }
    }
    end
}

fn split_once_trimmed(text: &str, index: usize, separator_len: usize) -> (String, String) {
    (
        text[..index].trim().to_owned(),
        text[index + separator_len..].trim().to_owned(),
    )
}

fn split_at_colon(text: &str) -> Option<(String, String)> {
    text.find(':').map(|index| split_once_trimmed(text, index, 1))
}

fn split_at_dash(text: &str) -> Option<(String, String)> {
    text.find(" - ").map(|index| split_once_trimmed(text, index, 3))
}

fn split_at_pipe_or_semicolon(text: &str) -> Option<(String, String)> {
    text.find(['|', ';']).map(|index| split_once_trimmed(text, index, 1))
}

/// First comma segment is coverage, the rest is locality.
fn split_at_commas(text: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    match parts.split_first() {
        Some((first, rest)) if !rest.is_empty() => Some((first.to_string(), rest.join(", "))),
        _ => None,
    }
}
