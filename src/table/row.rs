//! Row repair for rows whose cell count differs from the header count.
//!
//! A row that arrived as one string is split with the first delimiter that yields
//! enough tokens; wider rows are truncated or folded into a trailing remarks column;
//! narrower rows are padded.

use crate::table::header::REMARKS_HEADER;
use regex::Regex;
use std::sync::LazyLock;

/// Delimiters tried, in order, on a row that arrived as a single cell.
pub const DELIMITERS: [&str; 8] = ["\t", ",", ";", "|", " | ", " : ", ":", " - "];

static WIDE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Hardcode regex pattern"));

/// A split of the raw text: each trimmed token with its byte offset in the raw text.
struct Split<'a> {
    raw: &'a str,
    tokens: Vec<(usize, &'a str)>,
}

impl<'a> Split<'a> {
    /// Splits on the delimiter, trimming tokens and dropping empty ones.
    fn by_delimiter(raw: &'a str, delimiter: &str) -> Self {
        let mut tokens = Vec::new();
        let mut start = 0;
        for (index, _) in raw.match_indices(delimiter) {
            tokens.push((start, &raw[start..index]));
            start = index + delimiter.len();
        }
        tokens.push((start, &raw[start..]));
        Self::from_pieces(raw, tokens)
    }

    /// Splits on runs of two or more whitespace characters.
    fn by_wide_space(raw: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut start = 0;
        for matcher in WIDE_SPACE.find_iter(raw) {
            tokens.push((start, &raw[start..matcher.start()]));
            start = matcher.end();
        }
        tokens.push((start, &raw[start..]));
        Self::from_pieces(raw, tokens)
    }

    fn from_pieces(raw: &'a str, pieces: Vec<(usize, &'a str)>) -> Self {
        let tokens = pieces
            .into_iter()
            .map(|(offset, piece)| {
                let token = piece.trim();
                (offset + piece.len() - piece.trim_start().len(), token)
            })
            .filter(|(_, token)| !token.is_empty())
            .collect();
        Self { raw, tokens }
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    /// First `width` tokens.
    fn take(&self, width: usize) -> Vec<String> {
        self.tokens
            .iter()
            .take(width)
            .map(|(_, token)| token.to_string())
            .collect()
    }

    /// First `width - 1` tokens, then the raw text from token `width - 1` through the last token.
    fn take_with_tail(&self, width: usize) -> Vec<String> {
        let mut cells = self.take(width - 1);
        let (start, _) = self.tokens[width - 1];
        let end = self
            .tokens
            .last()
            .map_or(self.raw.len(), |(offset, token)| offset + token.len());
        cells.push(self.raw[start..end].to_owned());
        cells
    }
}

/// True when the header row ends with the remarks column.
pub(crate) fn ends_with_remarks(headers: &[String]) -> bool {
    headers
        .last()
        .is_some_and(|header| header.trim().eq_ignore_ascii_case(REMARKS_HEADER))
}

/// Repairs a row to exactly the header width. Empty headers leave the row untouched.
pub fn normalize_row(headers: &[String], row: Vec<String>) -> Vec<String> {
    let width = headers.len();
    if width == 0 || row.len() == width {
        return row;
    }
    if row.len() == 1 {
        let raw = row.into_iter().next().unwrap_or_default();
        return split_single_cell(&raw, width, ends_with_remarks(headers));
    }
    if row.len() > width {
        if ends_with_remarks(headers) {
            let mut cells = row;
            let tail = cells.split_off(width - 1).join(" ");
            cells.push(tail);
            return cells;
        }
        let mut cells = row;
        cells.truncate(width);
        return cells;
    }
    pad(row, width)
}

/// Splits a row that arrived as one string into `width` cells.
fn split_single_cell(raw: &str, width: usize, merge_remarks: bool) -> Vec<String> {
    let split = DELIMITERS
        .iter()
        .map(|delimiter| Split::by_delimiter(raw, delimiter))
        .find(|split| split.len() >= width);
    if let Some(split) = split {
        if merge_remarks && split.len() > width {
            return split.take_with_tail(width);
        }
        return split.take(width);
    }

    let split = Split::by_wide_space(raw);
    if split.len() >= width {
        return split.take(width);
    }

    tracing::trace!(width, "no delimiter reached the header width");
    pad(vec![raw.to_owned()], width)
}

fn pad(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn normalize(headers: &[&str], row: &[&str]) -> Vec<String> {
        normalize_row(&strings(headers), strings(row))
    }

    #[test]
    fn matching_width_unchanged() {
        assert_eq!(normalize(&["a", "b"], &["1", "2"]), strings(&["1", "2"]));
    }

    #[test]
    fn single_cell_overflow_merged_into_remarks() {
        assert_eq!(
            normalize(
                &["Name", "Phone", "Remarks"],
                &["John, 9876543210, late arrival, please confirm"]
            ),
            strings(&["John", "9876543210", "late arrival, please confirm"])
        );
    }

    #[test]
    fn overflow_tail_drops_trailing_separators() {
        assert_eq!(
            normalize(&["a", "b", "remarks"], &["a,b,c,d,"]),
            strings(&["a", "b", "c,d"])
        );
        assert_eq!(
            normalize(&["a", "b", "remarks"], &["a\tb\tc\td\t"]),
            strings(&["a", "b", "c\td"])
        );
    }

    #[test]
    fn single_cell_overflow_truncated_without_remarks() {
        assert_eq!(
            normalize(&["Name", "Phone"], &["John, 9876543210, late"]),
            strings(&["John", "9876543210"])
        );
    }

    #[test]
    fn delimiters_tried_in_order() {
        assert_eq!(normalize(&["a", "b"], &["x\ty,z"]), strings(&["x", "y,z"]));
        assert_eq!(normalize(&["a", "b", "c"], &["x;y;z"]), strings(&["x", "y", "z"]));
        assert_eq!(normalize(&["a", "b"], &["Ward 4 | Old Town"]), strings(&["Ward 4", "Old Town"]));
        assert_eq!(normalize(&["a", "b"], &["North - Market Road"]), strings(&["North", "Market Road"]));
    }

    #[test]
    fn empty_tokens_dropped() {
        assert_eq!(normalize(&["a", "b"], &[",,x,,y,"]), strings(&["x", "y"]));
    }

    #[test]
    fn wide_space_fallback() {
        assert_eq!(
            normalize(&["Name", "City", "Phone"], &["Asha Rao   Pune    98"]),
            strings(&["Asha Rao", "Pune", "98"])
        );
    }

    #[test]
    fn unsplittable_cell_padded() {
        assert_eq!(normalize(&["a", "b", "c"], &["lonely"]), strings(&["lonely", "", ""]));
    }

    #[test]
    fn wide_rows_fold_into_remarks() {
        assert_eq!(
            normalize(&["Name", "remarks"], &["Asha", "call", "after 5"]),
            strings(&["Asha", "call after 5"])
        );
        assert_eq!(normalize(&["Name", "Phone"], &["Asha", "98", "x"]), strings(&["Asha", "98"]));
    }

    #[test]
    fn narrow_rows_padded() {
        assert_eq!(normalize(&["a", "b", "c"], &["1", "2"]), strings(&["1", "2", ""]));
        assert_eq!(normalize(&["a", "b"], &[]), strings(&["", ""]));
    }

    #[test]
    fn empty_header_leaves_row() {
        assert_eq!(normalize(&[], &["x", "y"]), strings(&["x", "y"]));
    }
}
