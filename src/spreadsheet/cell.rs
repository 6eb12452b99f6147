use crate::helpers::string::digit_count;
use crate::spreadsheet::criteria::NumericPolicy;
use regex::Regex;
use std::sync::LazyLock;

static SIGNED_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(?:\.\d+)?$").expect("Hardcode regex pattern"));

static LEADING_ZERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0\d+$").expect("Hardcode regex pattern"));

static WARNING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)not\s*clear|unclear|notclear").expect("Hardcode regex pattern")
});

/// Style applied to a spreadsheet cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellStyle {
    /// Header row: bold, centered, filled background
    Header,
    /// Right-aligned numeric value
    Number,
    /// Left-aligned text
    Text,
    /// Text flagged as unreadable by the extraction service
    Warning,
}

impl CellStyle {
    /// Style identifier referenced from `ss:StyleID`.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Number => "CellNumber",
            Self::Text => "CellText",
            Self::Warning => "CellWarnText",
        }
    }
}

/// Value written into a cell's `Data` element.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub const fn data_type(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Text(_) => "String",
        }
    }
}

/// A cell of the spreadsheet document with its style decided.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledCell {
    pub style: CellStyle,
    pub value: CellValue,
}

impl StyledCell {
    pub fn header(text: &str) -> Self {
        Self {
            style: CellStyle::Header,
            value: CellValue::Text(text.to_owned()),
        }
    }

    /// Classifies a data cell: number first, then warning text, otherwise plain text.
    pub fn data(text: &str, policy: &NumericPolicy) -> Self {
        if let Some(number) = to_number(text, policy) {
            return Self {
                style: CellStyle::Number,
                value: CellValue::Number(number),
            };
        }
        let style = if is_warning(text) { CellStyle::Warning } else { CellStyle::Text };
        Self {
            style,
            value: CellValue::Text(text.to_owned()),
        }
    }
}

/// Reads the text as a number when the policy accepts it.
///
/// Everything but digits, `.` and `-` is stripped first, so `"$1,200"` reads as
/// `1200`. Digit runs as long as phone numbers and zero-padded codes stay text.
pub fn to_number(text: &str, policy: &NumericPolicy) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|character| character.is_ascii_digit() || *character == '.' || *character == '-')
        .collect();
    if cleaned.is_empty() || digit_count(&cleaned) >= policy.max_digits {
        return None;
    }
    if policy.reject_leading_zero && LEADING_ZERO.is_match(&cleaned) {
        return None;
    }
    if !SIGNED_DECIMAL.is_match(&cleaned) {
        return None;
    }
    Some(cleaned.parse::<f64>().unwrap_or(0.0))
}

/// True when the text mentions that the source was unreadable.
pub fn is_warning(text: &str) -> bool {
    WARNING.is_match(text)
}

/// Part of a text, flagged when it is a warning phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub flagged: bool,
}

/// Splits text around warning phrases so hosts can highlight them.
pub fn warning_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for matcher in WARNING.find_iter(text) {
        if matcher.start() > last {
            segments.push(Segment { text: &text[last..matcher.start()], flagged: false });
        }
        segments.push(Segment { text: matcher.as_str(), flagged: true });
        last = matcher.end();
    }
    if last < text.len() {
        segments.push(Segment { text: &text[last..], flagged: false });
    }
    segments
}
