//! # Tolerant line tokenizer
//!
//! Horizons reports are loosely delimited: numeric columns are separated by a variable number
//! of blanks and interleaved with flags (`*m`, `n.a.`, `/T`, ...). Both row readers go through
//! the two scanners defined here instead of carrying their own patterns:
//!
//! - [`numeric_tokens`] – every signed float (optional exponent) in a piece of text, in order,
//!   with its byte span and an explicit sign flag,
//! - [`leading_date_time`] – the `YYYY-Mon-DD HH:MM[:SS[.fff]]` pair opening a data row.
//!
//! The sign flag exists because `-00` parses to a negative zero that compares equal to `0.0`;
//! callers needing the sign of a degree field read [`NumericToken::negative`].

use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("valid numeric token regex")
});

static LEADING_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:A\.D\.\s*)?(?P<date>\d{4}-[A-Za-z]{3}-\d{2})\s+(?P<time>\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)",
    )
    .expect("valid date/time token regex")
});

/// A numeric field found in a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericToken {
    /// Parsed value.
    pub value: f64,
    /// `true` when the token text starts with `-` (also for `-0`, `-00`, `-0.0`).
    pub negative: bool,
    /// Byte offset of the first character of the token.
    pub start: usize,
    /// Byte offset one past the last character of the token.
    pub end: usize,
}

/// Date and time tokens at the start of a data row.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeToken<'a> {
    pub date: &'a str,
    pub time: &'a str,
    /// Byte offset just after the time token.
    pub end: usize,
}

/// Extract all numeric tokens from `text`, in order of appearance.
///
/// Token spans are relative to `text`. Tokens that match the pattern but fail to convert to
/// `f64` are dropped.
pub fn numeric_tokens(text: &str) -> Vec<NumericToken> {
    NUMERIC_TOKEN
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str();
            raw.parse::<f64>().ok().map(|value| NumericToken {
                value,
                negative: raw.starts_with('-'),
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// Extract the numeric tokens located after byte offset `from`.
///
/// Spans of the returned tokens stay relative to the whole `text`.
pub fn numeric_tokens_from(text: &str, from: usize) -> Vec<NumericToken> {
    let Some(tail) = text.get(from..) else {
        return Vec::new();
    };
    numeric_tokens(tail)
        .into_iter()
        .map(|token| NumericToken {
            start: token.start + from,
            end: token.end + from,
            ..token
        })
        .collect()
}

/// Find the leading `YYYY-Mon-DD HH:MM[:SS[.fff]]` pair of a row.
///
/// An optional `A.D.` era prefix is accepted. Only the shape is checked here; calendar
/// validity is left to [`crate::time::parse_calendar_utc`].
pub fn leading_date_time(line: &str) -> Option<DateTimeToken<'_>> {
    let caps = LEADING_DATE_TIME.captures(line)?;
    let date = caps.name("date")?;
    let time = caps.name("time")?;
    Some(DateTimeToken {
        date: date.as_str(),
        time: time.as_str(),
        end: time.end(),
    })
}
