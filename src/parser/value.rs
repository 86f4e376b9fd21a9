// Author: Dustin Pilgrim
// License: MIT

use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ast::{Element, Value};
use crate::lexer::scanner::{QuoteTracker, Scan};
use crate::TomlError;

/// Fixed width of the `YYYY-MM-DDTHH:MM:SSZ` timestamp form.
const TIMESTAMP_LEN: usize = 20;

/// A successfully parsed value together with the slice of input it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'a> {
    pub value: Value,
    pub raw: &'a str,
}

impl Parsed<'_> {
    /// Bytes of input consumed by the value.
    pub fn consumed(&self) -> usize {
        self.raw.len()
    }
}

/// Parses the value at the start of `s`.
///
/// Dispatch is prefix based, first match wins: boolean, string, array,
/// timestamp (20th byte is `Z`), then number. Anything after the value is
/// left for the caller.
pub fn parse_value(s: &str) -> Result<Parsed<'_>, TomlError> {
    let (value, consumed) = if s.starts_with('[') {
        let (items, consumed) = parse_array(s)?;
        (Value::Array(items), consumed)
    } else {
        parse_scalar(s)?
    };

    Ok(Parsed {
        value,
        raw: &s[..consumed],
    })
}

/// Every value form except arrays.
fn parse_scalar(s: &str) -> Result<(Value, usize), TomlError> {
    if s.starts_with("true") {
        Ok((Value::Bool(true), 4))
    } else if s.starts_with("false") {
        Ok((Value::Bool(false), 5))
    } else if s.starts_with('"') {
        let (text, consumed) = parse_string(s)?;
        Ok((Value::String(text), consumed))
    } else if looks_like_timestamp(s) {
        Ok((Value::Timestamp(parse_timestamp(s)?), TIMESTAMP_LEN))
    } else {
        parse_number(s)
    }
}

/// `Z` at byte 20 and no separator, quote or whitespace before it, so array
/// text such as `1, "abcdefghijklmnoZ"` is not taken for a timestamp.
fn looks_like_timestamp(s: &str) -> bool {
    match s.as_bytes().get(..TIMESTAMP_LEN) {
        Some([head @ .., b'Z']) => !head
            .iter()
            .any(|&b| b.is_ascii_whitespace() || matches!(b, b',' | b'[' | b']' | b'"')),
        _ => false,
    }
}

/// Parses a double-quoted string, decoding escapes. Returns the decoded text
/// and the consumed length including both quotes.
pub fn parse_string(s: &str) -> Result<(String, usize), TomlError> {
    let mut chars = s.char_indices();
    if !matches!(chars.next(), Some((_, '"'))) {
        return Err(value_error("Expected '\"' to open a string", s, None, 103));
    }

    let mut tracker = QuoteTracker::opened();
    let mut out = String::new();

    for (idx, c) in chars {
        match tracker.step(c) {
            Scan::Inside(ch) => out.push(ch),
            Scan::Backslash => {}
            Scan::Escaped(ch) => out.push(decode_escape(ch).ok_or_else(|| {
                value_error(
                    &format!("Unknown escape sequence '\\{}'", ch),
                    s,
                    Some("Supported escapes are \\0 \\t \\n \\r \\\" and \\\\"),
                    103,
                )
            })?),
            Scan::Quote => return Ok((out, idx + 1)),
            Scan::Outside(_) => unreachable!("string scan continued past its closing quote"),
        }
    }

    Err(value_error(
        "Unterminated string",
        s,
        Some("Close the string with '\"'"),
        103,
    ))
}

fn decode_escape(c: char) -> Option<char> {
    match c {
        '0' => Some('\0'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

/// An array still waiting for its closing bracket.
struct Frame {
    start: usize,
    items: Vec<Element>,
    expect_value: bool,
}

impl Frame {
    fn open(start: usize) -> Self {
        Self {
            start,
            items: Vec::new(),
            expect_value: true,
        }
    }

    fn push(&mut self, value: Value, source: &Arc<str>, span: Range<usize>) {
        self.items.push(Element::new(value, Arc::clone(source), span));
        self.expect_value = false;
    }
}

/// Parses a bracketed array whose elements may be any value, arrays included.
/// Returns the elements and the consumed length including the closing bracket.
///
/// Open arrays are kept on an explicit stack, so nesting depth is bounded by
/// memory rather than by the call stack.
pub fn parse_array(s: &str) -> Result<(Vec<Element>, usize), TomlError> {
    if !s.starts_with('[') {
        return Err(value_error("Expected '[' to open an array", s, None, 105));
    }

    let source: Arc<str> = Arc::from(s);
    let mut parents: Vec<Frame> = Vec::new();
    let mut current = Frame::open(0);
    let mut idx = 1;

    while let Some(c) = s[idx..].chars().next() {
        if c.is_whitespace() {
            idx += c.len_utf8();
            continue;
        }

        match c {
            ']' => {
                idx += 1;
                let Some(parent) = parents.pop() else {
                    return Ok((current.items, idx));
                };
                let inner = std::mem::replace(&mut current, parent);
                current.push(Value::Array(inner.items), &source, inner.start..idx);
            }
            ',' => {
                current.expect_value = true;
                idx += 1;
            }
            other if !current.expect_value => {
                return Err(value_error(
                    &format!("Expected ',' or ']' in array, found '{}'", other),
                    s,
                    Some("Separate array elements with commas"),
                    105,
                ));
            }
            '[' => {
                parents.push(std::mem::replace(&mut current, Frame::open(idx)));
                idx += 1;
            }
            _ => {
                let (value, consumed) = parse_scalar(&s[idx..])?;
                current.push(value, &source, idx..idx + consumed);
                idx += consumed;
            }
        }
    }

    Err(value_error(
        "Unterminated array",
        s,
        Some("Close the array with ']'"),
        105,
    ))
}

/// Parses the fixed-width `YYYY-MM-DDTHH:MM:SSZ` form. Numeric offsets are not
/// recognized by the dispatcher.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TomlError> {
    let slice = s.get(..TIMESTAMP_LEN).ok_or_else(|| {
        value_error("Timestamp is shorter than 20 characters", s, None, 104)
    })?;

    DateTime::parse_from_rfc3339(slice)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            value_error(
                &format!("Invalid timestamp: {}", e),
                slice,
                Some("Use the form YYYY-MM-DDTHH:MM:SSZ"),
                104,
            )
        })
}

/// Scans the longest run of digits, `.` and `-`, then reads it as an `i64`,
/// falling back to `f64`.
pub fn parse_number(s: &str) -> Result<(Value, usize), TomlError> {
    let len = s
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.' || *b == b'-')
        .count();

    if len == 0 {
        return Err(value_error(
            "Unrecognized value",
            s,
            Some("Expected a boolean, string, array, number or timestamp"),
            101,
        ));
    }

    let run = &s[..len];
    if let Ok(int) = run.parse::<i64>() {
        return Ok((Value::Int(int), len));
    }
    if let Ok(float) = run.parse::<f64>() {
        return Ok((Value::Float(float), len));
    }

    Err(value_error(
        &format!("Invalid number '{}'", run),
        s,
        None,
        102,
    ))
}

fn value_error(message: &str, raw: &str, hint: Option<&str>, code: u32) -> TomlError {
    TomlError::ValueError {
        message: message.to_string(),
        raw: raw.to_string(),
        line: 0,
        hint: hint.map(str::to_string),
        code: Some(code),
    }
}
