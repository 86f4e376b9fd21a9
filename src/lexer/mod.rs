// Author: Dustin Pilgrim
// License: MIT

//! Line-level lexing: every physical line is classified on its own, the tree
//! builder decides what the classification means in context.

pub(crate) mod scanner;

use scanner::{QuoteTracker, Scan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    /// Interior of a `[a.b.c]` header, brackets and any trailing comment removed.
    Section(&'a str),
    /// `key = raw`, with `raw` already comment-stripped and trimmed.
    Assignment { key: &'a str, raw: &'a str },
    /// A line without `=`, continuing the previous value.
    Continuation(&'a str),
}

/// Classifies a single line. Whitespace around the line is ignored.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if line.starts_with('#') {
        return Line::Comment;
    }

    let stripped = strip_comment_and_trim(line);
    if stripped.starts_with('[') && stripped.ends_with(']') {
        return Line::Section(&stripped[1..stripped.len() - 1]);
    }

    match line.split_once('=') {
        Some((key, rest)) => Line::Assignment {
            key: key.trim(),
            raw: strip_comment_and_trim(rest),
        },
        None => Line::Continuation(stripped),
    }
}

/// Splits `text` on line feeds and classifies each line, yielding 1-based line numbers.
pub fn lines(text: &str) -> impl Iterator<Item = (usize, Line<'_>)> {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, classify(line)))
}

/// Drops a trailing `#` comment and surrounding whitespace. A `#` inside a
/// double-quoted string is kept.
pub fn strip_comment_and_trim(s: &str) -> &str {
    let s = s.trim();
    let mut tracker = QuoteTracker::default();

    for (idx, c) in s.char_indices() {
        if let Scan::Outside('#') = tracker.step(c) {
            return s[..idx].trim();
        }
    }

    s
}
