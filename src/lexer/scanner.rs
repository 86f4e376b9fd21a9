// Author: Dustin Pilgrim
// License: MIT

/// What a single character means to a left-to-right scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// Outside any string literal.
    Outside(char),
    /// An unescaped `"`, opening or closing a string.
    Quote,
    /// Plain character inside a string.
    Inside(char),
    /// A `\` inside a string; the next character is escaped.
    Backslash,
    /// The character following a `\`.
    Escaped(char),
}

/// Quote/escape state shared by the comment stripper and the string grammar, so both
/// agree on where a string literal ends.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteTracker {
    in_string: bool,
    escaped: bool,
}

impl QuoteTracker {
    /// A tracker positioned just after an opening quote.
    pub(crate) fn opened() -> Self {
        Self {
            in_string: true,
            escaped: false,
        }
    }

    pub(crate) fn step(&mut self, c: char) -> Scan {
        if self.escaped {
            self.escaped = false;
            return Scan::Escaped(c);
        }

        match c {
            '"' => {
                self.in_string = !self.in_string;
                Scan::Quote
            }
            '\\' if self.in_string => {
                self.escaped = true;
                Scan::Backslash
            }
            c if self.in_string => Scan::Inside(c),
            c => Scan::Outside(c),
        }
    }
}
