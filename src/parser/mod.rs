// Author: Dustin Pilgrim
// License: MIT

use crate::ast::Document;
use crate::TomlError;

mod document;
pub mod value;

pub use value::{parse_array, parse_number, parse_string, parse_timestamp, parse_value, Parsed};

/// Parses `text` into a finalized [`Document`].
///
/// Only structural problems fail the call. Values that do not parse are kept
/// as `Value::Invalid` and reported by [`Document::errors`].
pub fn parse(text: &str) -> Result<Document, TomlError> {
    document::build(text)
}

#[cfg(test)]
mod tests;
