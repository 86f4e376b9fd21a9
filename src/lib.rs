// Author: Dustin Pilgrim
// License: MIT

pub mod ast;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod utils;
pub mod config;

use std::path::Path;

pub use ast::{Document, Element, NodeId, NodeKind, Value};
pub use error::TomlError;
pub use resolver::NodeRef;

/// Parse a document from text. See [`parser::parse`].
pub fn parse(text: &str) -> Result<Document, TomlError> {
    parser::parse(text)
}

/// Read a whole file and parse it. Fails if the file cannot be read.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document, TomlError> {
    Document::from_file(path)
}
