// Author: Dustin Pilgrim
// License: MIT

use tracing::{debug, trace, warn};

use super::value;
use crate::ast::{Document, Node, NodeId, NodeKind, Value};
use crate::lexer::{self, Line};
use crate::TomlError;

/// Scan state for a single top-to-bottom pass over the input.
pub(super) struct TreeBuilder {
    doc: Document,
    section: NodeId,
    current_value: Option<NodeId>,
}

impl TreeBuilder {
    pub(super) fn new() -> Self {
        Self {
            doc: Document::new(),
            section: Document::ROOT,
            current_value: None,
        }
    }

    pub(super) fn feed(&mut self, line_no: usize, line: Line<'_>) -> Result<(), TomlError> {
        trace!(line_no, ?line, "classified line");

        match line {
            Line::Blank | Line::Comment => Ok(()),
            Line::Section(path) => self.enter_section(path, line_no),
            Line::Assignment { key, raw } => {
                self.assign(key, raw, line_no);
                Ok(())
            }
            Line::Continuation(text) => self.continue_value(text, line_no),
        }
    }

    /// Walks `path` from the root, creating missing sections, and makes the
    /// last one current.
    fn enter_section(&mut self, path: &str, line_no: usize) -> Result<(), TomlError> {
        self.current_value = None;

        let mut current = Document::ROOT;
        for name in path.split('.') {
            current = match self.doc.node(current).children.get(name).copied() {
                Some(existing) if self.doc.node(existing).kind == NodeKind::Section => existing,
                Some(_) => {
                    return Err(TomlError::SyntaxError {
                        message: format!("Section '{}' collides with an existing value", path),
                        line: line_no,
                        hint: Some(format!("'{}' is already assigned a value", name)),
                        code: Some(202),
                    });
                }
                None => {
                    debug!(section = name, line = line_no, "creating section");
                    self.doc
                        .attach(current, Node::new(name, NodeKind::Section, line_no))
                }
            };
        }

        self.section = current;
        Ok(())
    }

    fn assign(&mut self, key: &str, raw: &str, line_no: usize) {
        if self.doc.node(self.section).children.contains_key(key) {
            debug!(key, line = line_no, "replacing earlier assignment");
        }

        let mut node = Node::new(key, NodeKind::Value, line_no);
        node.raw = raw.to_string();
        let id = self.doc.attach(self.section, node);
        self.current_value = Some(id);
    }

    fn continue_value(&mut self, text: &str, line_no: usize) -> Result<(), TomlError> {
        let target = self.current_value.ok_or_else(|| TomlError::SyntaxError {
            message: format!("Line '{}' has no '=' and there is no value to continue", text),
            line: line_no,
            hint: Some("Write assignments as `key = value`".into()),
            code: Some(201),
        })?;

        self.doc.node_mut(target).raw.push_str(text);
        Ok(())
    }

    pub(super) fn finish(mut self) -> Document {
        finalize(&mut self.doc);
        self.doc
    }
}

/// Builds and finalizes a document from `text`.
pub(super) fn build(text: &str) -> Result<Document, TomlError> {
    let mut builder = TreeBuilder::new();
    for (line_no, line) in lexer::lines(text) {
        builder.feed(line_no, line)?;
    }
    Ok(builder.finish())
}

/// Pass over every reachable value node turning its raw text into a typed
/// value. Failures stay on the node as `Value::Invalid` plus the error.
fn finalize(doc: &mut Document) {
    let leaves: Vec<NodeId> = doc
        .reachable()
        .filter(|id| doc.node(*id).kind == NodeKind::Value)
        .collect();

    for id in leaves {
        let node = doc.node_mut(id);
        match value::parse_value(&node.raw) {
            Ok(parsed) => {
                let rest = node.raw[parsed.consumed()..].trim();
                if !rest.is_empty() {
                    warn!(key = %node.name, line = node.line, trailing = rest, "ignoring text after value");
                }
                node.value = parsed.value;
                node.error = None;
            }
            Err(e) => {
                warn!(key = %node.name, line = node.line, error = %e, "value failed to parse");
                node.value = Value::Invalid;
                node.error = Some(e.at_line(node.line));
            }
        }
    }
}
