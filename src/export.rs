// Author: Dustin Pilgrim
// License: MIT

//! Debug rendering and JSON export.
//!
//! Rendering is not round-trip exact: comments and layout are gone, and
//! values come out in their canonical form.

use std::fmt;

use chrono::SecondsFormat;
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::ast::{Document, Value};
use crate::resolver::NodeRef;
use crate::utils::{escape_string, format_float};
use crate::TomlError;

/// Deepest section or array nesting that serialization accepts.
pub const MAX_EXPORT_DEPTH: usize = 128;

fn write_scalar(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Unset | Value::Invalid => write!(f, "undefined"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::String(s) => write!(f, "\"{}\"", escape_string(s)),
        Value::Int(n) => write!(f, "{}", n),
        Value::Float(x) => write!(f, "{}", format_float(*x)),
        Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
        Value::Array(_) => Ok(()),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a> {
            Value(&'a Value),
            Separator,
            Close,
        }

        let mut pending = vec![Step::Value(self)];
        while let Some(step) = pending.pop() {
            match step {
                Step::Separator => write!(f, ", ")?,
                Step::Close => write!(f, "]")?,
                Step::Value(Value::Array(items)) => {
                    write!(f, "[")?;
                    pending.push(Step::Close);
                    for (idx, item) in items.iter().enumerate().rev() {
                        pending.push(Step::Value(item.value()));
                        if idx > 0 {
                            pending.push(Step::Separator);
                        }
                    }
                }
                Step::Value(scalar) => write_scalar(scalar, f)?,
            }
        }
        Ok(())
    }
}

/// Top-level values first, then each section as `[full.path]` followed by its
/// values, nested sections after their parent.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        let mut pending = vec![self.root()];

        while let Some(node) = pending.pop() {
            if node.is_section() {
                if wrote {
                    writeln!(f)?;
                }
                writeln!(f, "[{}]", node.full_name())?;
                wrote = true;
            }

            for leaf in node.values() {
                // Keep unparsable values readable instead of printing `undefined`.
                if leaf.error().is_some() {
                    writeln!(f, "{} = {}", leaf.name(), leaf.raw())?;
                } else {
                    writeln!(f, "{} = {}", leaf.name(), leaf.value())?;
                }
                wrote = true;
            }

            let sections: Vec<NodeRef<'_>> = node.sections().collect();
            pending.extend(sections.into_iter().rev());
        }
        Ok(())
    }
}

impl Document {
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

/// Containers entered to reach the deepest part of a value: 0 for scalars,
/// 1 for a flat array.
fn value_depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(value, 0)];
    while let Some((value, depth)) = pending.pop() {
        match value {
            Value::Array(items) => {
                deepest = deepest.max(depth + 1);
                pending.extend(items.iter().map(|item| (item.value(), depth + 1)));
            }
            _ => deepest = deepest.max(depth),
        }
    }
    deepest
}

/// Same measure for a subtree, with every section counted as a container.
fn node_depth(node: NodeRef<'_>) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(node, 0)];
    while let Some((node, depth)) = pending.pop() {
        if node.is_value() {
            deepest = deepest.max(depth + value_depth(node.value()));
        } else {
            deepest = deepest.max(depth + 1);
            pending.extend(node.children().map(|child| (child, depth + 1)));
        }
    }
    deepest
}

fn too_deep<E: ser::Error>(depth: usize) -> E {
    E::custom(format!(
        "nesting depth {} exceeds the export limit of {}",
        depth, MAX_EXPORT_DEPTH
    ))
}

/// Serializes without a depth check; callers check once at the top.
struct Checked<T>(T);

impl Serialize for Checked<&Value> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Unset | Value::Invalid => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Timestamp(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Checked(item.value()))?;
                }
                seq.end()
            }
        }
    }
}

/// Sections serialize as maps keyed by segment, value nodes as their value.
impl Serialize for Checked<NodeRef<'_>> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.0;
        if node.is_value() {
            return Checked(node.value()).serialize(serializer);
        }

        let children: Vec<NodeRef<'_>> = node.children().collect();
        let mut map = serializer.serialize_map(Some(children.len()))?;
        for child in children {
            map.serialize_entry(child.name(), &Checked(child))?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let depth = value_depth(self);
        if depth > MAX_EXPORT_DEPTH {
            return Err(too_deep(depth));
        }
        Checked(self).serialize(serializer)
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let depth = node_depth(*self);
        if depth > MAX_EXPORT_DEPTH {
            return Err(too_deep(depth));
        }
        Checked(*self).serialize(serializer)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

/// Converts a document into a `serde_json::Value` tree.
pub fn document_to_json_value(doc: &Document) -> Result<serde_json::Value, TomlError> {
    serde_json::to_value(doc).map_err(export_error)
}

/// Export a document to pretty-printed JSON. Sections become objects, timestamps
/// RFC 3339 strings, and values that failed to parse `null`. Documents nested
/// deeper than [`MAX_EXPORT_DEPTH`] are rejected.
///
/// # Examples
/// ```no_run
/// use toml_tree::{export, Document};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = Document::from_file("config.toml")?;
/// println!("{}", export::export_document_to_json(&doc)?);
/// # Ok(())
/// # }
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String, TomlError> {
    serde_json::to_string_pretty(doc).map_err(export_error)
}

fn export_error(e: serde_json::Error) -> TomlError {
    TomlError::ExportError {
        message: format!("Failed to serialize document: {}", e),
        hint: None,
        code: Some(501),
    }
}
