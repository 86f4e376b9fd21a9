// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::TomlError;

/// A typed value. `Unset` is the state before finalization, `Invalid` marks a value
/// whose raw text failed to parse (the node carries the matching error).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Unset,
    Invalid,
    Bool(bool),
    String(String),
    Int(i64),
    Float(f64),
    Array(Vec<Element>),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Builds an array from plain values. The elements carry no source text.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().map(Element::from).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unset => "unset",
            Value::Invalid => "invalid",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Array(_) => "array",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Unset | Value::Invalid)
    }

    // Permissive narrowing: a mismatched variant yields the type's zero value.

    pub fn as_bool(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::String(s) => s,
            _ => "",
        }
    }

    pub fn as_string(&self) -> String {
        self.as_str().to_string()
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            _ => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match self {
            Value::Float(f) => *f,
            _ => 0.0,
        }
    }

    pub fn as_array(&self) -> &[Element] {
        match self {
            Value::Array(items) => items,
            _ => &[],
        }
    }

    /// Returns the Unix epoch for anything that is not a timestamp.
    pub fn as_timestamp(&self) -> DateTime<Utc> {
        match self {
            Value::Timestamp(ts) => *ts,
            _ => DateTime::<Utc>::default(),
        }
    }
}

/// One array element: the typed value and the slice of source text it was read from.
#[derive(Clone)]
pub struct Element {
    value: Value,
    source: Arc<str>,
    span: Range<usize>,
}

impl Element {
    pub(crate) fn new(value: Value, source: Arc<str>, span: Range<usize>) -> Self {
        Self { value, source, span }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Source text of the element, e.g. `"a\tb"` for a string or `[1, 2]` for a
    /// nested array. Empty for elements built in code.
    pub fn raw(&self) -> &str {
        self.source.get(self.span.clone()).unwrap_or_default()
    }

    pub fn into_value(mut self) -> Value {
        std::mem::take(&mut self.value)
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Self::new(value, Arc::from(""), 0..0)
    }
}

/// Elements compare by value; the source spelling is ignored.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("value", &self.value)
            .field("raw", &self.raw())
            .finish()
    }
}

// Nested arrays are moved onto a flat list first so dropping never recurses.
impl Drop for Element {
    fn drop(&mut self) {
        let Value::Array(items) = &mut self.value else {
            return;
        };
        let mut pending = std::mem::take(items);
        while let Some(mut element) = pending.pop() {
            if let Value::Array(inner) = &mut element.value {
                pending.append(inner);
            }
        }
    }
}

/// Handle into a [`Document`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Section,
    Value,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    /// Comment-stripped right-hand side, extended by continuation lines.
    pub(crate) raw: String,
    pub(crate) value: Value,
    pub(crate) error: Option<TomlError>,
    pub(crate) children: IndexMap<String, NodeId>,
    /// Back-reference only; the arena owns every node.
    pub(crate) parent: Option<NodeId>,
    pub(crate) line: usize,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, kind: NodeKind, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            raw: String::new(),
            value: Value::Unset,
            error: None,
            children: IndexMap::new(),
            parent: None,
            line,
        }
    }
}

/// A parsed document. Owns every node; the root lives at index 0.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
}

impl Document {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new("", NodeKind::Root, 0)],
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Pushes `node` into the arena and links it under `parent`, replacing any
    /// existing child of the same name.
    pub(crate) fn attach(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        let name = node.name.clone();
        self.nodes.push(node);
        self.node_mut(parent).children.insert(name, id);
        id
    }

    /// Number of nodes reachable from the root, root included.
    pub fn len(&self) -> usize {
        self.reachable().count()
    }

    /// Ids of every node reachable from the root, parents before children.
    pub(crate) fn reachable(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut pending = vec![Self::ROOT];
        std::iter::from_fn(move || {
            let id = pending.pop()?;
            pending.extend(self.node(id).children.values().rev().copied());
            Some(id)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.node(Self::ROOT).children.is_empty()
    }
}
