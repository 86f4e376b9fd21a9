// Author: Dustin Pilgrim
// License: MIT

//! Dotted-path lookups. Segments match child names exactly (case-sensitive);
//! nothing is created and a miss is just `None`.

use crate::ast::{Document, NodeId, NodeKind, Value};
use crate::TomlError;

/// Borrowed handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's own segment; empty for the root.
    pub fn name(&self) -> &'a str {
        &self.doc.node(self.id).name
    }

    pub fn kind(&self) -> NodeKind {
        self.doc.node(self.id).kind
    }

    pub fn is_section(&self) -> bool {
        self.kind() == NodeKind::Section
    }

    pub fn is_value(&self) -> bool {
        self.kind() == NodeKind::Value
    }

    /// Accumulated raw text of a value node.
    pub fn raw(&self) -> &'a str {
        &self.doc.node(self.id).raw
    }

    /// Typed value; `Value::Unset` for sections and the root.
    pub fn value(&self) -> &'a Value {
        &self.doc.node(self.id).value
    }

    /// Parse error recorded for this value, if any.
    pub fn error(&self) -> Option<&'a TomlError> {
        self.doc.node(self.id).error.as_ref()
    }

    /// 1-based source line that created the node, `0` for the root.
    pub fn line(&self) -> usize {
        self.doc.node(self.id).line
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc
            .node(self.id)
            .parent
            .map(|id| NodeRef::new(self.doc, id))
    }

    /// Full dotted path from the root, e.g. `servers.alpha.ip`.
    pub fn full_name(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(*self);
        while let Some(node) = current {
            if node.kind() == NodeKind::Root {
                break;
            }
            segments.push(node.name());
            current = node.parent();
        }
        segments.reverse();
        segments.join(".")
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        doc.node(self.id)
            .children
            .values()
            .map(move |id| NodeRef::new(doc, *id))
    }

    pub fn sections(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|child| child.is_section())
    }

    pub fn values(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|child| child.is_value())
    }

    /// Section at `path` relative to this node.
    pub fn get_section(&self, path: &str) -> Option<NodeRef<'a>> {
        find_section(self.doc, self.id, path).map(|id| NodeRef::new(self.doc, id))
    }

    /// Value node at `path` relative to this node. The last segment names the
    /// value, the ones before it name sections.
    pub fn get_leaf(&self, path: &str) -> Option<NodeRef<'a>> {
        find_leaf(self.doc, self.id, path).map(|id| NodeRef::new(self.doc, id))
    }

    pub fn get_value(&self, path: &str) -> Option<&'a Value> {
        self.get_leaf(path).map(|leaf| leaf.value())
    }
}

impl Document {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, Document::ROOT)
    }

    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Looks up the section at a dotted path such as `servers.alpha`.
    pub fn get_section(&self, path: &str) -> Option<NodeRef<'_>> {
        self.root().get_section(path)
    }

    /// Looks up the value node at a dotted path such as `servers.alpha.ip`.
    pub fn get_leaf(&self, path: &str) -> Option<NodeRef<'_>> {
        self.root().get_leaf(path)
    }

    /// Looks up a value by dotted path. Returns `Some(&Value::Invalid)` for a
    /// key that exists but failed to parse.
    pub fn get_value(&self, path: &str) -> Option<&Value> {
        self.root().get_value(path)
    }
}

fn find_section(doc: &Document, from: NodeId, path: &str) -> Option<NodeId> {
    path.split('.').try_fold(from, |current, segment| {
        let child = *doc.node(current).children.get(segment)?;
        (doc.node(child).kind == NodeKind::Section).then_some(child)
    })
}

fn find_leaf(doc: &Document, from: NodeId, path: &str) -> Option<NodeId> {
    let (section, leaf) = match path.rsplit_once('.') {
        Some((section_path, leaf)) => (find_section(doc, from, section_path)?, leaf),
        None => (from, path),
    };

    let child = *doc.node(section).children.get(leaf)?;
    (doc.node(child).kind == NodeKind::Value).then_some(child)
}
