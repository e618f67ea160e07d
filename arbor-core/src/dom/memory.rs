//! In-Memory Document
//!
//! [`MemoryDocument`] is an arena-backed [`Document`]. It keeps enough of a
//! live tree to check the engine's work (tags, properties, styles, parent and
//! child links) and records every mutation in a journal, so callers can
//! assert not only on the resulting tree but on how it got there.
//!
//! # Replacement
//!
//! `replace_node(old, new)` puts `new` at `old`'s position under `old`'s
//! parent and moves `old`'s children under `new`. The old node stays in the
//! arena, marked detached, so stale keys never dangle.
//!
//! This differs from a browser's `replaceWith`, which leaves the children on
//! the detached node. Here a replaced slot keeps its subtree in the live
//! tree, so descendants that still hold handles are not orphaned.

use serde_json::Value;

use crate::node::Tag;
use crate::util::Record;

use super::document::{Document, NodeKey};
use super::schema::Schema;

/// One recorded mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { node: NodeKey, tag: Tag },
    SetProperty { node: NodeKey, key: String, value: Value },
    SetStyle { node: NodeKey, property: String, value: Value },
    RemoveAttribute { node: NodeKey, name: String },
    Append { parent: NodeKey, child: NodeKey },
    Replace { old: NodeKey, new: NodeKey },
}

/// A node stored in a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    tag: Tag,
    properties: Record,
    styles: Record,
    children: Vec<NodeKey>,
    parent: Option<NodeKey>,
    detached: bool,
}

impl MemoryNode {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            properties: Record::new(),
            styles: Record::new(),
            children: Vec::new(),
            parent: None,
            detached: false,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn properties(&self) -> &Record {
        &self.properties
    }

    pub fn styles(&self) -> &Record {
        &self.styles
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// True once the node has been swapped out by `replace_node`.
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Arena-backed document with a mutation journal.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    schema: Schema,
    journal: Vec<Mutation>,
    root: NodeKey,
}

impl MemoryDocument {
    /// Create a document with the default [`Schema`].
    pub fn new() -> Self {
        Self::with_schema(Schema::default())
    }

    /// Create a document that validates keys against `schema`.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            nodes: vec![MemoryNode::new(Tag::Body)],
            schema,
            journal: Vec::new(),
            root: NodeKey::new(0),
        }
    }

    /// The pre-created `body` node.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn node(&self, key: NodeKey) -> Option<&MemoryNode> {
        self.nodes.get(key.raw())
    }

    /// Children of `key`, empty for unknown keys.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.node(key).map(MemoryNode::children).unwrap_or(&[])
    }

    pub fn property(&self, key: NodeKey, name: &str) -> Option<&Value> {
        self.node(key)?.properties.get(name)
    }

    pub fn style(&self, key: NodeKey, property: &str) -> Option<&Value> {
        self.node(key)?.styles.get(property)
    }

    /// Every mutation applied since creation or the last [`clear_journal`].
    ///
    /// [`clear_journal`]: MemoryDocument::clear_journal
    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn node_mut(&mut self, key: NodeKey) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(key.raw())
    }

    fn detach_from_parent(&mut self, child: NodeKey) {
        let Some(parent) = self.node(child).and_then(MemoryNode::parent) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|c| *c != child);
        }
        if let Some(child) = self.node_mut(child) {
            child.parent = None;
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn create_node(&mut self, tag: Tag) -> NodeKey {
        let key = NodeKey::new(self.nodes.len());
        self.nodes.push(MemoryNode::new(tag));
        self.journal.push(Mutation::Create { node: key, tag });
        key
    }

    fn supports_property(&self, node: NodeKey, key: &str) -> bool {
        self.node(node)
            .is_some_and(|n| self.schema.allows_property(n.tag, key))
    }

    fn set_property(&mut self, node: NodeKey, key: &str, value: &Value) {
        if let Some(n) = self.node_mut(node) {
            n.properties.insert(key.to_string(), value.clone());
            self.journal.push(Mutation::SetProperty {
                node,
                key: key.to_string(),
                value: value.clone(),
            });
        }
    }

    fn supports_style(&self, node: NodeKey, property: &str) -> bool {
        self.node(node).is_some() && self.schema.allows_style(property)
    }

    fn set_style(&mut self, node: NodeKey, property: &str, value: &Value) {
        if let Some(n) = self.node_mut(node) {
            n.styles.insert(property.to_string(), value.clone());
            self.journal.push(Mutation::SetStyle {
                node,
                property: property.to_string(),
                value: value.clone(),
            });
        }
    }

    fn remove_attribute(&mut self, node: NodeKey, name: &str) {
        if let Some(n) = self.node_mut(node) {
            if name == "style" {
                n.styles.clear();
            }
            n.properties.shift_remove(name);
            self.journal.push(Mutation::RemoveAttribute {
                node,
                name: name.to_string(),
            });
        }
    }

    fn append_child(&mut self, parent: NodeKey, child: NodeKey) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        self.detach_from_parent(child);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        self.journal.push(Mutation::Append { parent, child });
    }

    fn replace_node(&mut self, old: NodeKey, new: NodeKey) {
        if old == new || self.node(old).is_none() || self.node(new).is_none() {
            return;
        }
        self.detach_from_parent(new);

        let parent = self.node(old).and_then(MemoryNode::parent);
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            if let Some(slot) = parent.children.iter_mut().find(|c| **c == old) {
                *slot = new;
            }
        }

        let moved = match self.node_mut(old) {
            Some(o) => {
                o.parent = None;
                o.detached = true;
                std::mem::take(&mut o.children)
            }
            None => Vec::new(),
        };
        for child in &moved {
            if let Some(c) = self.node_mut(*child) {
                c.parent = Some(new);
            }
        }
        if let Some(n) = self.node_mut(new) {
            n.parent = parent;
            n.children.extend(moved);
        }

        self.journal.push(Mutation::Replace { old, new });
    }

    fn child_count(&self, node: NodeKey) -> usize {
        self.children(node).len()
    }
}
