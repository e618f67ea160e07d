//! The live-node primitive the engine mutates.

use serde_json::Value;

use crate::node::Tag;

/// Key of a live node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    /// Wrap a raw index. Only meaningful to the document that issued it.
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    pub fn raw(&self) -> usize {
        self.0
    }
}

/// A host document: creates live nodes and applies mutations to them.
///
/// Implementations answer "is this key valid" themselves; [`NodeHandle`]
/// uses those answers to decide between applying and warning.
///
/// [`NodeHandle`]: super::NodeHandle
pub trait Document {
    /// Create a detached node of the given kind.
    fn create_node(&mut self, tag: Tag) -> NodeKey;

    /// Whether `key` is a property the node understands.
    fn supports_property(&self, node: NodeKey, key: &str) -> bool;

    /// Assign a property.
    fn set_property(&mut self, node: NodeKey, key: &str, value: &Value);

    /// Whether `property` is a style property the node understands.
    fn supports_style(&self, node: NodeKey, property: &str) -> bool;

    /// Assign one style property.
    fn set_style(&mut self, node: NodeKey, property: &str, value: &Value);

    /// Remove an attribute (and everything set through it) from the node.
    fn remove_attribute(&mut self, node: NodeKey, name: &str);

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    fn append_child(&mut self, parent: NodeKey, child: NodeKey);

    /// Put `new` where `old` currently is.
    fn replace_node(&mut self, old: NodeKey, new: NodeKey);

    /// Number of live children under `node`.
    fn child_count(&self, node: NodeKey) -> usize;
}
