//! Tree Composition
//!
//! The composer turns a declarative tree into live nodes. It walks the
//! children of a node depth-first, creates one [`NodeHandle`] per
//! declarative node, appends it under its live parent and recurses.
//!
//! # Component Boundaries
//!
//! A component reference found among the children is instantiated (it
//! renders and composes its own subtree) and only its top-level handle is
//! appended. The handles the component created stay with the component; the
//! composer's flat list only contains handles it created itself.
//!
//! # Identifiers
//!
//! Each composition owns an [`IdGenerator`]. Handles are named
//! `"<tag>-<n>"` where `n` is the creation index, which is also the
//! position [`flatten`](crate::node::flatten) gives the matching declarative
//! node. That correspondence is what lets the reconciler find a handle from
//! a flattened slot.

use tracing::trace;

use crate::dom::{Document, NodeHandle};
use crate::error::Result;
use crate::node::{Child, Tag};

/// Mints handle identifiers for one composition.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for the next created handle.
    pub fn next_id(&mut self, tag: Tag) -> String {
        let id = format!("{tag}-{}", self.next);
        self.next += 1;
        id
    }

    /// Identifier for a composition root. Does not advance the counter.
    pub fn root_id(&self, tag: Tag) -> String {
        format!("{tag}-root")
    }
}

/// Output of [`TreeComposer::compose_tree`].
#[derive(Debug)]
pub struct ComposedTree {
    /// The parent handle, with the whole subtree attached under it.
    pub parent: NodeHandle,
    /// Every handle created directly, in creation (pre-) order.
    pub children: Vec<NodeHandle>,
}

/// Materializes declarative children into live nodes.
pub struct TreeComposer<'d> {
    document: &'d mut dyn Document,
    ids: IdGenerator,
}

impl<'d> TreeComposer<'d> {
    pub fn new(document: &'d mut dyn Document) -> Self {
        Self {
            document,
            ids: IdGenerator::new(),
        }
    }

    /// The document being composed into.
    pub fn document(&mut self) -> &mut dyn Document {
        &mut *self.document
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Compose `children` under `parent`, appending created handles to
    /// `accumulated`.
    pub fn compose_tree(
        &mut self,
        children: &[Child],
        mut parent: NodeHandle,
        mut accumulated: Vec<NodeHandle>,
    ) -> Result<ComposedTree> {
        self.compose_into(children, &mut parent, &mut accumulated)?;
        Ok(ComposedTree {
            parent,
            children: accumulated,
        })
    }

    fn compose_into(
        &mut self,
        children: &[Child],
        parent: &mut NodeHandle,
        accumulated: &mut Vec<NodeHandle>,
    ) -> Result<()> {
        for child in children {
            match child {
                Child::Component(component) => {
                    let top_level = component.instantiate(&mut *self.document)?;
                    parent.assign_id(self.ids.root_id(parent.tag()));
                    parent.append_child(&mut *self.document, &top_level);
                }
                Child::Node(node) => {
                    let mut handle = NodeHandle::create(&mut *self.document, node.tag(), node.attributes());
                    handle.assign_id(self.ids.next_id(node.tag()));
                    parent.append_child(&mut *self.document, &handle);
                    trace!(identifier = handle.identifier(), "composed node");
                    accumulated.push(handle.clone());

                    if let Some(grandchildren) = node.children() {
                        self.compose_into(grandchildren, &mut handle, accumulated)?;
                    }
                }
            }
        }
        Ok(())
    }
}
