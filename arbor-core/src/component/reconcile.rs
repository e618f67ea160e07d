//! Reconciliation
//!
//! After a state change a component renders again and the new tree is
//! flattened. [`reconcile`] walks that list and compares each slot with the
//! slot at the same index in the previous render.
//!
//! # Algorithm
//!
//! 1. The first pass builds an identifier → handle index map from the
//!    component's child handles. It is cached for the component's lifetime.
//! 2. For slot `i`, the previous node's identifier must be in the map;
//!    otherwise the slot is skipped.
//! 3. The live handle's identifier is copied onto the new node so it
//!    survives into the next render.
//! 4. Tag changed: replace the live node. Attributes changed (under loose
//!    equality): patch them. Otherwise leave it alone.
//! 5. The new list becomes the baseline for the next pass.
//!
//! Matching is positional. Inserting or removing a node in the middle of a
//! children list shifts every later slot, and those slots are then compared
//! against the wrong previous node. Keyed matching would replace this
//! function and nothing else.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::dom::{Document, NodeHandle};
use crate::node::{DeclarativeNode, Tag};
use crate::util::{loosely_equal, Record};

/// A mutation applied by a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// The slot's live node was replaced by a new node of `tag`.
    Replace { identifier: String, tag: Tag },
    /// The slot's attributes were set to `attributes`.
    Update { identifier: String, attributes: Record },
}

/// What a component keeps from its last render.
#[derive(Debug)]
pub(crate) struct RenderCache {
    pub(crate) top_level: NodeHandle,
    pub(crate) child_handles: Vec<NodeHandle>,
    pub(crate) last_flattened: Vec<DeclarativeNode>,
    handle_index: Option<HashMap<String, usize>>,
}

impl RenderCache {
    pub(crate) fn new(
        top_level: NodeHandle,
        child_handles: Vec<NodeHandle>,
        last_flattened: Vec<DeclarativeNode>,
    ) -> Self {
        Self {
            top_level,
            child_handles,
            last_flattened,
            handle_index: None,
        }
    }
}

fn index_handles(handles: &[NodeHandle]) -> HashMap<String, usize> {
    handles
        .iter()
        .enumerate()
        .filter_map(|(slot, handle)| handle.identifier().map(|id| (id.to_string(), slot)))
        .collect()
}

/// Diff `next` against the cached render and patch the live handles.
pub(crate) fn reconcile(
    document: &mut dyn Document,
    cache: &mut RenderCache,
    mut next: Vec<DeclarativeNode>,
) -> Vec<Patch> {
    let RenderCache {
        child_handles,
        last_flattened,
        handle_index,
        ..
    } = cache;
    let index = handle_index.get_or_insert_with(|| index_handles(child_handles));
    let mut patches = Vec::new();

    for (position, node) in next.iter_mut().enumerate() {
        let Some(previous) = last_flattened.get(position) else {
            trace!(position, "no previous node for slot");
            continue;
        };
        let Some(handle) = previous
            .identifier()
            .and_then(|id| index.get(id))
            .and_then(|slot| child_handles.get_mut(*slot))
        else {
            trace!(position, identifier = previous.identifier(), "slot not in handle cache");
            continue;
        };

        let identifier = handle.identifier().unwrap_or_default().to_string();
        node.set_identifier(identifier.clone());

        if node.tag() != previous.tag() {
            debug!(%identifier, from = %previous.tag(), to = %node.tag(), "replacing node");
            handle.replace_with(document, node.tag(), node.attributes());
            patches.push(Patch::Replace {
                identifier,
                tag: node.tag(),
            });
            continue;
        }

        let Some(attributes) = node.attributes() else {
            continue;
        };
        let unchanged = previous
            .attributes()
            .is_some_and(|prev| loosely_equal(prev, attributes));
        if !unchanged {
            debug!(%identifier, "patching attributes");
            handle.set_attributes(document, attributes);
            patches.push(Patch::Update {
                identifier,
                attributes: attributes.clone(),
            });
        }
    }

    *last_flattened = next;
    patches
}
