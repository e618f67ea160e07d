//! Declarative Nodes
//!
//! A [`DeclarativeNode`] describes a node that does not exist yet: a tag, an
//! optional attribute map and an optional list of children. `render()`
//! implementations return a tree of them, the composer turns them into live
//! handles, and the reconciler diffs their flattened form across renders.
//!
//! # Construction
//!
//! [`DeclarativeNode::create`] accepts loosely typed arguments the way a
//! node-building call does: the first argument is the attribute carrier
//! unless it is itself a node or component, and every remaining argument must
//! be a node or component. A single argument of any other kind makes the
//! whole children list collapse to `None`. Partial lists are never produced.
//!
//! [`build`] is the typed shorthand used by most `render()` implementations.

use serde_json::Value;

use crate::component::ComponentRef;
use crate::util::Record;

use super::Tag;

/// A child slot of a declarative node.
#[derive(Debug, Clone)]
pub enum Child {
    /// A further node description.
    Node(DeclarativeNode),
    /// An opaque stateful component that renders its own subtree.
    Component(ComponentRef),
}

impl From<DeclarativeNode> for Child {
    fn from(node: DeclarativeNode) -> Self {
        Child::Node(node)
    }
}

impl From<ComponentRef> for Child {
    fn from(component: ComponentRef) -> Self {
        Child::Component(component)
    }
}

/// One argument of a node-building call.
#[derive(Debug, Clone)]
pub enum Arg {
    /// An attribute map.
    Attributes(Record),
    /// A child node.
    Node(DeclarativeNode),
    /// A child component.
    Component(ComponentRef),
    /// Anything else, e.g. a bare string.
    Value(Value),
}

impl Arg {
    fn is_child(&self) -> bool {
        matches!(self, Arg::Node(_) | Arg::Component(_))
    }
}

impl From<Record> for Arg {
    fn from(attributes: Record) -> Self {
        Arg::Attributes(attributes)
    }
}

impl From<DeclarativeNode> for Arg {
    fn from(node: DeclarativeNode) -> Self {
        Arg::Node(node)
    }
}

impl From<ComponentRef> for Arg {
    fn from(component: ComponentRef) -> Self {
        Arg::Component(component)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Value(Value::String(text.to_string()))
    }
}

/// An immutable description of a node to be rendered.
#[derive(Debug, Clone)]
pub struct DeclarativeNode {
    tag: Tag,
    attributes: Option<Record>,
    children: Option<Vec<Child>>,
    /// Assigned lazily; see [`DeclarativeNode::assign_id`] and [`flatten`].
    identifier: Option<String>,
}

impl DeclarativeNode {
    /// Create a node from loosely typed node-building arguments.
    pub fn create(tag: Tag, args: Vec<Arg>) -> Self {
        let attributes = Self::find_attributes(&args);
        let skip = match args.first() {
            Some(first) if !first.is_child() => 1,
            _ => 0,
        };
        let children = Self::find_children(args.into_iter().skip(skip));

        Self {
            tag,
            attributes,
            children,
            identifier: None,
        }
    }

    /// Locate the attribute map among node-building arguments.
    ///
    /// Only the first argument can carry attributes. An object value counts
    /// as an attribute map; any other non-child value yields `None`.
    pub fn find_attributes(args: &[Arg]) -> Option<Record> {
        match args.first()? {
            Arg::Attributes(record) => Some(record.clone()),
            Arg::Value(Value::Object(map)) => Some(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// All-or-nothing: any non-child argument discards the whole list.
    fn find_children(args: impl Iterator<Item = Arg>) -> Option<Vec<Child>> {
        let mut children = Vec::new();
        for arg in args {
            match arg {
                Arg::Node(node) => children.push(Child::Node(node)),
                Arg::Component(component) => children.push(Child::Component(component)),
                Arg::Attributes(_) | Arg::Value(_) => return None,
            }
        }
        (!children.is_empty()).then_some(children)
    }

    /// The node's kind.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The attribute map, if one was supplied.
    pub fn attributes(&self) -> Option<&Record> {
        self.attributes.as_ref()
    }

    /// The children, if at least one well-typed child was supplied.
    pub fn children(&self) -> Option<&[Child]> {
        self.children.as_deref()
    }

    /// Consume the node, keeping only its children.
    pub fn into_children(self) -> Vec<Child> {
        self.children.unwrap_or_default()
    }

    /// True iff the node has a non-empty children list.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Assign an identifier unless one is already present.
    pub fn assign_id(&mut self, identifier: impl Into<String>) {
        if self.identifier.is_none() {
            self.identifier = Some(identifier.into());
        }
    }

    /// Overwrite the identifier. Used by the reconciler to carry a live
    /// handle's identifier across renders.
    pub(crate) fn set_identifier(&mut self, identifier: String) {
        self.identifier = Some(identifier);
    }

    /// Copy of this node without its children.
    fn leaf(&self) -> Self {
        Self {
            tag: self.tag,
            attributes: self.attributes.clone(),
            children: None,
            identifier: None,
        }
    }
}

/// Typed node-building call.
///
/// ```rust,ignore
/// let tree = build(Tag::Div, Some(record([("className", json!("top"))])), vec![
///     build(Tag::Button, Some(record([("textContent", json!("hey"))])), vec![]).into(),
/// ]);
/// ```
pub fn build(tag: Tag, attributes: Option<Record>, children: Vec<Child>) -> DeclarativeNode {
    DeclarativeNode {
        tag,
        attributes,
        children: (!children.is_empty()).then_some(children),
        identifier: None,
    }
}

/// Linearize `nodes` depth-first, pre-order.
///
/// Component references are skipped without descending into them: a
/// component owns its own subtree. Each emitted entry is a childless copy of
/// the node whose identifier is `"<tag>-<index>"`, `index` being its position
/// in the returned list.
pub fn flatten(nodes: &[Child]) -> Vec<DeclarativeNode> {
    let mut flat = Vec::new();
    flatten_into(nodes, &mut flat);
    flat
}

fn flatten_into(nodes: &[Child], flat: &mut Vec<DeclarativeNode>) {
    for child in nodes {
        match child {
            Child::Component(_) => continue,
            Child::Node(node) => {
                let mut entry = node.leaf();
                entry.set_identifier(format!("{}-{}", node.tag, flat.len()));
                flat.push(entry);
                if let Some(children) = node.children() {
                    flatten_into(children, flat);
                }
            }
        }
    }
}
