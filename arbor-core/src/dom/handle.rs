//! Node Handles
//!
//! A [`NodeHandle`] wraps one live node: it remembers the node's tag, the
//! attribute map last applied to it and its identifier, and knows how to
//! push attributes into the [`Document`].
//!
//! # Attribute Application
//!
//! Every key of an attribute map is checked against the live node first.
//! Unknown keys are reported with `tracing::warn!` and skipped; the other
//! keys are still applied. The `style` key is special: its value is a map
//! applied one style property at a time, each validated on its own, and a
//! null `style` removes the style attribute altogether.

use std::fmt;

use serde_json::Value;
use smallvec::SmallVec;
use tracing::warn;

use crate::node::Tag;
use crate::util::{value_kind, Record};

use super::document::{Document, NodeKey};

/// A non-fatal problem found while applying attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDiagnostic {
    /// The key is not a property of the node.
    InvalidProperty { tag: Tag, key: String },
    /// A `style` entry is not a known style property.
    InvalidStyle { tag: Tag, property: String },
    /// `style` was neither a map nor null.
    MalformedStyle { tag: Tag, kind: &'static str },
}

impl fmt::Display for AttributeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProperty { tag, key } => {
                write!(f, "{key} is not a valid property of a {tag}")
            }
            Self::InvalidStyle { property, .. } => write!(f, "{property} is not a valid style"),
            Self::MalformedStyle { tag, kind } => {
                write!(f, "style of a {tag} must be a map, got {kind}")
            }
        }
    }
}

impl AttributeDiagnostic {
    /// The attribute key or style property at fault.
    pub fn key(&self) -> &str {
        match self {
            Self::InvalidProperty { key, .. } => key,
            Self::InvalidStyle { property, .. } => property,
            Self::MalformedStyle { .. } => "style",
        }
    }
}

/// Diagnostics from one attribute pass. Usually empty.
pub type Diagnostics = SmallVec<[AttributeDiagnostic; 2]>;

/// Wrapper around one live node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHandle {
    tag: Tag,
    /// The attribute map most recently applied.
    attributes: Record,
    identifier: Option<String>,
    node: NodeKey,
}

impl NodeHandle {
    /// Create a live node of `tag` and apply `attributes` to it.
    pub fn create(document: &mut dyn Document, tag: Tag, attributes: Option<&Record>) -> Self {
        let mut handle = Self {
            tag,
            attributes: Record::new(),
            identifier: None,
            node: document.create_node(tag),
        };
        if let Some(attributes) = attributes {
            handle.set_attributes(document, attributes);
        }
        handle
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn attributes(&self) -> &Record {
        &self.attributes
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Key of the live node currently behind this handle.
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// Assign an identifier unless one is already present.
    pub fn assign_id(&mut self, identifier: impl Into<String>) {
        if self.identifier.is_none() {
            self.identifier = Some(identifier.into());
        }
    }

    /// Apply every valid key of `attributes` to the live node.
    pub fn set_attributes(&mut self, document: &mut dyn Document, attributes: &Record) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.attributes = attributes.clone();

        for (key, value) in attributes {
            if !document.supports_property(self.node, key) {
                self.report(
                    &mut diagnostics,
                    AttributeDiagnostic::InvalidProperty {
                        tag: self.tag,
                        key: key.clone(),
                    },
                );
                continue;
            }
            if key == "style" {
                self.set_styles(document, value, &mut diagnostics);
            } else if !value.is_null() {
                document.set_property(self.node, key, value);
            }
        }

        diagnostics
    }

    fn set_styles(&self, document: &mut dyn Document, styles: &Value, diagnostics: &mut Diagnostics) {
        let styles = match styles {
            Value::Null => {
                document.remove_attribute(self.node, "style");
                return;
            }
            Value::Object(styles) => styles,
            other => {
                self.report(
                    diagnostics,
                    AttributeDiagnostic::MalformedStyle {
                        tag: self.tag,
                        kind: value_kind(other),
                    },
                );
                return;
            }
        };

        for (property, value) in styles {
            if document.supports_style(self.node, property) {
                document.set_style(self.node, property, value);
            } else {
                self.report(
                    diagnostics,
                    AttributeDiagnostic::InvalidStyle {
                        tag: self.tag,
                        property: property.clone(),
                    },
                );
            }
        }
    }

    fn report(&self, diagnostics: &mut Diagnostics, diagnostic: AttributeDiagnostic) {
        warn!(
            target: "arbor_core::dom",
            key = %diagnostic.key(),
            tag = %self.tag,
            identifier = self.identifier.as_deref().unwrap_or(""),
            "{diagnostic}"
        );
        diagnostics.push(diagnostic);
    }

    /// Append `child`'s live node under this one.
    pub fn append_child(&self, document: &mut dyn Document, child: &NodeHandle) {
        document.append_child(self.node, child.node);
    }

    /// Whether the live node has any children.
    pub fn has_children(&self, document: &dyn Document) -> bool {
        document.child_count(self.node) > 0
    }

    /// Swap the live node for a fresh one of `tag`, then apply `attributes`.
    ///
    /// The identifier is kept: callers index handles by it.
    pub fn replace_with(
        &mut self,
        document: &mut dyn Document,
        tag: Tag,
        attributes: Option<&Record>,
    ) -> Diagnostics {
        let replacement = document.create_node(tag);
        document.replace_node(self.node, replacement);
        self.node = replacement;
        self.tag = tag;
        self.attributes = Record::new();

        match attributes {
            Some(attributes) => self.set_attributes(document, attributes),
            None => Diagnostics::new(),
        }
    }
}
