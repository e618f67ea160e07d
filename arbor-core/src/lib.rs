//! Arbor Core
//!
//! This crate provides the reconciliation engine for the Arbor declarative
//! UI library. It implements:
//!
//! - A declarative node model (tags, attribute maps, children)
//! - Tree composition from declarative nodes into live nodes
//! - Stateful components with positional diff/patch on state changes
//! - An in-memory document for hosts and tests
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `node`: Declarative nodes, tags and flattening
//! - `dom`: The live document contract, node handles and the in-memory document
//! - `compose`: Materializing declarative trees into live handles
//! - `component`: Stateful components, reconciliation and mounting
//! - `util`: Record helpers (loose equality, cloning)
//!
//! # Example
//!
//! ```rust,ignore
//! use arbor_core::prelude::*;
//! use serde_json::json;
//!
//! struct Counter;
//!
//! impl Component for Counter {
//!     fn render(&self, _props: Option<&Record>, state: &Record) -> Option<DeclarativeNode> {
//!         Some(build(Tag::Div, None, vec![
//!             build(Tag::Span, Some(record([("textContent", json!(state["count"].to_string()))])), vec![]).into(),
//!         ]))
//!     }
//! }
//!
//! let mut doc = MemoryDocument::new();
//! let root = doc.root();
//! let counter = ComponentRef::new(StatefulComponent::new(Counter, None, record([("count", json!(0))])));
//! mount(&mut doc, root, &counter)?;
//!
//! // Patches the span's textContent in place.
//! counter.set_state(&mut doc, record([("count", json!(1))]), None)?;
//! ```

pub mod component;
pub mod compose;
pub mod dom;
pub mod error;
pub mod node;
pub mod util;

pub use error::{Error, Result};

/// Everything needed to write and mount components.
pub mod prelude {
    pub use crate::component::{
        mount, Component, ComponentRef, Patch, StatefulComponent, Update, UpdateOutcome,
    };
    pub use crate::dom::{Document, MemoryDocument, NodeHandle, NodeKey};
    pub use crate::node::{build, Arg, Child, DeclarativeNode, Tag};
    pub use crate::util::{record, Record};
    pub use crate::{Error, Result};
}
