//! Declarative Node Model
//!
//! This module describes what a component wants on screen, independent of
//! any live document:
//!
//! - [`Tag`]: the enumerated element kinds
//! - [`DeclarativeNode`]: tag, attributes and children of a node-to-be
//! - [`Child`]: a child slot, either a node or an opaque component
//! - [`flatten`]: the pre-order linearization the reconciler diffs against

mod declarative;
mod tag;

pub use declarative::{build, flatten, Arg, Child, DeclarativeNode};
pub use tag::Tag;
