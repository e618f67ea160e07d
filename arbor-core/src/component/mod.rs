//! Stateful Components and Reconciliation
//!
//! - [`Component`]: the authoring trait (`render` plus optional hooks)
//! - [`StatefulComponent`]: state, props and the rendered-tree cache
//! - [`ComponentRef`]: shared handle used inside declarative trees
//! - [`Patch`]: what a reconciliation pass changed
//! - [`mount`]: instantiate a root component into a host document

mod mount;
mod reconcile;
mod stateful;

pub use mount::mount;
pub use reconcile::Patch;
pub use stateful::{Component, ComponentRef, StatefulComponent, Update, UpdateOutcome, Updater};
