//! Live Document Layer
//!
//! The reconciliation engine never touches a concrete document. It talks to
//! the [`Document`] trait through [`NodeHandle`]s, which wrap a single live
//! node each.
//!
//! - [`Document`] / [`NodeKey`]: the live-node primitive
//! - [`NodeHandle`]: attribute application, appending, replacement
//! - [`MemoryDocument`]: an arena-backed document with a mutation journal
//! - [`Schema`]: which properties and style properties are valid

mod document;
mod handle;
mod memory;
mod schema;

pub use document::{Document, NodeKey};
pub use handle::{AttributeDiagnostic, Diagnostics, NodeHandle};
pub use memory::{MemoryDocument, MemoryNode, Mutation};
pub use schema::Schema;
