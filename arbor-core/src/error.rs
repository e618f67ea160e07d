//! Error Types
//!
//! Almost everything in Arbor degrades instead of failing: invalid attribute
//! keys are warned about and skipped, malformed children collapse silently,
//! and identifier-cache misses during reconciliation are no-ops. The variants
//! below cover the few places where the caller has to be told.

use thiserror::Error;

/// Errors produced by the reconciliation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A component rendered nothing where a live tree is required.
    #[error("component `{component}` rendered nothing")]
    EmptyRender { component: String },

    /// `set_state` was called on a component that has no live tree yet.
    #[error("component `{component}` is not mounted")]
    NotMounted { component: String },

    /// The component is already borrowed, e.g. it appears inside its own tree.
    #[error("component `{component}` is already being rendered")]
    ComponentBusy { component: String },

    /// A tag name that does not map to a known node kind.
    #[error("unknown tag `{0}`")]
    UnknownTag(String),

    /// Only arrays and objects can be cloned.
    #[error("value of type {kind} is not cloneable")]
    NotCloneable { kind: &'static str },

    /// A schema document could not be parsed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A state patch must be a JSON object.
    #[error("value of type {kind} is not a record")]
    NotARecord { kind: &'static str },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
