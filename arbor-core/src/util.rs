//! Record Utilities
//!
//! Attributes, props and state are all flat records of JSON values. This
//! module holds the helpers shared by the node model and the reconciler.
//!
//! # Loose Equality
//!
//! Records are compared by coercing each value to a string and stripping all
//! whitespace before comparing. Two records that only differ in formatting
//! (`"a b"` vs `"ab"`, `1` vs `"1"`) are considered equal, and an update that
//! is loosely equal to the current state is skipped entirely.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result};

/// A flat, insertion-ordered map of names to values.
pub type Record = IndexMap<String, Value>;

/// Returns true if every entry of `incoming` is present in `current` with a
/// loosely equal value.
///
/// The check is one-sided: keys that only exist in `current` are ignored,
/// which matches how a shallow merge of `incoming` onto `current` would be a
/// no-op. Every incoming key must match: one differing key among several
/// matching ones makes the result false, so a partial match never skips an
/// update.
pub fn loosely_equal(current: &Record, incoming: &Record) -> bool {
    incoming.iter().all(|(key, value)| {
        current
            .get(key)
            .is_some_and(|existing| normalize(existing) == normalize(value))
    })
}

/// String form of a value with all whitespace removed.
fn normalize(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Clone an array or object value.
///
/// Arrays are cloned element by element, recursing into nested arrays.
/// Objects are copied shallowly. Every other value is rejected.
pub fn clone_value(value: &Value) -> Result<Value> {
    match value {
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Array(_) => clone_value(item),
                    other => Ok(other.clone()),
                })
                .collect::<Result<Vec<_>>>()?,
        )),
        Value::Object(map) => Ok(Value::Object(map.clone())),
        other => Err(Error::NotCloneable {
            kind: value_kind(other),
        }),
    }
}

/// Human-readable name of a value's JSON type.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a [`Record`] from `(name, value)` pairs.
///
/// ```rust,ignore
/// let attrs = record([("className", "top".into())]);
/// ```
pub fn record<K, I>(entries: I) -> Record
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .collect()
}
