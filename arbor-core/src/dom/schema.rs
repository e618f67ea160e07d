//! Property Schema
//!
//! The in-memory document has no browser to ask whether `className` is a
//! property of a `<div>`. A [`Schema`] answers that question instead. It is
//! plain data so hosts can ship their own as JSON:
//!
//! ```json
//! {
//!   "globalProperties": ["id", "className", "textContent", "style"],
//!   "tagProperties": { "a": ["href", "target"] },
//!   "styleProperties": ["color", "display"]
//! }
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::Tag;

const GLOBAL_PROPERTIES: &[&str] = &[
    "id",
    "className",
    "textContent",
    "innerText",
    "title",
    "hidden",
    "tabIndex",
    "lang",
    "dir",
    "style",
];

const STYLE_PROPERTIES: &[&str] = &[
    "color",
    "backgroundColor",
    "display",
    "position",
    "margin",
    "padding",
    "width",
    "height",
    "border",
    "fontSize",
    "fontWeight",
    "textAlign",
    "opacity",
    "flexDirection",
    "justifyContent",
    "alignItems",
];

/// Which properties and style properties a document accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Properties valid on every tag.
    #[serde(default)]
    pub global_properties: IndexSet<String>,
    /// Extra properties valid on specific tags.
    #[serde(default)]
    pub tag_properties: IndexMap<Tag, IndexSet<String>>,
    /// Style properties accepted inside a `style` map.
    #[serde(default)]
    pub style_properties: IndexSet<String>,
}

impl Schema {
    /// A schema that accepts nothing.
    pub fn empty() -> Self {
        Self {
            global_properties: IndexSet::new(),
            tag_properties: IndexMap::new(),
            style_properties: IndexSet::new(),
        }
    }

    /// Parse a schema from JSON. Missing sections are empty.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidSchema(e.to_string()))
    }

    /// Whether `key` is a valid property of a `tag` node.
    pub fn allows_property(&self, tag: Tag, key: &str) -> bool {
        self.global_properties.contains(key)
            || self
                .tag_properties
                .get(&tag)
                .is_some_and(|props| props.contains(key))
    }

    /// Whether `property` is a valid style property.
    pub fn allows_style(&self, property: &str) -> bool {
        self.style_properties.contains(property)
    }
}

fn set(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for Schema {
    fn default() -> Self {
        let tag_properties = [
            (Tag::A, set(&["href", "target", "rel"])),
            (Tag::Img, set(&["src", "alt", "width", "height"])),
            (Tag::Button, set(&["disabled", "type", "value"])),
            (
                Tag::Input,
                set(&["value", "type", "placeholder", "checked", "disabled", "name"]),
            ),
            (Tag::Textarea, set(&["value", "placeholder", "rows", "disabled"])),
            (Tag::Select, set(&["value", "disabled", "multiple"])),
            (Tag::Option, set(&["value", "selected"])),
            (Tag::Label, set(&["htmlFor"])),
            (Tag::Form, set(&["action", "method"])),
            (Tag::Td, set(&["colSpan", "rowSpan"])),
            (Tag::Th, set(&["colSpan", "rowSpan", "scope"])),
        ]
        .into_iter()
        .collect();

        Self {
            global_properties: set(GLOBAL_PROPERTIES),
            tag_properties,
            style_properties: set(STYLE_PROPERTIES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_covers_common_properties() {
        let schema = Schema::default();
        assert!(schema.allows_property(Tag::Div, "className"));
        assert!(schema.allows_property(Tag::A, "href"));
        assert!(!schema.allows_property(Tag::Div, "href"));
        assert!(schema.allows_style("color"));
        assert!(!schema.allows_style("colour"));
    }

    #[test]
    fn schema_loads_from_json() {
        let schema = Schema::from_json(
            r#"{
                "globalProperties": ["id"],
                "tagProperties": { "button": ["disabled"] }
            }"#,
        )
        .unwrap();

        assert!(schema.allows_property(Tag::Span, "id"));
        assert!(schema.allows_property(Tag::Button, "disabled"));
        assert!(!schema.allows_property(Tag::Span, "disabled"));
        assert!(schema.style_properties.is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = Schema::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }
}
