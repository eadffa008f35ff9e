use serde_json::{Map, Value};

/// One object of the schema document
///
/// `serde_json` is built with `preserve_order`, so iteration follows the
/// order keys appear in the source.
pub type SchemaNode = Map<String, Value>;

/// Key holding the declared properties of an object fragment
pub const PROPERTIES: &str = "properties";
/// Key holding reusable sub-schemas
pub const DEFINITIONS: &str = "definitions";
/// Key holding the pattern-keyed open map of an object fragment
pub const PATTERN_PROPERTIES: &str = "patternProperties";
/// Property key that never becomes a property
pub const SCHEMA_KEYWORD: &str = "$schema";

/// Location of a fragment inside the document, rendered as a JSON pointer
///
/// Only used for diagnostics: every error and lint issue carries one so the
/// offending fragment can be found in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location(String);

impl Location {
    /// The document root (`#`)
    pub fn root() -> Self {
        Location("#".to_string())
    }

    /// A child location, `/`-joined with `~` and `/` escaped
    pub fn child(&self, segment: &str) -> Self {
        let escaped = segment.replace('~', "~0").replace('/', "~1");
        Location(format!("{}/{}", self.0, escaped))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Location> for String {
    fn from(location: &Location) -> Self {
        location.0.clone()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.0
    }
}

/// `title` of a fragment, if it is a string
pub fn title_of(node: &SchemaNode) -> Option<&str> {
    node.get("title").and_then(Value::as_str)
}

/// Object-valued entry of a fragment, if present and an object
pub fn object_entry<'a>(node: &'a SchemaNode, key: &str) -> Option<&'a SchemaNode> {
    node.get(key).and_then(Value::as_object)
}

/// Whether a fragment declares `"type": "object"`
pub fn is_object_typed(node: &SchemaNode) -> bool {
    node.get("type").and_then(Value::as_str) == Some("object")
}
