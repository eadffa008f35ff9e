use crate::error::CompileError;
use crate::schema::{Location, SchemaNode};
use serde_json::Value;
use std::fmt;

/// Classification of a schema fragment
///
/// The token of a classification ([`JsonType::token`]) is the key used for
/// target-type lookup. For references that is the last segment of the `$ref`
/// target, so `{"$ref": "#/definitions/contactObject"}` looks up `contactObject`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// `$ref`, carrying the referenced definition's name
    Reference(String),
    /// `enum`
    Enum,
    /// `oneOf`
    OneOf,
    /// `"type": "string"` with `"format": "uri"`
    Uri,
    /// Any other explicit `type` (`object`, `array`, `string`, `integer`, ...)
    Named(String),
}

impl JsonType {
    /// Lookup token
    pub fn token(&self) -> &str {
        match self {
            JsonType::Reference(target) => target,
            JsonType::Enum => "enum",
            JsonType::OneOf => "oneOf",
            JsonType::Uri => "uri",
            JsonType::Named(name) => name,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonType::Named(name) if name == "array")
    }

    pub fn is_reference_to(&self, target: &str) -> bool {
        matches!(self, JsonType::Reference(t) if t == target)
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Classify a schema fragment
///
/// Precedence: `$ref`, `enum`, `oneOf`, then the explicit `type` (with
/// `string` + `format: uri` reported as [`JsonType::Uri`]).
///
/// # Errors
///
/// [`CompileError::MalformedFragment`] if none of those keys is present, if
/// `type` is not a string, or if `$ref` is not a string naming a definition.
pub fn resolve_json_type(node: &SchemaNode, location: &Location) -> Result<JsonType, CompileError> {
    if let Some(reference) = node.get("$ref") {
        let reference = reference
            .as_str()
            .ok_or_else(|| CompileError::malformed(location, "'$ref' must be a string"))?;
        return reference_target(reference)
            .map(JsonType::Reference)
            .ok_or_else(|| {
                CompileError::malformed(
                    location,
                    format!("'$ref' {reference:?} does not name a definition"),
                )
            });
    }
    if node.contains_key("enum") {
        return Ok(JsonType::Enum);
    }
    if node.contains_key("oneOf") {
        return Ok(JsonType::OneOf);
    }
    match node.get("type") {
        Some(Value::String(ty)) => {
            if ty == "string" && node.get("format").and_then(Value::as_str) == Some("uri") {
                Ok(JsonType::Uri)
            } else {
                Ok(JsonType::Named(ty.clone()))
            }
        }
        Some(_) => Err(CompileError::malformed(location, "'type' must be a string")),
        None => Err(CompileError::malformed(
            location,
            "fragment has none of '$ref', 'enum', 'oneOf' or 'type'",
        )),
    }
}

/// Last segment of a reference, JSON-pointer unescaped
///
/// `#/definitions/$ref` → `$ref`, `#/Widget` → `Widget`.
pub fn reference_target(reference: &str) -> Option<String> {
    let segment = reference.rsplit(['/', '#']).next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.replace("~1", "/").replace("~0", "~"))
}
