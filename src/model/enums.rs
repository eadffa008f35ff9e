use super::first_char_upper;
use crate::error::CompileError;
use crate::schema::{title_of, Location, SchemaNode};
use serde_json::Value;
use std::collections::BTreeMap;

/// One enumeration constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Value as written in the schema
    pub value: String,
    /// Sanitised identifier, see [`enum_identifier`]
    pub identifier: String,
}

/// An `enum` fragment: its name and ordered constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumModel {
    pub name: String,
    pub values: Vec<EnumValue>,
}

impl EnumModel {
    /// Build from an `enum` fragment
    ///
    /// # Errors
    ///
    /// [`CompileError::MalformedFragment`] when the fragment has no `title`, its
    /// `enum` is not an array, or a value is not a string.
    pub fn from_fragment(node: &SchemaNode, location: &Location) -> Result<Self, CompileError> {
        let name = title_of(node)
            .map(first_char_upper)
            .ok_or_else(|| CompileError::malformed(location, "'enum' fragment without 'title'"))?;
        let items = node
            .get("enum")
            .and_then(Value::as_array)
            .ok_or_else(|| CompileError::malformed(location, "'enum' must be an array"))?;
        let values = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let value = item.as_str().ok_or_else(|| {
                    CompileError::malformed(
                        location.child("enum").child(&index.to_string()),
                        "enum values must be strings",
                    )
                })?;
                Ok(EnumValue {
                    value: value.to_string(),
                    identifier: enum_identifier(value),
                })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;
        Ok(EnumModel { name, values })
    }

    /// Identifiers shared by more than one value, with the values mapping to them
    pub fn collisions(&self) -> Vec<(String, Vec<String>)> {
        let mut by_identifier: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for value in &self.values {
            by_identifier
                .entry(value.identifier.as_str())
                .or_default()
                .push(value.value.clone());
        }
        by_identifier
            .into_iter()
            .filter(|(_, values)| values.len() > 1)
            .map(|(identifier, values)| (identifier.to_string(), values))
            .collect()
    }
}

/// Identifier for an enum value
///
/// Prefix `_` unless the value starts with a letter, then drop every `.` and `-`:
/// `1.2.6` → `_126`, `foo-bar` → `foobar`.
pub fn enum_identifier(value: &str) -> String {
    let starts_with_letter = value.chars().next().is_some_and(char::is_alphabetic);
    let prefixed = if starts_with_letter {
        value.to_string()
    } else {
        format!("_{value}")
    };
    prefixed.replace(['.', '-'], "")
}
