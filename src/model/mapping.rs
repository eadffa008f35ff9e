use super::first_char_upper;
use super::registry::{TypeRegistry, Typed};
use super::resolver::{resolve_json_type, JsonType};
use crate::error::CompileError;
use crate::schema::{title_of, Location, SchemaNode};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Token of the nested-schema definition
pub const NESTED_SCHEMA_TOKEN: &str = "JSONSchema";
/// Token of the placeholder standing for the caller's document type
pub const DOCUMENT_SCHEMA_TOKEN: &str = "jsonSchemaObject";
/// Token of the open specification-extension definition
pub const SPEC_EXTENSION_TOKEN: &str = "specificationExtension";
/// Definitions that never become classes of their own
pub const SKIPPED_DEFINITIONS: [&str; 2] = [SPEC_EXTENSION_TOKEN, NESTED_SCHEMA_TOKEN];
/// Target type printed through `toExternalForm()`
pub const URL_TYPE: &str = "URL";
/// Name of the builtin union synthesized for nested-schema references
pub const NESTED_UNION_NAME: &str = "JsonSchemaOrReference";
/// Document type used when the caller supplies none
pub const DEFAULT_DOCUMENT_TYPE: &str = "io.github.sebastiantoepfer.jsonschema.JsonSchema";

const PRINTABLE: &str = "io.github.sebastiantoepfer.ddd.common.Printable";

/// A capability interface implemented by a target type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Capability {
    pub name: String,
    pub qualified_name: String,
}

impl Capability {
    /// Capability from a qualified name; the simple name is the last `.` segment
    pub fn from_qualified(qualified_name: &str) -> Self {
        Capability {
            name: simple_name(qualified_name).to_string(),
            qualified_name: qualified_name.to_string(),
        }
    }
}

/// One row of the mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    pub name: String,
    pub qualified_name: Option<String>,
    pub nullable: bool,
    pub interfaces: Vec<Capability>,
}

impl TargetType {
    /// Nullable type without import
    pub fn simple(name: &str) -> Self {
        TargetType {
            name: name.to_string(),
            qualified_name: None,
            nullable: true,
            interfaces: Vec::new(),
        }
    }

    /// Non-nullable type without import
    pub fn primitive(name: &str) -> Self {
        TargetType {
            nullable: false,
            ..TargetType::simple(name)
        }
    }

    /// Nullable type imported under `qualified_name`
    pub fn qualified(name: &str, qualified_name: &str) -> Self {
        TargetType {
            qualified_name: Some(qualified_name.to_string()),
            ..TargetType::simple(name)
        }
    }

    pub fn with_interface(mut self, capability: Capability) -> Self {
        self.interfaces.push(capability);
        self
    }
}

/// Outcome of resolving a fragment against the mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub raw: JsonType,
    pub name: String,
    pub nullable: bool,
    pub interfaces: Vec<Capability>,
}

/// Classification → target type table
///
/// Holds the builtin rows plus the row for the caller-supplied document type.
/// Also a [`TypeRegistry`]: the qualified name of every row whose name matches
/// a property's primary or generic type is an import of that property.
#[derive(Debug, Clone)]
pub struct TypeMapping {
    table: BTreeMap<String, TargetType>,
}

impl Default for TypeMapping {
    fn default() -> Self {
        TypeMapping::new(DEFAULT_DOCUMENT_TYPE)
    }
}

impl TypeMapping {
    /// Builtin table with `document_type` (a qualified name) standing in for
    /// the document placeholder
    pub fn new(document_type: &str) -> Self {
        let document = Capability::from_qualified(document_type);
        let rows = [
            ("integer", TargetType::primitive("long")),
            ("boolean", TargetType::primitive("boolean")),
            ("uri", TargetType::qualified(URL_TYPE, "java.net.URL")),
            ("array", TargetType::qualified("List", "java.util.List")),
            ("object", TargetType::qualified("Printable", PRINTABLE)),
            ("$ref", TargetType::simple("String")),
            (NESTED_SCHEMA_TOKEN, TargetType::simple(NESTED_UNION_NAME)),
            (SPEC_EXTENSION_TOKEN, TargetType::qualified("Printable", PRINTABLE)),
            (
                DOCUMENT_SCHEMA_TOKEN,
                TargetType::qualified(&document.name, &document.qualified_name)
                    .with_interface(document.clone()),
            ),
        ];
        TypeMapping {
            table: rows
                .into_iter()
                .map(|(token, target)| (token.to_string(), target))
                .collect(),
        }
    }

    /// Add or replace the row for `token`
    pub fn with_type(mut self, token: &str, target: TargetType) -> Self {
        self.table.insert(token.to_string(), target);
        self
    }

    pub fn get(&self, token: &str) -> Option<&TargetType> {
        self.table.get(token)
    }

    /// Resolve a fragment to its target type name, nullability and interfaces
    ///
    /// # Errors
    ///
    /// [`CompileError::MalformedFragment`] if the fragment cannot be classified,
    /// or is an `enum`/`oneOf` without a `title`.
    pub fn resolve(
        &self,
        node: &SchemaNode,
        location: &Location,
    ) -> Result<ResolvedType, CompileError> {
        let raw = resolve_json_type(node, location)?;
        let (name, nullable, interfaces) = match &raw {
            JsonType::Enum | JsonType::OneOf => {
                let title = title_of(node).ok_or_else(|| {
                    CompileError::malformed(location, format!("'{raw}' fragment without 'title'"))
                })?;
                (first_char_upper(title), true, Vec::new())
            }
            other => match self.table.get(other.token()) {
                Some(target) => (
                    target.name.clone(),
                    target.nullable,
                    target.interfaces.clone(),
                ),
                None => (first_char_upper(other.token()), true, Vec::new()),
            },
        };
        Ok(ResolvedType {
            raw,
            name,
            nullable,
            interfaces,
        })
    }

    fn qualified_names_of_type(&self, type_name: &str) -> impl Iterator<Item = &str> + '_ {
        let type_name = type_name.to_string();
        self.table
            .values()
            .filter(move |target| target.name == type_name)
            .filter_map(|target| target.qualified_name.as_deref())
    }
}

impl TypeRegistry for TypeMapping {
    fn qualified_names_of(&self, typed: &dyn Typed) -> Result<BTreeSet<String>, CompileError> {
        let mut names: BTreeSet<String> = self
            .qualified_names_of_type(typed.type_name())
            .map(str::to_string)
            .collect();
        if let Some(generic) = typed.generic_type() {
            names.extend(self.qualified_names_of_type(generic).map(str::to_string));
        }
        Ok(names)
    }
}

/// Fixed import sets every generated class starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBase {
    /// Imports of every object class
    pub object: Vec<String>,
    /// Extra imports of object classes with additional values
    pub additional_values: Vec<String>,
    /// Imports of every union class
    pub union: Vec<String>,
}

impl Default for ImportBase {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        ImportBase {
            object: owned(&[
                "javax.annotation.processing.Generated",
                "io.github.sebastiantoepfer.ddd.common.Media",
                PRINTABLE,
                "io.github.sebastiantoepfer.ddd.printables.core.CompositePrintable",
                "java.util.Objects",
            ]),
            additional_values: owned(&[
                "java.util.HashMap",
                "java.util.Map",
                "java.util.regex.Pattern",
                "io.github.sebastiantoepfer.ddd.printables.core.NamedPrintable",
            ]),
            union: owned(&[
                "javax.annotation.processing.Generated",
                "io.github.sebastiantoepfer.ddd.common.Media",
                PRINTABLE,
                "java.util.Objects",
            ]),
        }
    }
}

/// Last `.`-separated segment of a qualified name
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name.rsplit('.').next().unwrap_or(qualified_name)
}
