use super::adapters::AdapterRegistry;
use super::class::{
    AdditionalValues, ClassModel, ObjectClassModel, UnionBranch, UnionClassModel,
};
use super::enums::EnumModel;
use super::first_char_upper;
use super::mapping::{
    ImportBase, ResolvedType, TypeMapping, DOCUMENT_SCHEMA_TOKEN, NESTED_SCHEMA_TOKEN,
    NESTED_UNION_NAME, SKIPPED_DEFINITIONS, URL_TYPE,
};
use super::property::PropertyModel;
use super::registry::{CompositeTypeRegistry, TypeRegistry};
use super::resolver::JsonType;
use crate::error::CompileError;
use crate::schema::{
    is_object_typed, object_entry, title_of, Location, SchemaNode, DEFINITIONS,
    PATTERN_PROPERTIES, PROPERTIES, SCHEMA_KEYWORD,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Name of a root fragment without `title`
pub const DEFAULT_ROOT_NAME: &str = "Document";

/// Containers searched for nested object classes, in this order
const CLASS_CONTAINERS: [&str; 2] = [PROPERTIES, DEFINITIONS];

/// Schema → class model compiler
///
/// Holds the mapping table, the adapter registry and the composed import
/// registry. The compiler itself is immutable: [`SchemaCompiler::compile`] can
/// be called any number of times and yields the same sequence for the same
/// document.
///
/// # Example
///
/// ```
/// use openrpc_gen::model::SchemaCompiler;
/// use serde_json::json;
///
/// let schema = json!({
///     "title": "Contact",
///     "type": "object",
///     "properties": { "name": { "type": "string" } }
/// });
/// let compiler = SchemaCompiler::default();
/// let classes = compiler
///     .compile_all(schema.as_object().unwrap())
///     .unwrap();
/// assert_eq!(classes[0].name(), "Contact");
/// ```
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    mapping: Arc<TypeMapping>,
    adapters: Arc<AdapterRegistry>,
    registry: CompositeTypeRegistry,
    imports: ImportBase,
    root_name: String,
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        SchemaCompiler::new(TypeMapping::default(), AdapterRegistry::default())
    }
}

impl SchemaCompiler {
    /// Compiler whose import registry is the mapping followed by the adapters
    pub fn new(mapping: TypeMapping, adapters: AdapterRegistry) -> Self {
        let mapping = Arc::new(mapping);
        let adapters = Arc::new(adapters);
        let registry = CompositeTypeRegistry::new()
            .with_registry(Arc::clone(&mapping) as Arc<dyn TypeRegistry>)
            .with_registry(Arc::clone(&adapters) as Arc<dyn TypeRegistry>);
        SchemaCompiler {
            mapping,
            adapters,
            registry,
            imports: ImportBase::default(),
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }

    /// Add a registry contributing extra imports
    pub fn with_registry(mut self, registry: Arc<dyn TypeRegistry>) -> Self {
        self.registry = self.registry.with_registry(registry);
        self
    }

    pub fn with_imports(mut self, imports: ImportBase) -> Self {
        self.imports = imports;
        self
    }

    /// Name used for a root fragment without `title`
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    pub fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Lazily compile a document
    ///
    /// Yields the root class first, then every object-typed entry of
    /// `properties` and `definitions` depth-first in source order. The
    /// sequence stops after the first error.
    pub fn compile<'s>(&'s self, schema: &'s SchemaNode) -> ClassModels<'s> {
        ClassModels {
            compiler: self,
            pending: vec![Pending {
                node: schema,
                key: None,
                location: Location::root(),
            }],
            failed: false,
        }
    }

    /// Compile a whole document at once
    ///
    /// # Errors
    ///
    /// The first [`CompileError`] met in compile order.
    pub fn compile_all(&self, schema: &SchemaNode) -> Result<Vec<ClassModel>, CompileError> {
        self.compile(schema).collect()
    }

    fn compile_object(
        &self,
        node: &SchemaNode,
        key: Option<&str>,
        location: &Location,
    ) -> Result<ObjectClassModel, CompileError> {
        let name = title_of(node)
            .or(key)
            .map(first_char_upper)
            .unwrap_or_else(|| self.root_name.clone());
        debug!(class = %name, location = %location, "compiling object class");

        let required = required_names(node, location)?;
        let properties = match node.get(PROPERTIES) {
            None => Vec::new(),
            Some(Value::Object(entries)) => entries
                .iter()
                .filter(|(key, _)| key.as_str() != SCHEMA_KEYWORD)
                .map(|(key, value)| {
                    self.compile_property(
                        key,
                        value,
                        required.contains(key.as_str()),
                        &location.child(PROPERTIES).child(key),
                    )
                })
                .collect::<Result<Vec<_>, CompileError>>()?,
            Some(_) => {
                return Err(CompileError::malformed(
                    location,
                    "'properties' must be an object",
                ))
            }
        };
        let additional_values = self.additional_values(node, location)?;

        let mut imports: BTreeSet<String> = self.imports.object.iter().cloned().collect();
        if additional_values.is_some() {
            imports.extend(self.imports.additional_values.iter().cloned());
        }
        for property in &properties {
            imports.extend(self.registry.qualified_names_of(property)?);
        }

        Ok(ObjectClassModel {
            name,
            properties,
            imports,
            additional_values,
        })
    }

    fn compile_property(
        &self,
        key: &str,
        value: &Value,
        required: bool,
        location: &Location,
    ) -> Result<PropertyModel, CompileError> {
        let fragment = value
            .as_object()
            .ok_or_else(|| CompileError::malformed(location, "property must be an object"))?;
        let resolved = self.mapping.resolve(fragment, location)?;
        trace!(property = key, raw_type = %resolved.raw, target = %resolved.name, "resolved property");

        let items = if resolved.raw.is_array() {
            let items_location = location.child("items");
            let items = object_entry(fragment, "items").ok_or_else(|| {
                CompileError::malformed(location, "'array' fragment without object 'items'")
            })?;
            let element = self.mapping.resolve(items, &items_location)?;
            Some((items, element, items_location))
        } else {
            None
        };

        let enum_definition = match resolved.raw {
            JsonType::Enum => Some(EnumModel::from_fragment(fragment, location)?),
            _ => None,
        };

        let union_definition = match (&resolved.raw, &items) {
            (JsonType::OneOf, _) => Some(self.synthesize_union(
                &resolved.name,
                one_of_branches(fragment, location)?,
                location,
            )?),
            (raw, _) if raw.is_reference_to(NESTED_SCHEMA_TOKEN) => {
                Some(self.synthesize_union(NESTED_UNION_NAME, &nested_schema_branches(), location)?)
            }
            (_, Some((items, element, items_location))) if element.raw == JsonType::OneOf => {
                Some(self.synthesize_union(
                    &element.name,
                    one_of_branches(items, items_location)?,
                    items_location,
                )?)
            }
            _ => None,
        };

        let target_type = match (&union_definition, &items) {
            (Some(union), None) => union.name().to_string(),
            _ => resolved.name.clone(),
        };
        let to_string_method = match resolved.raw {
            JsonType::Enum => Some("toString".to_string()),
            _ if target_type == URL_TYPE => Some("toExternalForm".to_string()),
            _ => None,
        };
        let adapter = if to_string_method.is_some() {
            self.adapters.adapter_for("String")
        } else {
            self.adapters.adapter_for(&target_type)
        }
        .to_string();

        let ResolvedType {
            raw,
            nullable,
            interfaces,
            ..
        } = resolved;
        Ok(PropertyModel {
            name: key.to_string(),
            raw_type: raw,
            target_type,
            nullable,
            required,
            has_interfaces: !interfaces.is_empty(),
            generic_type: items.map(|(_, element, _)| element.name),
            adapter,
            to_string_method,
            enum_definition,
            union_definition,
            location: location.to_string(),
        })
    }

    /// Single construction path for every union
    fn synthesize_union(
        &self,
        name: &str,
        branches: &[Value],
        location: &Location,
    ) -> Result<UnionClassModel, CompileError> {
        let branches = branches
            .iter()
            .enumerate()
            .map(|(index, branch)| {
                let branch_location = location.child("oneOf").child(&index.to_string());
                let fragment = branch.as_object().ok_or_else(|| {
                    CompileError::malformed(&branch_location, "'oneOf' branch must be an object")
                })?;
                let resolved = self.mapping.resolve(fragment, &branch_location)?;
                Ok(UnionBranch::new(
                    resolved.name,
                    resolved.nullable,
                    resolved.interfaces,
                    branch_location.to_string(),
                ))
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        let mut imports: BTreeSet<String> = self.imports.union.iter().cloned().collect();
        for branch in &branches {
            imports.extend(self.registry.qualified_names_of(branch)?);
            imports.extend(
                branch
                    .interfaces()
                    .iter()
                    .map(|capability| capability.qualified_name.clone()),
            );
        }
        debug!(union = name, branches = branches.len(), "synthesized union");

        Ok(UnionClassModel {
            name: name.to_string(),
            branches,
            imports,
        })
    }

    /// First `patternProperties` entry whose value is a reference
    fn additional_values(
        &self,
        node: &SchemaNode,
        location: &Location,
    ) -> Result<Option<AdditionalValues>, CompileError> {
        let Some(patterns) = object_entry(node, PATTERN_PROPERTIES) else {
            return Ok(None);
        };
        let container = location.child(PATTERN_PROPERTIES);
        for (pattern, value) in patterns {
            let Some(fragment) = value.as_object().filter(|f| f.contains_key("$ref")) else {
                continue;
            };
            let resolved = self.mapping.resolve(fragment, &container.child(pattern))?;
            return Ok(Some(AdditionalValues {
                pattern: pattern.clone(),
                value_type: resolved.name,
            }));
        }
        Ok(None)
    }
}

fn required_names<'a>(
    node: &'a SchemaNode,
    location: &Location,
) -> Result<BTreeSet<&'a str>, CompileError> {
    match node.get("required") {
        None => Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    CompileError::malformed(location, "'required' entries must be strings")
                })
            })
            .collect(),
        Some(_) => Err(CompileError::malformed(location, "'required' must be an array")),
    }
}

fn one_of_branches<'a>(
    fragment: &'a SchemaNode,
    location: &Location,
) -> Result<&'a [Value], CompileError> {
    fragment
        .get("oneOf")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| CompileError::malformed(location, "'oneOf' must be an array"))
}

/// Alternatives of the builtin nested-schema union
fn nested_schema_branches() -> Vec<Value> {
    vec![
        json!({ "$ref": format!("#/fake/{DOCUMENT_SCHEMA_TOKEN}") }),
        json!({ "$ref": "#/definitions/referenceObject" }),
    ]
}

struct Pending<'s> {
    node: &'s SchemaNode,
    key: Option<&'s str>,
    location: Location,
}

/// Lazy sequence of compiled classes, see [`SchemaCompiler::compile`]
pub struct ClassModels<'s> {
    compiler: &'s SchemaCompiler,
    pending: Vec<Pending<'s>>,
    failed: bool,
}

impl<'s> ClassModels<'s> {
    /// Push the nested classes of `node` so the first one pops next
    fn push_children(&mut self, node: &'s SchemaNode, location: &Location) {
        let mut children = Vec::new();
        for container in CLASS_CONTAINERS {
            let Some(entries) = object_entry(node, container) else {
                continue;
            };
            let container_location = location.child(container);
            for (key, value) in entries {
                if SKIPPED_DEFINITIONS.contains(&key.as_str()) {
                    continue;
                }
                if let Some(child) = value.as_object().filter(|child| is_object_typed(child)) {
                    children.push(Pending {
                        node: child,
                        key: Some(key.as_str()),
                        location: container_location.child(key),
                    });
                }
            }
        }
        self.pending.extend(children.into_iter().rev());
    }
}

impl Iterator for ClassModels<'_> {
    type Item = Result<ClassModel, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let Pending {
            node,
            key,
            location,
        } = self.pending.pop()?;
        self.push_children(node, &location);
        match self.compiler.compile_object(node, key, &location) {
            Ok(class) => Some(Ok(ClassModel::Object(class))),
            Err(err) => {
                self.failed = true;
                self.pending.clear();
                Some(Err(err))
            }
        }
    }
}
