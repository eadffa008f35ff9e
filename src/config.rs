//! Generator configuration
//!
//! Settings can come from an `openrpc-gen.toml` file that sits alongside the
//! schema, from CLI flags, or both; CLI values win. Relative paths are taken
//! relative to the working directory.
//!
//! ```toml
//! namespace = "io.github.example.openrpc"
//! schema = "open-rpc-meta-schema.json"
//! output = "target/generated-sources/openrpc"
//! document_type = "io.github.sebastiantoepfer.jsonschema.JsonSchema"
//!
//! [templates]
//! object = "templates/object_class.java.j2"
//!
//! [types.number]
//! name = "double"
//! nullable = false
//!
//! [adapters]
//! double = "NamedNumberPrintable"
//! BigDecimal = "org.example.print.DecimalPrintable"
//! ```
//!
//! Adapters are given by qualified name; the builtin printables may be named
//! by their simple name.

use crate::generator::DEFAULT_EXTENSION;
use crate::model::{
    AdapterRegistry, SchemaCompiler, TargetType, TypeMapping, DEFAULT_DOCUMENT_TYPE,
};
use crate::schema::SchemaSource;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name looked up next to the schema
pub const CONFIG_FILE_NAME: &str = "openrpc-gen.toml";

/// Generator settings as written in the config file or given on the CLI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Namespace (package) of every generated class
    #[serde(default)]
    pub namespace: Option<String>,
    /// Schema file path or http(s) URL
    #[serde(default)]
    pub schema: Option<String>,
    /// Root directory of generated sources
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Qualified name of the type standing in for nested schemas
    #[serde(default)]
    pub document_type: Option<String>,
    /// Extension of generated files (default `java`)
    #[serde(default)]
    pub extension: Option<String>,
    /// Class name of an untitled root fragment (default `Document`)
    #[serde(default)]
    pub root_name: Option<String>,
    #[serde(default)]
    pub templates: TemplatePaths,
    /// Mapping table rows to add or replace, keyed by classification token
    #[serde(default)]
    pub types: BTreeMap<String, TypeOverride>,
    /// Extra adapters (qualified, or a builtin simple name), keyed by target type name
    #[serde(default)]
    pub adapters: BTreeMap<String, String>,
}

/// Template files replacing the bundled ones
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TemplatePaths {
    #[serde(default)]
    pub object: Option<PathBuf>,
    #[serde(default)]
    pub alternative: Option<PathBuf>,
}

/// One mapping table row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeOverride {
    /// Target type name
    pub name: String,
    /// Import needed to use the type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

/// Settings after merging, with every required value present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub namespace: String,
    pub schema: SchemaSource,
    pub output: PathBuf,
    pub extension: String,
    pub templates: TemplatePaths,
}

impl GeneratorConfig {
    /// Overlay `overrides` on top of `self`; every value set in `overrides` wins
    pub fn merge(self, overrides: GeneratorConfig) -> GeneratorConfig {
        let mut types = self.types;
        types.extend(overrides.types);
        let mut adapters = self.adapters;
        adapters.extend(overrides.adapters);
        GeneratorConfig {
            namespace: overrides.namespace.or(self.namespace),
            schema: overrides.schema.or(self.schema),
            output: overrides.output.or(self.output),
            document_type: overrides.document_type.or(self.document_type),
            extension: overrides.extension.or(self.extension),
            root_name: overrides.root_name.or(self.root_name),
            templates: TemplatePaths {
                object: overrides.templates.object.or(self.templates.object),
                alternative: overrides.templates.alternative.or(self.templates.alternative),
            },
            types,
            adapters,
        }
    }

    /// Check that everything a generation pass needs is present
    ///
    /// # Errors
    ///
    /// Missing `namespace`, `schema` or `output`, an invalid namespace, or a
    /// schema URL that does not parse.
    pub fn resolve(&self) -> anyhow::Result<GenerationSettings> {
        let namespace = self
            .namespace
            .as_deref()
            .context("No namespace configured (use --namespace or set `namespace`)")?;
        validate_namespace(namespace)?;
        let schema = self
            .schema
            .as_deref()
            .context("No schema configured (use --schema or set `schema`)")?;
        let output = self
            .output
            .clone()
            .context("No output directory configured (use --output or set `output`)")?;
        Ok(GenerationSettings {
            namespace: namespace.to_string(),
            schema: SchemaSource::parse(schema)?,
            output,
            extension: self
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            templates: self.templates.clone(),
        })
    }

    /// Mapping table with the configured document type and overrides
    pub fn type_mapping(&self) -> TypeMapping {
        let document_type = self.document_type.as_deref().unwrap_or(DEFAULT_DOCUMENT_TYPE);
        self.types
            .iter()
            .fold(TypeMapping::new(document_type), |mapping, (token, row)| {
                let target = match &row.qualified_name {
                    Some(qualified) => TargetType::qualified(&row.name, qualified),
                    None => TargetType::simple(&row.name),
                };
                mapping.with_type(
                    token,
                    TargetType {
                        nullable: row.nullable,
                        ..target
                    },
                )
            })
    }

    pub fn adapter_registry(&self) -> AdapterRegistry {
        self.adapters
            .iter()
            .fold(AdapterRegistry::default(), |registry, (type_name, adapter)| {
                registry.with_adapter(type_name, adapter)
            })
    }

    /// Compiler built from this configuration
    pub fn compiler(&self) -> SchemaCompiler {
        let compiler = SchemaCompiler::new(self.type_mapping(), self.adapter_registry());
        match &self.root_name {
            Some(root_name) => compiler.with_root_name(root_name.clone()),
            None => compiler,
        }
    }
}

fn validate_namespace(namespace: &str) -> anyhow::Result<()> {
    let valid = !namespace.is_empty()
        && namespace.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        anyhow::bail!("Invalid namespace: {namespace:?}")
    }
}

/// Load a configuration file
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// `openrpc-gen.toml` in the schema's directory, if it exists
pub fn auto_detect_config_path(schema_path: &Path) -> Option<PathBuf> {
    let config_path = schema_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside a local schema
/// 3. None (no config)
pub fn resolve_config_path(explicit_path: Option<&Path>, schema: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    let schema = SchemaSource::parse(schema?).ok()?;
    auto_detect_config_path(schema.as_path()?)
}
