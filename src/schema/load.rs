use super::types::SchemaNode;
use anyhow::Context;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Where a schema document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A local JSON or YAML file
    File(PathBuf),
    /// A remote document fetched over http(s)
    Url(Url),
}

impl SchemaSource {
    /// Interpret a CLI/config value: `http://` and `https://` are URLs,
    /// everything else is a path
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        if value.starts_with("http://") || value.starts_with("https://") {
            let url = Url::parse(value).with_context(|| format!("Invalid schema URL: {value}"))?;
            Ok(SchemaSource::Url(url))
        } else {
            Ok(SchemaSource::File(PathBuf::from(value)))
        }
    }

    /// The local path, if the source is a file
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            SchemaSource::File(path) => Some(path),
            SchemaSource::Url(_) => None,
        }
    }

    fn is_yaml(&self) -> bool {
        let name = match self {
            SchemaSource::File(path) => path.to_string_lossy().to_string(),
            SchemaSource::Url(url) => url.path().to_string(),
        };
        name.ends_with(".yaml") || name.ends_with(".yml")
    }
}

impl std::fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaSource::File(path) => write!(f, "{}", path.display()),
            SchemaSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read and parse a schema document
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
/// The document root must be an object.
///
/// # Errors
///
/// Returns an error if the source cannot be read or fetched, or does not parse
/// into a JSON object. The original cause is kept in the error chain.
pub fn load_schema(source: &SchemaSource) -> anyhow::Result<SchemaNode> {
    info!(source = %source, "loading schema");
    let content = match source {
        SchemaSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {}", path.display()))?,
        SchemaSource::Url(url) => fetch(url)?,
    };
    let schema = parse_schema(&content, source.is_yaml())
        .with_context(|| format!("Failed to parse schema: {source}"))?;
    debug!(source = %source, keys = schema.len(), "schema loaded");
    Ok(schema)
}

/// Parse schema text that is already in memory
///
/// # Errors
///
/// Returns an error if the text is not valid JSON/YAML or its root is not an object.
pub fn parse_schema(content: &str, yaml: bool) -> anyhow::Result<SchemaNode> {
    let value: Value = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "schema root must be an object, found {}",
            json_kind(&other)
        ),
    }
}

fn fetch(url: &Url) -> anyhow::Result<String> {
    debug!(url = %url, "fetching remote schema");
    let response = reqwest::blocking::get(url.clone())
        .with_context(|| format!("Failed to fetch schema: {url}"))?
        .error_for_status()
        .with_context(|| format!("Schema request failed: {url}"))?;
    response
        .text()
        .with_context(|| format!("Failed to read schema body: {url}"))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
