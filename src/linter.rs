//! # Schema Linter Module
//!
//! Reports problems in a schema document before generation, without stopping
//! at the first one the way the compiler does.
//!
//! ## Checks Performed
//!
//! 1. **missing_title** (error) - `enum` and `oneOf` fragments need a `title` to be named
//! 2. **unclassifiable_fragment** (error) - a property with none of `$ref`, `enum`,
//!    `oneOf` or `type`, a non-string `type`, or an array without `items`
//! 3. **non_string_enum_value** (error) - enum values must be strings
//! 4. **enum_identifier_collision** (warning) - two enum values sanitise to the
//!    same identifier (`1.2.6` and `1.2-6` both become `_126`)
//! 5. **invalid_pattern** (warning) - a `patternProperties` key that is not a valid regex
//! 6. **untitled_object** (info) - an object class named from its key or the root name
//!
//! ## Usage
//!
//! ```rust,ignore
//! use openrpc_gen::linter::{lint_source, print_lint_issues};
//! use openrpc_gen::schema::SchemaSource;
//!
//! let issues = lint_source(&SchemaSource::parse("open-rpc-meta-schema.json")?)?;
//! print_lint_issues(&issues);
//! ```

use crate::model::{enum_identifier, resolve_json_type, JsonType, SKIPPED_DEFINITIONS};
use crate::schema::{
    is_object_typed, load_schema, object_entry, title_of, Location, SchemaNode, SchemaSource,
    DEFINITIONS, PATTERN_PROPERTIES, PROPERTIES, SCHEMA_KEYWORD,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - Will cause generation to fail
    Error,
    /// Warning - Generates, but the output is likely wrong
    Warning,
    /// Info - Naming hint
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        })
    }
}

/// A lint issue found in a schema document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue occurred, as a JSON pointer (e.g. "#/definitions/infoObject")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "missing_title", "invalid_pattern")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Load and lint a schema document
///
/// # Errors
///
/// Only loading errors; lint findings are returned, not raised.
pub fn lint_source(source: &SchemaSource) -> anyhow::Result<Vec<LintIssue>> {
    let schema = load_schema(source)?;
    Ok(lint_schema(&schema))
}

/// Lint a parsed schema document
///
/// Visits the same fragments as the compiler, in the same order.
pub fn lint_schema(schema: &SchemaNode) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    lint_class(schema, None, &Location::root(), &mut issues);
    issues
}

/// Whether any issue is an error
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

fn lint_class(node: &SchemaNode, key: Option<&str>, location: &Location, issues: &mut Vec<LintIssue>) {
    if title_of(node).is_none() {
        let message = match key {
            Some(key) => format!("object has no 'title'; class is named after its key '{key}'"),
            None => "root object has no 'title'; class takes the configured root name".to_string(),
        };
        issues.push(
            LintIssue::new(location, LintSeverity::Info, "untitled_object", message)
                .with_suggestion("Add a 'title' to choose the class name explicitly"),
        );
    }

    if let Some(properties) = object_entry(node, PROPERTIES) {
        let container = location.child(PROPERTIES);
        for (name, property) in properties {
            if name != SCHEMA_KEYWORD {
                lint_fragment(property, &container.child(name), issues);
            }
        }
    }

    if let Some(patterns) = object_entry(node, PATTERN_PROPERTIES) {
        let container = location.child(PATTERN_PROPERTIES);
        for pattern in patterns.keys() {
            if let Err(err) = regex::Regex::new(pattern) {
                issues.push(
                    LintIssue::new(
                        container.child(pattern),
                        LintSeverity::Warning,
                        "invalid_pattern",
                        format!("pattern {pattern:?} is not a valid regular expression: {err}"),
                    )
                    .with_suggestion("Generated code compiles this pattern at class load"),
                );
            }
        }
    }

    for container in [PROPERTIES, DEFINITIONS] {
        let Some(entries) = object_entry(node, container) else {
            continue;
        };
        let container_location = location.child(container);
        for (name, value) in entries {
            if SKIPPED_DEFINITIONS.contains(&name.as_str()) {
                continue;
            }
            if let Some(child) = value.as_object().filter(|child| is_object_typed(child)) {
                lint_class(child, Some(name), &container_location.child(name), issues);
            }
        }
    }
}

fn lint_fragment(value: &Value, location: &Location, issues: &mut Vec<LintIssue>) {
    let Some(node) = value.as_object() else {
        issues.push(LintIssue::new(
            location,
            LintSeverity::Error,
            "unclassifiable_fragment",
            "fragment is not an object",
        ));
        return;
    };
    let raw = match resolve_json_type(node, location) {
        Ok(raw) => raw,
        Err(err) => {
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Error,
                    "unclassifiable_fragment",
                    err.to_string(),
                )
                .with_suggestion("Declare a 'type', or use '$ref', 'enum' or 'oneOf'"),
            );
            return;
        }
    };

    match raw {
        JsonType::Enum => {
            require_title(node, "enum", location, issues);
            lint_enum_values(node, location, issues);
        }
        JsonType::OneOf => {
            require_title(node, "oneOf", location, issues);
            match node.get("oneOf") {
                Some(Value::Array(branches)) => {
                    let container = location.child("oneOf");
                    for (index, branch) in branches.iter().enumerate() {
                        lint_fragment(branch, &container.child(&index.to_string()), issues);
                    }
                }
                _ => issues.push(LintIssue::new(
                    location,
                    LintSeverity::Error,
                    "unclassifiable_fragment",
                    "'oneOf' must be an array",
                )),
            }
        }
        ref array if array.is_array() => match node.get("items") {
            Some(items) => lint_fragment(items, &location.child("items"), issues),
            None => issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Error,
                    "unclassifiable_fragment",
                    "array has no 'items'",
                )
                .with_suggestion("Add 'items' describing the element type"),
            ),
        },
        _ => {}
    }
}

fn require_title(node: &SchemaNode, keyword: &str, location: &Location, issues: &mut Vec<LintIssue>) {
    if title_of(node).is_none() {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Error,
                "missing_title",
                format!("'{keyword}' fragment has no 'title'"),
            )
            .with_suggestion("The title names the generated type; add one"),
        );
    }
}

fn lint_enum_values(node: &SchemaNode, location: &Location, issues: &mut Vec<LintIssue>) {
    let Some(values) = node.get("enum").and_then(Value::as_array) else {
        issues.push(LintIssue::new(
            location,
            LintSeverity::Error,
            "non_string_enum_value",
            "'enum' must be an array of strings",
        ));
        return;
    };

    let mut by_identifier: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let container = location.child("enum");
    for (index, value) in values.iter().enumerate() {
        match value.as_str() {
            Some(value) => by_identifier
                .entry(enum_identifier(value))
                .or_default()
                .push(value),
            None => issues.push(LintIssue::new(
                container.child(&index.to_string()),
                LintSeverity::Error,
                "non_string_enum_value",
                format!("enum value {value} is not a string"),
            )),
        }
    }

    for (identifier, colliding) in by_identifier.into_iter().filter(|(_, v)| v.len() > 1) {
        issues.push(
            LintIssue::new(
                location,
                LintSeverity::Warning,
                "enum_identifier_collision",
                format!("values {colliding:?} all map to identifier '{identifier}'"),
            )
            .with_suggestion("Generated enum constants would clash; make the values distinct"),
        );
    }
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info (naming):"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}
