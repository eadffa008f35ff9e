use crate::config::{load_config, resolve_config_path, GeneratorConfig, TemplatePaths};
use crate::generator::generate_from_config;
use crate::linter::{has_errors, lint_source, print_lint_issues, LintIssue, LintSeverity};
use crate::model::ClassModel;
use crate::schema::{load_schema, SchemaSource};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Command-line interface for openrpc-gen
///
/// Compiles an OpenRPC meta-schema style document into classes rendered
/// through templates.
#[derive(Debug, Parser)]
#[command(name = "openrpc-gen", version)]
#[command(about = "OpenRPC schema to source code generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate classes from a schema
    Generate {
        /// Schema file (JSON or YAML) or http(s) URL
        #[arg(short, long)]
        schema: Option<String>,

        /// Namespace (package) of the generated classes
        #[arg(short, long)]
        namespace: Option<String>,

        /// Root directory of generated sources
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (openrpc-gen.toml)
        /// If not provided, will auto-detect alongside the schema
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Qualified name of the type standing in for nested schemas
        #[arg(long)]
        document_type: Option<String>,

        /// Template for object classes (default: bundled Java template)
        #[arg(long)]
        object_template: Option<PathBuf>,

        /// Template for union classes (default: bundled Java template)
        #[arg(long)]
        alternative_template: Option<PathBuf>,

        /// Extension of generated files (default: java)
        #[arg(long)]
        extension: Option<String>,

        /// Class name of an untitled root object (default: Document)
        #[arg(long)]
        root_name: Option<String>,
    },
    /// Lint a schema
    ///
    /// Reports fragments the generator cannot handle or will name oddly:
    /// - enum/oneOf without title
    /// - unclassifiable fragments
    /// - non-string enum values and colliding enum identifiers
    /// - invalid patternProperties keys
    /// - untitled objects
    Lint {
        /// Schema file (JSON or YAML) or http(s) URL
        #[arg(short, long)]
        schema: String,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the classes a schema compiles to
    Inspect {
        /// Schema file (JSON or YAML) or http(s) URL
        #[arg(short, long)]
        schema: String,

        /// Configuration file (openrpc-gen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse the process arguments and run the selected command
///
/// # Errors
///
/// Any error of the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line
///
/// # Errors
///
/// Any error of the selected command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            schema,
            namespace,
            output,
            config,
            document_type,
            object_template,
            alternative_template,
            extension,
            root_name,
        } => {
            let overrides = GeneratorConfig {
                namespace,
                schema,
                output,
                document_type,
                extension,
                root_name,
                templates: TemplatePaths {
                    object: object_template,
                    alternative: alternative_template,
                },
                ..Default::default()
            };
            let file_config = file_config(config.as_deref(), overrides.schema.as_deref())?;
            let merged = file_config.merge(overrides);
            let report = generate_from_config(&merged)?;
            let output = merged
                .output
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!(
                "✅ Generated {} class(es) and {} alternative(s) → {}",
                report.classes.len(),
                report.alternatives.len(),
                output
            );
            Ok(())
        }
        Commands::Lint {
            schema,
            fail_on_error,
            errors_only,
        } => {
            let issues = lint_source(&SchemaSource::parse(&schema)?)?;
            let shown: Vec<LintIssue> = if errors_only {
                issues
                    .iter()
                    .filter(|i| i.severity == LintSeverity::Error)
                    .cloned()
                    .collect()
            } else {
                issues.clone()
            };
            print_lint_issues(&shown);
            if fail_on_error && has_errors(&issues) {
                anyhow::bail!("schema has lint errors");
            }
            Ok(())
        }
        Commands::Inspect { schema, config } => {
            let file_config = file_config(config.as_deref(), Some(&schema))?;
            let document = load_schema(&SchemaSource::parse(&schema)?)?;
            let classes = file_config.compiler().compile_all(&document)?;
            print!("{}", describe_classes(&classes));
            Ok(())
        }
    }
}

/// Config from an explicit path or next to the schema; empty when there is none
fn file_config(explicit: Option<&Path>, schema: Option<&str>) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit, schema) {
        Some(path) => {
            debug!(path = %path.display(), "using config file");
            load_config(&path)?
                .with_context(|| format!("Config file not found: {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

/// Human-readable summary of compiled classes, one line per class, property,
/// open map, union and enum
pub fn describe_classes(classes: &[ClassModel]) -> String {
    let mut lines = Vec::new();
    for object in classes.iter().filter_map(ClassModel::as_object) {
        lines.push(format!(
            "{} ({} required, {} optional)",
            object.name(),
            object.required_properties().len(),
            object.optional_properties().len()
        ));
        for property in object.properties() {
            let ty = match property.generic_type() {
                Some(generic) => format!("{}<{}>", property.target_type(), generic),
                None => property.target_type().to_string(),
            };
            let marker = if property.is_required() { "*" } else { " " };
            lines.push(format!(
                "  {marker} {}: {ty} [{}]",
                property.name(),
                property.adapter()
            ));
        }
        if let Some(values) = object.additional_values() {
            lines.push(format!("    {}: {}", values.pattern, values.value_type));
        }
        for union in object.unions() {
            let branches: Vec<_> = union
                .branches()
                .iter()
                .map(|b| format!("{}={}", b.name(), b.branch_type()))
                .collect();
            lines.push(format!("  ⇄ {} ({})", union.name(), branches.join(", ")));
        }
        for enumeration in object.enums() {
            lines.push(format!(
                "  # {} ({} values)",
                enumeration.name,
                enumeration.values.len()
            ));
        }
    }
    lines.iter().map(|line| format!("{line}\n")).collect()
}
