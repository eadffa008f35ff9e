//! # openrpc-gen
//!
//! Generates source code from an OpenRPC meta-schema style JSON Schema
//! document. Every titled object, property enum and `oneOf` union in the
//! schema becomes a class, rendered through replaceable templates (Java by
//! default).
//!
//! ## Architecture
//!
//! - **[`schema`]** - Loading schema documents (JSON or YAML, file or URL)
//! - **[`model`]** - Compiling a schema into class models: type resolution,
//!   type mapping, print adapters and import registries
//! - **[`generator`]** - Rendering class models through templates into a sink
//! - **[`config`]** - `openrpc-gen.toml` and command-line settings
//! - **[`linter`]** - Pre-generation checks of a schema
//! - **[`cli`]** - The `openrpc-gen` command line
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ## Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(openrpc-gen)
//!     participant Schema as schema::load_schema
//!     participant Compiler as model::SchemaCompiler
//!     participant Generator as generator::CodeGenerator
//!     participant FS as File System
//!
//!     CLI->>Schema: load_schema(source)
//!     Schema-->>CLI: SchemaNode
//!     CLI->>Compiler: compile(&schema)
//!     loop each class (depth first)
//!         Compiler-->>Generator: Result<ClassModel>
//!         Generator->>Generator: render object template
//!         Generator->>Generator: render alternative template per union
//!         Generator->>FS: <output>/<namespace dirs>/<Class>.java
//!     end
//! ```
//!
//! ## Example
//!
//! ```rust
//! use openrpc_gen::generator::{CodeGenerator, MemorySink, Renderer, TemplateSet};
//! use openrpc_gen::model::SchemaCompiler;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "title": "Contact",
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } }
//! });
//! let compiler = SchemaCompiler::default();
//! let renderer = Renderer::new(TemplateSet::default());
//! let sink = MemorySink::new();
//! let report = CodeGenerator::new(&renderer, &sink, "io.github.example")
//!     .generate(compiler.compile(schema.as_object().unwrap()))
//!     .unwrap();
//! assert_eq!(report.classes, vec!["Contact".to_string()]);
//! assert!(sink.artifact("io.github.example", "Contact").is_some());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod model;
pub mod schema;

pub use config::GeneratorConfig;
pub use error::CompileError;
pub use model::{ClassModel, SchemaCompiler};
pub use schema::{load_schema, SchemaNode, SchemaSource};
