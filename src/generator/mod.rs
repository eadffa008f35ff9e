//! # Generator Module
//!
//! The generator module turns compiled class models into source files.
//!
//! ## Overview
//!
//! A pass compiles the schema, assigns the configured namespace to every class
//! and renders it:
//!
//! - **Object classes** - one artifact per object-typed fragment, rendered with
//!   the `object` template
//! - **Alternative classes** - one artifact per union a class declares,
//!   rendered with the `alternative` template (each union written once)
//!
//! ## Architecture
//!
//! ```text
//! Schema → SchemaCompiler → ClassModel → Renderer (minijinja) → ArtifactSink
//! ```
//!
//! 1. **Compiler** - [`crate::model::SchemaCompiler`] yields class models lazily
//! 2. **Contexts** - [`context`] declares exactly what a template can see
//! 3. **Rendering** - [`Renderer`] compiles the template source in a fresh
//!    environment per render, with the `cap1st`/`uncap1st` filters
//! 4. **Output** - an [`ArtifactSink`] opens one writer per artifact; the
//!    [`DirectorySink`] maps namespace segments to directories
//!
//! ## Generated Structure
//!
//! ```text
//! <output>/
//! └── io/github/example/
//!     ├── OpenrpcDocument.java      # object template
//!     ├── ContactObject.java        # object template
//!     └── ContentDescriptorOrReference.java  # alternative template
//! ```
//!
//! ## Usage
//!
//! ### CLI Usage
//!
//! ```bash
//! openrpc-gen generate \
//!     --schema open-rpc-meta-schema.json \
//!     --namespace io.github.example \
//!     --output target/generated-sources
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,ignore
//! use openrpc_gen::generator::{CodeGenerator, DirectorySink, Renderer};
//! use openrpc_gen::model::SchemaCompiler;
//! use openrpc_gen::schema::{load_schema, SchemaSource};
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = load_schema(&SchemaSource::parse("open-rpc-meta-schema.json")?)?;
//! let compiler = SchemaCompiler::default();
//! let renderer = Renderer::default();
//! let sink = DirectorySink::new("target/generated-sources");
//! CodeGenerator::new(&renderer, &sink, "io.github.example")
//!     .generate(compiler.compile(&schema))?;
//! # Ok(())
//! # }
//! ```

pub mod context;
mod generate;
mod output;
mod templates;

pub use generate::{generate_from_config, CodeGenerator, GenerationReport};
pub use output::{ArtifactSink, DirectorySink, MemorySink, DEFAULT_EXTENSION};
pub use templates::{
    cap1st, uncap1st, Renderer, TemplateKind, TemplateSet, DEFAULT_ALTERNATIVE_TEMPLATE,
    DEFAULT_OBJECT_TEMPLATE,
};
