//! # CLI Module
//!
//! Command-line interface of the `openrpc-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Compile a schema and write one source file per class:
//!
//! ```bash
//! openrpc-gen generate --schema open-rpc-meta-schema.json \
//!     --namespace io.github.example --output target/generated-sources
//! ```
//!
//! Options:
//! - `--schema <PATH|URL>` - Schema document, JSON or YAML
//! - `--namespace <NS>` - Namespace of the generated classes
//! - `--output <DIR>` - Root directory of generated sources
//! - `--config <FILE>` - `openrpc-gen.toml` (auto-detected next to the schema)
//! - `--document-type <FQN>` - Type standing in for nested schemas
//! - `--object-template <FILE>` / `--alternative-template <FILE>` - Template overrides
//! - `--extension <EXT>` - Extension of generated files (default: java)
//!
//! Values given on the command line override the config file.
//!
//! ### `lint`
//!
//! ```bash
//! openrpc-gen lint --schema open-rpc-meta-schema.json --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! Print the compiled classes, their properties and unions:
//!
//! ```bash
//! openrpc-gen inspect --schema open-rpc-meta-schema.json
//! ```

mod commands;


pub use commands::{describe_classes, run, run_cli, Cli, Commands};
