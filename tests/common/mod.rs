#![allow(dead_code)]

use openrpc_gen::schema::{load_schema, SchemaNode, SchemaSource};
use std::path::PathBuf;

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The trimmed OpenRPC meta-schema used across integration tests
pub fn openrpc_subset() -> SchemaNode {
    load_schema(&SchemaSource::File(fixture_path("openrpc_subset.json")))
        .expect("load openrpc fixture")
}

/// Classes of the fixture in compile order
pub const FIXTURE_CLASSES: [&str; 11] = [
    "OpenrpcDocument",
    "InfoObject",
    "ContactObject",
    "LicenseObject",
    "ExternalDocumentationObject",
    "MethodObject",
    "ContentDescriptorObject",
    "ComponentsObject",
    "SchemaComponents",
    "ContentDescriptorComponents",
    "ReferenceObject",
];
