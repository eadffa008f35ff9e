#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end generation of the trimmed OpenRPC meta-schema

mod common;

use common::{fixture_path, openrpc_subset, FIXTURE_CLASSES};
use openrpc_gen::generator::{
    generate_from_config, CodeGenerator, DirectorySink, MemorySink, Renderer, TemplateSet,
};
use openrpc_gen::model::SchemaCompiler;
use openrpc_gen::GeneratorConfig;
use std::fs;

const NAMESPACE: &str = "io.github.example";

fn generate_in_memory() -> MemorySink {
    let schema = openrpc_subset();
    let compiler = SchemaCompiler::default();
    let renderer = Renderer::new(TemplateSet::default());
    let sink = MemorySink::new();
    CodeGenerator::new(&renderer, &sink, NAMESPACE)
        .generate(compiler.compile(&schema))
        .expect("generation succeeds");
    sink
}

#[test]
fn test_report_lists_classes_and_unions_once() {
    let schema = openrpc_subset();
    let compiler = SchemaCompiler::default();
    let renderer = Renderer::new(TemplateSet::default());
    let sink = MemorySink::new();
    let report = CodeGenerator::new(&renderer, &sink, NAMESPACE)
        .generate(compiler.compile(&schema))
        .unwrap();

    assert_eq!(report.classes, FIXTURE_CLASSES);
    assert_eq!(
        report.alternatives,
        vec![
            "MethodOrReference",
            "ContentDescriptorOrReference",
            "JsonSchemaOrReference"
        ]
    );
    assert_eq!(report.total(), 14);
    assert_eq!(sink.len(), 14);
}

#[test]
fn test_root_document_source() {
    let sink = generate_in_memory();
    let source = sink.artifact(NAMESPACE, "OpenrpcDocument").expect("root class");

    assert!(source.starts_with("package io.github.example;\n"));
    assert!(source.contains("import java.util.List;\n"));
    assert!(source.contains("public final class OpenrpcDocument implements Printable {"));
    assert!(source.contains("Pattern.compile(\"^x-\")"));
    assert!(source.contains("private final Map<String, Printable> additionalValues;"));
    assert!(source.contains("final List<MethodOrReference> methods"));
    assert!(source.contains(
        "public OpenrpcDocument withExternalDocs(final ExternalDocumentationObject externalDocs)"
    ));
    assert!(source.contains("public enum Openrpc {"));
    assert!(source.contains("Openrpc_132(\"1.3.2\"),"));
    assert!(source.contains("Openrpc_125(\"1.2.5\");"));
}

#[test]
fn test_union_sources() {
    let sink = generate_in_memory();

    let methods = sink.artifact(NAMESPACE, "MethodOrReference").expect("union");
    assert!(methods.contains("public abstract class MethodOrReference implements Printable {"));
    assert!(methods.contains("public static final class Object extends MethodOrReference {"));
    assert!(methods.contains("private final MethodObject object;"));
    assert!(methods.contains("public static final class Reference extends MethodOrReference {"));

    let schema = sink.artifact(NAMESPACE, "JsonSchemaOrReference").expect("nested union");
    assert!(schema.contains("import io.github.sebastiantoepfer.jsonschema.JsonSchema;"));
    assert!(schema.contains("public JsonSchema asJsonSchema() {"));
}

#[test]
fn test_generate_from_config_writes_files() {
    let out = tempfile::tempdir().unwrap();
    let config = GeneratorConfig {
        namespace: Some(NAMESPACE.to_string()),
        schema: Some(fixture_path("openrpc_subset.json").display().to_string()),
        output: Some(out.path().to_path_buf()),
        ..Default::default()
    };

    let report = generate_from_config(&config).unwrap();
    assert_eq!(report.classes.len(), FIXTURE_CLASSES.len());

    let sink = DirectorySink::new(out.path());
    let names = FIXTURE_CLASSES
        .iter()
        .copied()
        .chain(report.alternatives.iter().map(String::as_str));
    for name in names {
        let path = sink.path_for(NAMESPACE, name);
        assert!(path.is_file(), "missing {}", path.display());
    }
    let info = fs::read_to_string(out.path().join("io/github/example/InfoObject.java")).unwrap();
    assert!(info.contains("public final class InfoObject implements Printable {"));
}

#[test]
fn test_generate_from_config_with_custom_template_and_extension() {
    let out = tempfile::tempdir().unwrap();
    let templates = tempfile::tempdir().unwrap();
    let object = templates.path().join("object.kt.j2");
    fs::write(
        &object,
        "package {{ namespace }}\n\nclass {{ name }}({% for p in properties %}val {{ p.variable_name }}: {{ p.type }}{{ \", \" if not loop.last else \"\" }}{% endfor %})\n",
    )
    .unwrap();

    let config = GeneratorConfig {
        namespace: Some(NAMESPACE.to_string()),
        schema: Some(fixture_path("openrpc_subset.json").display().to_string()),
        output: Some(out.path().to_path_buf()),
        extension: Some("kt".to_string()),
        templates: openrpc_gen::config::TemplatePaths {
            object: Some(object),
            alternative: None,
        },
        ..Default::default()
    };
    generate_from_config(&config).unwrap();

    let license =
        fs::read_to_string(out.path().join("io/github/example/LicenseObject.kt")).unwrap();
    assert_eq!(
        license,
        "package io.github.example\n\nclass LicenseObject(val name: String, val url: URL)\n"
    );
    assert!(out
        .path()
        .join("io/github/example/MethodOrReference.kt")
        .is_file());
}

#[test]
fn test_generate_from_config_reports_missing_schema() {
    let out = tempfile::tempdir().unwrap();
    let config = GeneratorConfig {
        namespace: Some(NAMESPACE.to_string()),
        schema: Some(fixture_path("does_not_exist.json").display().to_string()),
        output: Some(out.path().to_path_buf()),
        ..Default::default()
    };
    let err = generate_from_config(&config).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read schema file"));
}
