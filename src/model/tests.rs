#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::error::CompileError;
use crate::schema::{Location, SchemaNode};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

fn node(value: Value) -> SchemaNode {
    value.as_object().cloned().expect("test fragment must be an object")
}

fn compile(value: Value) -> Vec<ClassModel> {
    SchemaCompiler::default().compile_all(&node(value)).unwrap()
}

fn object(class: &ClassModel) -> &ObjectClassModel {
    class.as_object().expect("expected an object class")
}

struct Fixed {
    names: &'static [&'static str],
}

impl TypeRegistry for Fixed {
    fn qualified_names_of(&self, _typed: &dyn Typed) -> Result<BTreeSet<String>, CompileError> {
        Ok(self.names.iter().map(|n| n.to_string()).collect())
    }
}

struct Sample {
    type_name: &'static str,
    generic: Option<&'static str>,
    adapter: Option<&'static str>,
}

impl Typed for Sample {
    fn type_name(&self) -> &str {
        self.type_name
    }
    fn generic_type(&self) -> Option<&str> {
        self.generic
    }
    fn adapter(&self) -> Option<&str> {
        self.adapter
    }
    fn location(&self) -> &str {
        "#/sample"
    }
}

// --- resolver ---------------------------------------------------------------

#[test]
fn test_resolve_precedence() {
    let loc = Location::root();
    let both = node(json!({"$ref": "#/definitions/x", "enum": ["a"], "type": "string"}));
    assert_eq!(
        resolve_json_type(&both, &loc).unwrap(),
        JsonType::Reference("x".to_string())
    );
    let enum_and_one_of = node(json!({"enum": ["a"], "oneOf": []}));
    assert_eq!(resolve_json_type(&enum_and_one_of, &loc).unwrap(), JsonType::Enum);
    let one_of = node(json!({"oneOf": [], "type": "object"}));
    assert_eq!(resolve_json_type(&one_of, &loc).unwrap(), JsonType::OneOf);
}

#[test]
fn test_resolve_uri_and_plain_types() {
    let loc = Location::root();
    let uri = node(json!({"type": "string", "format": "uri"}));
    assert_eq!(resolve_json_type(&uri, &loc).unwrap(), JsonType::Uri);
    let email = node(json!({"type": "string", "format": "email"}));
    assert_eq!(
        resolve_json_type(&email, &loc).unwrap(),
        JsonType::Named("string".to_string())
    );
}

#[test]
fn test_resolve_unclassifiable_is_malformed() {
    let err = resolve_json_type(&node(json!({"description": "x"})), &Location::root().child("p"))
        .unwrap_err();
    assert!(matches!(err, CompileError::MalformedFragment { .. }));
    assert_eq!(err.location(), "#/p");

    let err = resolve_json_type(&node(json!({"type": ["string", "null"]})), &Location::root())
        .unwrap_err();
    assert!(err.to_string().contains("'type' must be a string"));
}

#[test]
fn test_reference_target() {
    assert_eq!(reference_target("#/definitions/contactObject").unwrap(), "contactObject");
    assert_eq!(reference_target("#/Widget").unwrap(), "Widget");
    assert_eq!(reference_target("#/definitions/a~1b").unwrap(), "a/b");
    assert!(reference_target("https://meta.json-schema.tools/").is_none());
}

// --- mapping ----------------------------------------------------------------

#[test]
fn test_mapping_builtin_rows() {
    let mapping = TypeMapping::default();
    let loc = Location::root();
    let integer = mapping.resolve(&node(json!({"type": "integer"})), &loc).unwrap();
    assert_eq!(integer.name, "long");
    assert!(!integer.nullable);

    let boolean = mapping.resolve(&node(json!({"type": "boolean"})), &loc).unwrap();
    assert_eq!(boolean.name, "boolean");
    assert!(!boolean.nullable);

    let string = mapping.resolve(&node(json!({"type": "string"})), &loc).unwrap();
    assert_eq!(string.name, "String");
    assert!(string.nullable);

    let reference = mapping
        .resolve(&node(json!({"$ref": "#/definitions/contactObject"})), &loc)
        .unwrap();
    assert_eq!(reference.name, "ContactObject");
}

#[test]
fn test_mapping_document_placeholder_carries_itself_as_interface() {
    let mapping = TypeMapping::new("org.example.schema.Schema");
    let resolved = mapping
        .resolve(&node(json!({"$ref": "#/fake/jsonSchemaObject"})), &Location::root())
        .unwrap();
    assert_eq!(resolved.name, "Schema");
    assert_eq!(
        resolved.interfaces,
        vec![Capability {
            name: "Schema".to_string(),
            qualified_name: "org.example.schema.Schema".to_string(),
        }]
    );
}

#[test]
fn test_mapping_enum_and_one_of_need_title() {
    let mapping = TypeMapping::default();
    let titled = mapping
        .resolve(&node(json!({"title": "aOrB", "oneOf": []})), &Location::root())
        .unwrap();
    assert_eq!(titled.name, "AOrB");

    let err = mapping
        .resolve(&node(json!({"enum": ["x"]})), &Location::root())
        .unwrap_err();
    assert!(err.to_string().contains("without 'title'"));
}

#[test]
fn test_mapping_override() {
    let mapping = TypeMapping::default().with_type("number", TargetType::primitive("double"));
    let resolved = mapping
        .resolve(&node(json!({"type": "number"})), &Location::root())
        .unwrap();
    assert_eq!(resolved.name, "double");
    assert!(!resolved.nullable);
}

#[test]
fn test_mapping_registry_includes_generic_type() {
    let mapping = TypeMapping::default();
    let sample = Sample {
        type_name: "List",
        generic: Some("URL"),
        adapter: None,
    };
    let names = mapping.qualified_names_of(&sample).unwrap();
    assert_eq!(
        names,
        BTreeSet::from(["java.net.URL".to_string(), "java.util.List".to_string()])
    );
}

// --- adapters & registries --------------------------------------------------

#[test]
fn test_adapter_for() {
    let adapters = AdapterRegistry::default();
    assert_eq!(adapters.adapter_for("String"), "NamedStringPrintable");
    assert_eq!(adapters.adapter_for("URL"), "NamedStringPrintable");
    assert_eq!(adapters.adapter_for("List"), "NamedListPrintable");
    assert_eq!(adapters.adapter_for("boolean"), "NamedBooleanPrintable");
    assert_eq!(adapters.adapter_for("long"), "NamedNumberPrintable");
    assert_eq!(adapters.adapter_for("ContactObject"), DEFAULT_ADAPTER);
}

#[test]
fn test_unknown_adapter_is_unresolvable() {
    let sample = Sample {
        type_name: "Widget",
        generic: None,
        adapter: Some("NamedWidgetPrintable"),
    };
    let err = AdapterRegistry::default()
        .qualified_names_of(&sample)
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::UnresolvableAdapter {
            location: "#/sample".to_string(),
            adapter: "NamedWidgetPrintable".to_string(),
        }
    );
}

#[test]
fn test_composite_registry_is_a_set_union() {
    let a: Arc<dyn TypeRegistry> = Arc::new(Fixed {
        names: &["a.A", "shared.S"],
    });
    let b: Arc<dyn TypeRegistry> = Arc::new(Fixed {
        names: &["shared.S", "b.B", "  "],
    });
    let sample = Sample {
        type_name: "X",
        generic: None,
        adapter: None,
    };

    let ab = CompositeTypeRegistry::new()
        .with_registry(Arc::clone(&a))
        .with_registry(Arc::clone(&b));
    let ba = CompositeTypeRegistry::new()
        .with_registry(Arc::clone(&b))
        .with_registry(Arc::clone(&a))
        .with_registry(Arc::clone(&a));

    let expected = BTreeSet::from(["a.A".to_string(), "b.B".to_string(), "shared.S".to_string()]);
    assert_eq!(ab.qualified_names_of(&sample).unwrap(), expected);
    assert_eq!(ba.qualified_names_of(&sample).unwrap(), expected);
}

// --- enums ------------------------------------------------------------------

#[test]
fn test_enum_identifiers() {
    assert_eq!(enum_identifier("1.2.6"), "_126");
    assert_eq!(enum_identifier("foo-bar"), "foobar");
    assert_eq!(enum_identifier("a.b"), "ab");
    assert_eq!(enum_identifier("-x"), "_x");
    assert_eq!(enum_identifier(""), "_");
}

#[test]
fn test_enum_model_keeps_order_and_reports_collisions() {
    let model = EnumModel::from_fragment(
        &node(json!({"title": "version", "enum": ["1.2.6", "1.2-6", "2.0"]})),
        &Location::root(),
    )
    .unwrap();
    assert_eq!(model.name, "Version");
    let ids: Vec<_> = model.values.iter().map(|v| v.identifier.as_str()).collect();
    assert_eq!(ids, vec!["_126", "_126", "_20"]);
    assert_eq!(
        model.collisions(),
        vec![("_126".to_string(), vec!["1.2.6".to_string(), "1.2-6".to_string()])]
    );
}

#[test]
fn test_enum_values_must_be_strings() {
    let err = EnumModel::from_fragment(
        &node(json!({"title": "level", "enum": ["low", 2]})),
        &Location::root(),
    )
    .unwrap_err();
    assert_eq!(err.location(), "#/enum/1");
}

// --- compiler ---------------------------------------------------------------

#[test]
fn test_contact_scenario() {
    let classes = compile(json!({
        "title": "Contact",
        "type": "object",
        "properties": { "name": { "type": "string" } }
    }));
    assert_eq!(classes.len(), 1);
    let contact = object(&classes[0]);
    assert_eq!(contact.name(), "Contact");
    assert!(contact.required_properties().is_empty());
    let optional = contact.optional_properties();
    assert_eq!(optional.len(), 1);
    assert_eq!(optional[0].name(), "name");
    assert_eq!(optional[0].target_type(), "String");
    assert_eq!(optional[0].adapter(), "NamedStringPrintable");
    assert!(contact.enums().is_empty());
    assert!(contact.unions().is_empty());
    assert!(!contact.has_additional_values());
}

#[test]
fn test_required_partition_keeps_source_order() {
    let classes = compile(json!({
        "title": "Info",
        "type": "object",
        "required": ["version", "title"],
        "properties": {
            "title": { "type": "string" },
            "description": { "type": "string" },
            "version": { "type": "string" },
            "license": { "$ref": "#/definitions/licenseObject" }
        }
    }));
    let info = object(&classes[0]);
    let required: Vec<_> = info.required_properties().iter().map(|p| p.name()).collect();
    let optional: Vec<_> = info.optional_properties().iter().map(|p| p.name()).collect();
    assert_eq!(required, vec!["title", "version"]);
    assert_eq!(optional, vec!["description", "license"]);
}

#[test]
fn test_schema_keyword_is_not_a_property() {
    let classes = compile(json!({
        "title": "Doc",
        "type": "object",
        "properties": {
            "$schema": { "type": "string" },
            "openrpc": { "type": "string" }
        }
    }));
    let names: Vec<_> = object(&classes[0]).properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["openrpc"]);
}

#[test]
fn test_union_scenario() {
    let classes = compile(json!({
        "title": "Holder",
        "type": "object",
        "properties": {
            "x": {
                "title": "AOrB",
                "oneOf": [ { "$ref": "#/A" }, { "$ref": "#/ReferenceB" } ]
            }
        }
    }));
    let holder = object(&classes[0]);
    let x = &holder.properties()[0];
    assert_eq!(x.target_type(), "AOrB");
    assert!(x.generic_type().is_none());
    let union = x.union_definition().unwrap();
    assert_eq!(union.name(), "AOrB");
    let branches: Vec<_> = union
        .branches()
        .iter()
        .map(|b| (b.name(), b.branch_type()))
        .collect();
    assert_eq!(branches, vec![("object", "A"), ("reference", "ReferenceB")]);
    assert!(union
        .imports()
        .contains("javax.annotation.processing.Generated"));
}

#[test]
fn test_array_generic_type() {
    let classes = compile(json!({
        "title": "Server",
        "type": "object",
        "properties": {
            "tags": { "type": "array", "items": { "$ref": "#/definitions/tagObject" } },
            "url": { "type": "string", "format": "uri" }
        }
    }));
    let server = object(&classes[0]);
    let tags = &server.properties()[0];
    assert_eq!(tags.target_type(), "List");
    assert_eq!(tags.generic_type(), Some("TagObject"));
    assert_eq!(tags.adapter(), "NamedListPrintable");
    assert!(!tags.is_union());

    let url = &server.properties()[1];
    assert!(url.generic_type().is_none());
    assert_eq!(url.target_type(), "URL");
    assert_eq!(url.to_string_method(), Some("toExternalForm"));
    assert_eq!(url.adapter(), "NamedStringPrintable");

    let imports = server.imports();
    assert!(imports.contains("java.util.List"));
    assert!(imports.contains("java.net.URL"));
    assert!(imports.contains("io.github.sebastiantoepfer.ddd.printables.core.NamedListPrintable"));
}

#[test]
fn test_array_without_items_is_malformed() {
    let err = SchemaCompiler::default()
        .compile_all(&node(json!({
            "title": "Bad",
            "type": "object",
            "properties": { "list": { "type": "array" } }
        })))
        .unwrap_err();
    assert_eq!(err.location(), "#/properties/list");
}

#[test]
fn test_array_of_one_of_becomes_union_named_by_element() {
    let classes = compile(json!({
        "title": "Document",
        "type": "object",
        "properties": {
            "methods": {
                "type": "array",
                "items": {
                    "title": "methodOrReference",
                    "oneOf": [
                        { "$ref": "#/definitions/methodObject" },
                        { "$ref": "#/definitions/referenceObject" }
                    ]
                }
            }
        }
    }));
    let methods = &object(&classes[0]).properties()[0];
    assert_eq!(methods.target_type(), "List");
    assert_eq!(methods.generic_type(), Some("MethodOrReference"));
    let union = methods.union_definition().unwrap();
    assert_eq!(union.name(), "MethodOrReference");
    let names: Vec<_> = union.branches().iter().map(UnionBranch::name).collect();
    assert_eq!(names, vec!["object", "reference"]);
}

#[test]
fn test_nested_schema_reference_becomes_builtin_union() {
    let compiler = SchemaCompiler::new(
        TypeMapping::new("org.example.schema.Schema"),
        AdapterRegistry::default(),
    );
    let classes = compiler
        .compile_all(&node(json!({
            "title": "ContentDescriptor",
            "type": "object",
            "properties": { "schema": { "$ref": "#/definitions/JSONSchema" } }
        })))
        .unwrap();
    let schema = &object(&classes[0]).properties()[0];
    assert_eq!(schema.target_type(), NESTED_UNION_NAME);
    let union = schema.union_definition().unwrap();
    assert_eq!(union.name(), NESTED_UNION_NAME);
    let branches: Vec<_> = union
        .branches()
        .iter()
        .map(|b| (b.name(), b.branch_type()))
        .collect();
    assert_eq!(
        branches,
        vec![("object", "Schema"), ("reference", "ReferenceObject")]
    );
    assert!(union.imports().contains("org.example.schema.Schema"));
}

#[test]
fn test_pattern_properties_scenario() {
    let classes = compile(json!({
        "title": "Ext",
        "type": "object",
        "patternProperties": {
            "^y-": { "type": "string" },
            "^.*$": { "$ref": "#/Widget" }
        }
    }));
    let ext = object(&classes[0]);
    assert_eq!(
        ext.additional_values(),
        Some(&AdditionalValues {
            pattern: "^.*$".to_string(),
            value_type: "Widget".to_string(),
        })
    );
    assert!(ext.imports().contains("java.util.regex.Pattern"));
    assert!(ext.imports().contains("java.util.HashMap"));
}

#[test]
fn test_imports_are_sorted_and_deduplicated() {
    let classes = compile(json!({
        "title": "Pair",
        "type": "object",
        "properties": {
            "a": { "type": "object" },
            "b": { "type": "object" }
        }
    }));
    let imports: Vec<_> = object(&classes[0]).imports().iter().cloned().collect();
    let mut sorted = imports.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(imports, sorted);
}

#[test]
fn test_enum_property() {
    let classes = compile(json!({
        "title": "Doc",
        "type": "object",
        "properties": {
            "enum": { "title": "openrpc", "enum": ["1.2.6", "1.3.0"] }
        }
    }));
    let doc = object(&classes[0]);
    let prop = &doc.properties()[0];
    assert_eq!(prop.variable_name(), "enumValue");
    assert_eq!(prop.target_type(), "Openrpc");
    assert_eq!(prop.to_string_method(), Some("toString"));
    assert_eq!(prop.adapter(), "NamedStringPrintable");
    assert_eq!(doc.enums().len(), 1);
    assert_eq!(doc.enums()[0].name, "Openrpc");
}

#[test]
fn test_traversal_is_depth_first_in_source_order() {
    let classes = compile(json!({
        "title": "Root",
        "type": "object",
        "properties": {
            "info": {
                "title": "Info",
                "type": "object",
                "properties": {
                    "contact": { "title": "Contact", "type": "object" }
                }
            },
            "name": { "type": "string" }
        },
        "definitions": {
            "specificationExtension": { "type": "object" },
            "JSONSchema": { "type": "object" },
            "licenseObject": { "title": "License", "type": "object" },
            "notAClass": { "type": "string" }
        }
    }));
    let names: Vec<_> = classes.iter().map(ClassModel::name).collect();
    assert_eq!(names, vec!["Root", "Info", "Contact", "License"]);
}

#[test]
fn test_untitled_objects_take_key_or_root_name() {
    let classes = SchemaCompiler::default()
        .with_root_name("OpenrpcDocument")
        .compile_all(&node(json!({
            "type": "object",
            "definitions": { "serverObject": { "type": "object" } }
        })))
        .unwrap();
    let names: Vec<_> = classes.iter().map(ClassModel::name).collect();
    assert_eq!(names, vec!["OpenrpcDocument", "ServerObject"]);
}

#[test]
fn test_compile_is_idempotent() {
    let schema = node(json!({
        "title": "Root",
        "type": "object",
        "properties": {
            "x": { "title": "aOrB", "oneOf": [ { "$ref": "#/A" } ] },
            "child": { "title": "Child", "type": "object" }
        }
    }));
    let compiler = SchemaCompiler::default();
    let first = compiler.compile_all(&schema).unwrap();
    let second = compiler.compile_all(&schema).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_compile_stops_after_first_error() {
    let schema = node(json!({
        "title": "Root",
        "type": "object",
        "properties": {
            "bad": {
                "title": "Bad",
                "type": "object",
                "properties": { "kind": { "enum": ["a"] } }
            },
            "good": { "title": "Good", "type": "object" }
        }
    }));
    let compiler = SchemaCompiler::default();
    let results: Vec<_> = compiler.compile(&schema).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.location(), "#/properties/bad/properties/kind");
}

#[test]
fn test_extra_registry_contributes_imports() {
    let compiler = SchemaCompiler::default().with_registry(Arc::new(Fixed {
        names: &["org.example.Extra"],
    }));
    let classes = compiler
        .compile_all(&node(json!({
            "title": "Thing",
            "type": "object",
            "properties": { "n": { "type": "integer" } }
        })))
        .unwrap();
    assert!(object(&classes[0]).imports().contains("org.example.Extra"));
}

#[test]
fn test_namespace_assignment() {
    let classes = compile(json!({
        "title": "Holder",
        "type": "object",
        "properties": {
            "x": { "title": "aOrB", "oneOf": [ { "$ref": "#/A" } ] }
        }
    }));
    let class = classes.into_iter().next().unwrap().with_namespace("org.example");
    assert_eq!(class.namespace(), "org.example");
    assert_eq!(class.name(), "Holder");
    let unions = class.unions();
    assert_eq!(unions.len(), 1);
    assert_eq!(unions[0].namespace(), "org.example");
    assert_eq!(unions[0].name(), "AOrB");
}

#[test]
fn test_first_char_helpers() {
    assert_eq!(first_char_upper("contactObject"), "ContactObject");
    assert_eq!(first_char_upper(""), "");
    assert_eq!(first_char_lower("Contact"), "contact");
}

// --- overrides of uri and adapter rows ---------------------------------------

#[test]
fn test_uri_mapped_to_another_type_is_not_printed_as_url() {
    let fragment = json!({
        "title": "Link",
        "type": "object",
        "properties": { "href": { "type": "string", "format": "uri" } }
    });

    let classes = compile(fragment.clone());
    let href = &object(&classes[0]).properties()[0];
    assert_eq!(href.target_type(), "URL");
    assert_eq!(href.to_string_method(), Some("toExternalForm"));

    let mapping =
        TypeMapping::default().with_type("uri", TargetType::qualified("URI", "java.net.URI"));
    let classes = SchemaCompiler::new(mapping, AdapterRegistry::default())
        .compile_all(&node(fragment))
        .unwrap();
    let link = object(&classes[0]);
    let href = &link.properties()[0];
    assert_eq!(href.target_type(), "URI");
    assert_eq!(href.to_string_method(), None);
    assert_eq!(href.adapter(), DEFAULT_ADAPTER);
    assert!(link.imports().contains("java.net.URI"));
    assert!(!link.imports().contains("java.net.URL"));
}

#[test]
fn test_with_adapter_keeps_qualified_names() {
    let adapters = AdapterRegistry::default()
        .with_adapter("BigDecimal", "org.example.print.DecimalPrintable")
        .with_adapter("Boolean", "NamedBooleanPrintable");
    assert_eq!(adapters.adapter_for("BigDecimal"), "DecimalPrintable");
    assert_eq!(
        adapters.qualified_name_of("DecimalPrintable").as_deref(),
        Some("org.example.print.DecimalPrintable")
    );
    assert_eq!(
        adapters.qualified_name_of("NamedBooleanPrintable").as_deref(),
        Some("io.github.sebastiantoepfer.ddd.printables.core.NamedBooleanPrintable")
    );
}

#[test]
fn test_custom_adapter_is_imported_from_its_own_package() {
    let fragment = node(json!({
        "title": "Price",
        "type": "object",
        "properties": { "amount": { "type": "number" } }
    }));
    let mapping = TypeMapping::default()
        .with_type("number", TargetType::qualified("BigDecimal", "java.math.BigDecimal"));
    let adapters = AdapterRegistry::default()
        .with_adapter("BigDecimal", "org.example.print.DecimalPrintable");
    let classes = SchemaCompiler::new(mapping, adapters)
        .compile_all(&fragment)
        .unwrap();
    let price = object(&classes[0]);

    assert_eq!(price.properties()[0].adapter(), "DecimalPrintable");
    assert!(price.imports().contains("org.example.print.DecimalPrintable"));
    assert!(price.imports().contains("java.math.BigDecimal"));
    assert!(!price
        .imports()
        .contains("io.github.sebastiantoepfer.ddd.printables.core.DecimalPrintable"));
}

#[test]
fn test_unqualified_custom_adapter_is_unresolvable() {
    let fragment = node(json!({
        "title": "Price",
        "type": "object",
        "properties": { "amount": { "type": "number" } }
    }));
    let mapping = TypeMapping::default()
        .with_type("number", TargetType::qualified("BigDecimal", "java.math.BigDecimal"));
    let adapters = AdapterRegistry::default().with_adapter("BigDecimal", "DecimalPrintable");
    let err = SchemaCompiler::new(mapping, adapters)
        .compile_all(&fragment)
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::UnresolvableAdapter {
            location: "#/properties/amount".to_string(),
            adapter: "DecimalPrintable".to_string(),
        }
    );
}
