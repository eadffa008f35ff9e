//! Template contexts
//!
//! Every attribute a template can see is declared here. Models are borrowed,
//! never copied into owned strings except for derived values.

use crate::model::{EnumModel, ObjectClassModel, PropertyModel, UnionClassModel};
use serde::Serialize;

/// Context of the `object` template
#[derive(Debug, Serialize)]
pub struct ObjectContext<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub imports: Vec<&'a str>,
    /// All properties in source order
    pub properties: Vec<PropertyContext<'a>>,
    pub required_properties: Vec<PropertyContext<'a>>,
    pub optional_properties: Vec<PropertyContext<'a>>,
    pub enums: Vec<EnumContext<'a>>,
    pub has_additional_values: bool,
    pub additional_values: Option<AdditionalValuesContext<'a>>,
}

impl<'a> ObjectContext<'a> {
    pub fn new(namespace: &'a str, model: &'a ObjectClassModel) -> Self {
        ObjectContext {
            name: model.name(),
            namespace,
            imports: model.imports().iter().map(String::as_str).collect(),
            properties: model.properties().iter().map(PropertyContext::new).collect(),
            required_properties: model
                .required_properties()
                .into_iter()
                .map(PropertyContext::new)
                .collect(),
            optional_properties: model
                .optional_properties()
                .into_iter()
                .map(PropertyContext::new)
                .collect(),
            enums: model.enums().into_iter().map(EnumContext::new).collect(),
            has_additional_values: model.has_additional_values(),
            additional_values: model.additional_values().map(|values| {
                AdditionalValuesContext {
                    pattern: &values.pattern,
                    value_type: &values.value_type,
                }
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyContext<'a> {
    pub name: &'a str,
    pub variable_name: String,
    pub raw_type: &'a str,
    #[serde(rename = "type")]
    pub type_name: &'a str,
    pub nullable: bool,
    pub required: bool,
    pub has_interfaces: bool,
    pub generic_type: Option<&'a str>,
    pub adapter: &'a str,
    pub to_string_method: Option<&'a str>,
    pub is_enum: bool,
    pub is_union: bool,
    pub is_array: bool,
}

impl<'a> PropertyContext<'a> {
    pub fn new(property: &'a PropertyModel) -> Self {
        PropertyContext {
            name: property.name(),
            variable_name: property.variable_name(),
            raw_type: property.raw_type().token(),
            type_name: property.target_type(),
            nullable: property.is_nullable(),
            required: property.is_required(),
            has_interfaces: property.has_interfaces(),
            generic_type: property.generic_type(),
            adapter: property.adapter(),
            to_string_method: property.to_string_method(),
            is_enum: property.is_enum(),
            is_union: property.is_union(),
            is_array: property.is_array(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnumContext<'a> {
    pub name: &'a str,
    pub values: Vec<EnumValueContext<'a>>,
}

impl<'a> EnumContext<'a> {
    pub fn new(model: &'a EnumModel) -> Self {
        EnumContext {
            name: &model.name,
            values: model
                .values
                .iter()
                .map(|value| EnumValueContext {
                    value: &value.value,
                    identifier: &value.identifier,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnumValueContext<'a> {
    pub value: &'a str,
    pub identifier: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AdditionalValuesContext<'a> {
    pub pattern: &'a str,
    pub value_type: &'a str,
}

/// Context of the `alternative` template
#[derive(Debug, Serialize)]
pub struct UnionContext<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub imports: Vec<&'a str>,
    pub alternatives: Vec<AlternativeContext<'a>>,
}

impl<'a> UnionContext<'a> {
    pub fn new(namespace: &'a str, model: &'a UnionClassModel) -> Self {
        UnionContext {
            name: model.name(),
            namespace,
            imports: model.imports().iter().map(String::as_str).collect(),
            alternatives: model
                .branches()
                .iter()
                .map(|branch| AlternativeContext {
                    name: branch.name(),
                    type_name: branch.branch_type(),
                    nullable: branch.is_nullable(),
                    has_interfaces: !branch.interfaces().is_empty(),
                    interfaces: branch
                        .interfaces()
                        .iter()
                        .map(|capability| capability.name.as_str())
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlternativeContext<'a> {
    /// `object` or `reference`
    pub name: &'a str,
    #[serde(rename = "type")]
    pub type_name: &'a str,
    pub nullable: bool,
    pub has_interfaces: bool,
    /// Simple names of the capability interfaces
    pub interfaces: Vec<&'a str>,
}
