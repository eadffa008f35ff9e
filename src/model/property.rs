use super::class::UnionClassModel;
use super::enums::EnumModel;
use super::registry::Typed;
use super::resolver::JsonType;

/// Keys that would clash with reserved words in generated code
const RESERVED_NAMES: [&str; 2] = ["default", "enum"];

/// One schema property of an object class
///
/// Built by the compiler; invariants:
/// - `generic_type` is set iff `raw_type` is `array`
/// - `enum_definition` is set iff `raw_type` is `enum`
/// - `union_definition` is set iff `raw_type` is `oneOf`, an array of `oneOf`,
///   or a reference to the nested-schema definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    pub(crate) name: String,
    pub(crate) raw_type: JsonType,
    pub(crate) target_type: String,
    pub(crate) nullable: bool,
    pub(crate) required: bool,
    pub(crate) has_interfaces: bool,
    pub(crate) generic_type: Option<String>,
    pub(crate) adapter: String,
    pub(crate) to_string_method: Option<String>,
    pub(crate) enum_definition: Option<EnumModel>,
    pub(crate) union_definition: Option<UnionClassModel>,
    pub(crate) location: String,
}

impl PropertyModel {
    /// Key of the property in the schema
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name usable as a variable: reserved keys get a `Value` suffix
    pub fn variable_name(&self) -> String {
        if RESERVED_NAMES.contains(&self.name.as_str()) {
            format!("{}Value", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn raw_type(&self) -> &JsonType {
        &self.raw_type
    }

    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_interfaces(&self) -> bool {
        self.has_interfaces
    }

    pub fn generic_type(&self) -> Option<&str> {
        self.generic_type.as_deref()
    }

    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    /// Conversion used before printing (`toExternalForm` for URLs, `toString` for enums)
    pub fn to_string_method(&self) -> Option<&str> {
        self.to_string_method.as_deref()
    }

    pub fn enum_definition(&self) -> Option<&EnumModel> {
        self.enum_definition.as_ref()
    }

    pub fn union_definition(&self) -> Option<&UnionClassModel> {
        self.union_definition.as_ref()
    }

    pub fn is_enum(&self) -> bool {
        self.enum_definition.is_some()
    }

    pub fn is_union(&self) -> bool {
        self.union_definition.is_some()
    }

    pub fn is_array(&self) -> bool {
        self.raw_type.is_array()
    }
}

impl Typed for PropertyModel {
    fn type_name(&self) -> &str {
        &self.target_type
    }

    fn generic_type(&self) -> Option<&str> {
        self.generic_type.as_deref()
    }

    fn adapter(&self) -> Option<&str> {
        Some(&self.adapter)
    }

    fn location(&self) -> &str {
        &self.location
    }
}
