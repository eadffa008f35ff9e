use super::enums::EnumModel;
use super::mapping::Capability;
use super::property::PropertyModel;
use super::registry::Typed;
use std::collections::BTreeSet;

/// Branch name for alternatives whose type is a reference
pub const REFERENCE_BRANCH: &str = "reference";
/// Branch name for every other alternative
pub const OBJECT_BRANCH: &str = "object";

/// Pattern-keyed open map of an object class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalValues {
    /// Key pattern, as written under `patternProperties`
    pub pattern: String,
    /// Target type of the values
    pub value_type: String,
}

/// One alternative of a union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionBranch {
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) nullable: bool,
    pub(crate) interfaces: Vec<Capability>,
    pub(crate) location: String,
}

impl UnionBranch {
    pub(crate) fn new(
        type_name: String,
        nullable: bool,
        interfaces: Vec<Capability>,
        location: String,
    ) -> Self {
        let name = if type_name.starts_with("Reference") {
            REFERENCE_BRANCH
        } else {
            OBJECT_BRANCH
        };
        UnionBranch {
            name: name.to_string(),
            type_name,
            nullable,
            interfaces,
            location,
        }
    }

    /// `reference` or `object`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch_type(&self) -> &str {
        &self.type_name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn interfaces(&self) -> &[Capability] {
        &self.interfaces
    }

    fn same_content(&self, other: &UnionBranch) -> bool {
        self.name == other.name
            && self.type_name == other.type_name
            && self.nullable == other.nullable
            && self.interfaces == other.interfaces
    }
}

impl Typed for UnionBranch {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn generic_type(&self) -> Option<&str> {
        None
    }

    fn adapter(&self) -> Option<&str> {
        None
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// A `oneOf` alternative set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionClassModel {
    pub(crate) name: String,
    pub(crate) branches: Vec<UnionBranch>,
    pub(crate) imports: BTreeSet<String>,
}

impl UnionClassModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branches(&self) -> &[UnionBranch] {
        &self.branches
    }

    /// Same name and branches, wherever in the schema each was declared
    pub fn same_content(&self, other: &UnionClassModel) -> bool {
        self.name == other.name
            && self.branches.len() == other.branches.len()
            && self
                .branches
                .iter()
                .zip(&other.branches)
                .all(|(a, b)| a.same_content(b))
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }
}

/// An object-typed fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectClassModel {
    pub(crate) name: String,
    pub(crate) properties: Vec<PropertyModel>,
    pub(crate) imports: BTreeSet<String>,
    pub(crate) additional_values: Option<AdditionalValues>,
}

impl ObjectClassModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every property in source order
    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }

    /// Properties listed in `required`, in source order
    pub fn required_properties(&self) -> Vec<&PropertyModel> {
        self.properties.iter().filter(|p| p.is_required()).collect()
    }

    /// Properties not listed in `required`, in source order
    pub fn optional_properties(&self) -> Vec<&PropertyModel> {
        self.properties.iter().filter(|p| !p.is_required()).collect()
    }

    /// Enumerations declared by the properties, in property order
    pub fn enums(&self) -> Vec<&EnumModel> {
        self.properties
            .iter()
            .filter_map(PropertyModel::enum_definition)
            .collect()
    }

    /// Unions declared by the properties, in property order
    pub fn unions(&self) -> Vec<&UnionClassModel> {
        self.properties
            .iter()
            .filter_map(PropertyModel::union_definition)
            .collect()
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    pub fn has_additional_values(&self) -> bool {
        self.additional_values.is_some()
    }

    pub fn additional_values(&self) -> Option<&AdditionalValues> {
        self.additional_values.as_ref()
    }
}

/// A compiled class, before a namespace is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassModel {
    Object(ObjectClassModel),
    Union(UnionClassModel),
}

impl ClassModel {
    pub fn name(&self) -> &str {
        match self {
            ClassModel::Object(object) => object.name(),
            ClassModel::Union(union) => union.name(),
        }
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        match self {
            ClassModel::Object(object) => object.imports(),
            ClassModel::Union(union) => union.imports(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectClassModel> {
        match self {
            ClassModel::Object(object) => Some(object),
            ClassModel::Union(_) => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionClassModel> {
        match self {
            ClassModel::Union(union) => Some(union),
            ClassModel::Object(_) => None,
        }
    }

    /// Assign the namespace; consumes the model so it can only happen once
    pub fn with_namespace(self, namespace: impl Into<String>) -> NamespacedClass {
        NamespacedClass {
            namespace: namespace.into(),
            model: self,
        }
    }
}

/// A class with its namespace, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacedClass {
    namespace: String,
    model: ClassModel,
}

impl NamespacedClass {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        self.model.name()
    }

    pub fn model(&self) -> &ClassModel {
        &self.model
    }

    /// Unions declared by this class, sharing its namespace
    pub fn unions(&self) -> Vec<NamespacedClass> {
        match &self.model {
            ClassModel::Object(object) => object
                .unions()
                .into_iter()
                .map(|union| ClassModel::Union(union.clone()).with_namespace(self.namespace.clone()))
                .collect(),
            ClassModel::Union(_) => Vec::new(),
        }
    }
}
