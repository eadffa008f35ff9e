use crate::error::CompileError;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Anything a registry can be asked about: a property or a union branch
pub trait Typed {
    /// Primary target type name (`List`, `ContactObject`, `long`, ...)
    fn type_name(&self) -> &str;
    /// Element type for arrays
    fn generic_type(&self) -> Option<&str>;
    /// Adapter wrapping the value, if the item is printed through one
    fn adapter(&self) -> Option<&str>;
    /// Location used when reporting a failure
    fn location(&self) -> &str;
}

/// Source of fully qualified import names
///
/// Implementations are read-only during a pass and shared between compilers,
/// hence the `Send + Sync` bound.
pub trait TypeRegistry: Send + Sync {
    /// Qualified names needed to use `typed` in a generated class
    ///
    /// # Errors
    ///
    /// A registry may reject an item it is responsible for but cannot serve
    /// (e.g. an unknown adapter).
    fn qualified_names_of(&self, typed: &dyn Typed) -> Result<BTreeSet<String>, CompileError>;
}

/// Ordered list of registries queried as one
///
/// The result is the set union of every member's answer, so composition is
/// commutative and adding the same registry twice changes nothing. Blank
/// names are dropped. The first member error aborts the query.
#[derive(Clone, Default)]
pub struct CompositeTypeRegistry {
    registries: Vec<Arc<dyn TypeRegistry>>,
}

impl CompositeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: Arc<dyn TypeRegistry>) -> Self {
        self.registries.push(registry);
        self
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

impl fmt::Debug for CompositeTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTypeRegistry")
            .field("registries", &self.registries.len())
            .finish()
    }
}

impl TypeRegistry for CompositeTypeRegistry {
    fn qualified_names_of(&self, typed: &dyn Typed) -> Result<BTreeSet<String>, CompileError> {
        let mut names = BTreeSet::new();
        for registry in &self.registries {
            names.extend(
                registry
                    .qualified_names_of(typed)?
                    .into_iter()
                    .filter(|name| !name.trim().is_empty()),
            );
        }
        Ok(names)
    }
}
