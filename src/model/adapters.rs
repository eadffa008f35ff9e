use super::mapping::simple_name;
use super::registry::{TypeRegistry, Typed};
use crate::error::CompileError;
use std::collections::{BTreeMap, BTreeSet};

/// Adapter used for any type without a dedicated one
pub const DEFAULT_ADAPTER: &str = "NamedPrintable";
/// Package the builtin adapters live in
pub const DEFAULT_ADAPTER_PACKAGE: &str = "io.github.sebastiantoepfer.ddd.printables.core";
/// Adapters shipped in [`DEFAULT_ADAPTER_PACKAGE`]; these may be named unqualified
pub const BUILTIN_ADAPTERS: [&str; 5] = [
    DEFAULT_ADAPTER,
    "NamedStringPrintable",
    "NamedListPrintable",
    "NamedBooleanPrintable",
    "NamedNumberPrintable",
];

/// Target type name → printable adapter
///
/// A property's value is printed through its adapter (`NamedStringPrintable`
/// for `String`, `NamedListPrintable` for `List`, ...). Adapters are stored
/// by qualified name; templates see the simple name. As a [`TypeRegistry`]
/// it contributes the qualified name of the adapter a property asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRegistry {
    default_adapter: String,
    by_type: BTreeMap<String, String>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let registry = AdapterRegistry {
            default_adapter: builtin(DEFAULT_ADAPTER),
            by_type: BTreeMap::new(),
        };
        [
            ("String", "NamedStringPrintable"),
            ("URL", "NamedStringPrintable"),
            ("List", "NamedListPrintable"),
            ("boolean", "NamedBooleanPrintable"),
            ("long", "NamedNumberPrintable"),
        ]
        .into_iter()
        .fold(registry, |registry, (ty, adapter)| {
            registry.with_adapter(ty, adapter)
        })
    }
}

fn builtin(adapter: &str) -> String {
    format!("{DEFAULT_ADAPTER_PACKAGE}.{adapter}")
}

impl AdapterRegistry {
    /// Map `type_name` to `adapter`, replacing any previous entry
    ///
    /// `adapter` is a qualified name (`org.example.DecimalPrintable`) or the
    /// simple name of a builtin adapter. An unqualified name that is not a
    /// builtin is kept as is and fails to resolve when a property uses it.
    pub fn with_adapter(mut self, type_name: &str, adapter: &str) -> Self {
        let qualified = if !adapter.contains('.') && BUILTIN_ADAPTERS.contains(&adapter) {
            builtin(adapter)
        } else {
            adapter.to_string()
        };
        self.by_type.insert(type_name.to_string(), qualified);
        self
    }

    /// Simple name of the adapter for a target type name, [`DEFAULT_ADAPTER`]
    /// when none is registered
    pub fn adapter_for(&self, type_name: &str) -> &str {
        let qualified = self
            .by_type
            .get(type_name)
            .unwrap_or(&self.default_adapter);
        simple_name(qualified)
    }

    /// Qualified name of a registered adapter, looked up by simple name
    pub fn qualified_name_of(&self, adapter: &str) -> Option<String> {
        std::iter::once(&self.default_adapter)
            .chain(self.by_type.values())
            .find(|qualified| qualified.contains('.') && simple_name(qualified) == adapter)
            .cloned()
    }
}

impl TypeRegistry for AdapterRegistry {
    fn qualified_names_of(&self, typed: &dyn Typed) -> Result<BTreeSet<String>, CompileError> {
        let Some(adapter) = typed.adapter() else {
            return Ok(BTreeSet::new());
        };
        match self.qualified_name_of(adapter) {
            Some(name) => Ok(BTreeSet::from([name])),
            None => Err(CompileError::UnresolvableAdapter {
                location: typed.location().to_string(),
                adapter: adapter.to_string(),
            }),
        }
    }
}
