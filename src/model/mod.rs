//! # Model Module
//!
//! Compiles a schema document into the class model consumed by the templates.
//!
//! ## Overview
//!
//! ```text
//! SchemaNode → resolve_json_type → TypeMapping → PropertyModel → ObjectClassModel
//!                                                      └──────→ UnionClassModel
//! ```
//!
//! - **[`resolve_json_type`]** - Classifies a fragment (`$ref`, `enum`, `oneOf`, `uri`, `type`)
//! - **[`TypeMapping`]** - Maps a classification to a target type name, nullability and
//!   capability interfaces
//! - **[`AdapterRegistry`]** - Picks the printable adapter used to wrap a property value
//! - **[`CompositeTypeRegistry`]** - Unions the import names contributed by every registry
//! - **[`SchemaCompiler`]** - Walks the document and yields one [`ClassModel`] per
//!   object-typed fragment
//!
//! ## Class Discovery
//!
//! The root fragment always yields a class. Entries under `properties` and then
//! `definitions` that declare `"type": "object"` are compiled the same way,
//! depth-first, in source order. `specificationExtension` and `JSONSchema`
//! never become classes.
//!
//! ## Unions
//!
//! Three kinds of property produce a [`UnionClassModel`]:
//!
//! - a `oneOf` fragment, named from its `title`
//! - an array whose `items` is a `oneOf` fragment, named from the element type
//! - a reference to the nested `JSONSchema` definition, which becomes the builtin
//!   `JsonSchemaOrReference` union of the document type and `referenceObject`

mod adapters;
mod class;
mod compiler;
mod enums;
mod mapping;
mod property;
mod registry;
mod resolver;
#[cfg(test)]
mod tests;

pub use adapters::*;
pub use class::*;
pub use compiler::*;
pub use enums::*;
pub use mapping::*;
pub use property::*;
pub use registry::*;
pub use resolver::*;

/// Upper-case the first character, leave the rest untouched
///
/// `contactObject` → `ContactObject`, `openrpc` → `Openrpc`.
pub fn first_char_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case the first character, leave the rest untouched
pub fn first_char_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
