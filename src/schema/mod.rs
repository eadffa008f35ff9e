//! # Schema Module
//!
//! Loading and navigation of the source schema document.
//!
//! A schema is read once per pass into a [`SchemaNode`], an ordered map from
//! key to JSON value. Key order is the order of the source document and is what
//! every later stage (class order, property order) follows.

mod load;
mod types;

pub use load::*;
pub use types::*;
