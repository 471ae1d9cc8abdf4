//! The language-agnostic model the generator works over: type descriptors
//! extracted from the host's type system, and the declarations the host
//! discovered.
//!
//! All resolution and synthesis logic operates purely on this model; the
//! native introspection facility (`syn` here) is only touched once, while
//! constructing descriptors.

mod declare;
mod descriptor;

pub use declare::{ClassDecl, ClassName, DeclModel, FieldDecl, ResolvedField};
pub use descriptor::{Primitive, TypeDesc};
