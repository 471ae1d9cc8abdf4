//! Runtime surface for generated JSON adapters.
//!
//! Generated code is plain Rust against this crate: an [`Adapter`]
//! implementation per class, the [`parse_object_fields`] driver for the
//! field loop, [`write_list`]/[`parse_list`] and [`write_map`]/[`parse_map`]
//! for container fields, and the [`AdapterRegistry`] for every object-kind
//! field whose type has no generated adapter.
//!
//! Absence and tolerance rules live here so they are identical for every
//! generated class: absent fields write nothing, null and mismatched
//! values parse to defaults, unknown keys are skipped, and only failures
//! inside nested object adapters are fatal (wrapped with class and field
//! context, never swallowed).

mod adapter;
mod containers;
mod driver;
mod error;
mod registry;

pub use adapter::{Adapter, FieldOutcome};
pub use containers::{parse_list, parse_map, write_list, write_map};
pub use driver::parse_object_fields;
pub use error::{ParseError, WriteError};
#[cfg(feature = "auto_register")]
pub use registry::AdapterRegistration;
pub use registry::{AdapterRegistry, TypedAdapter};
