//! Build-time synthesis of streaming JSON adapters.
//!
//! The host hands this crate the classes it discovered ([`ClassDecl`]
//! values over the [`TypeDesc`] descriptor model); [`discover`] validates
//! them and seals the set of supported types; [`AdapterSynthesizer`] then
//! emits, per class, a flattened concrete struct and an `Adapter`
//! implementation against the runtime crates. Fields inherited from
//! generic ancestors are resolved to concrete types before any code is
//! emitted.
//!
//! The passes are strictly batch and two-phase: synthesis decisions
//! (direct call vs. delegation through the runtime adapter registry)
//! depend on the complete, closed set of supported types, so the registry
//! never changes once synthesis begins.
//!
//! ```
//! use jot_gen::{
//!     AdapterSynthesizer, ClassDecl, FieldDecl, GenConfig, TypeDesc, discover,
//! };
//!
//! let decls = vec![
//!     ClassDecl::new("Video")
//!         .with_field(FieldDecl::new("title", TypeDesc::Str)),
//!     ClassDecl::new("Factory")
//!         .with_type_params(&["T"])
//!         .with_field(FieldDecl::new("data", TypeDesc::var("T"))),
//!     ClassDecl::new("VideoFactory").marked().extending(TypeDesc::object(
//!         "Factory",
//!         vec![TypeDesc::object("Video", Vec::new())],
//!     )),
//! ];
//!
//! let discovery = discover(decls, GenConfig::default());
//! assert!(discovery.rejected.is_empty());
//!
//! let output = AdapterSynthesizer::new(&discovery.context).synthesize_all();
//! assert!(output.failures.is_empty());
//! assert_eq!(output.items.len(), 2); // Video and VideoFactory
//! ```

mod error;
pub mod model;
mod path;
pub mod registry;
pub mod resolve;
pub mod synth;

pub use error::GenError;
pub use model::{ClassDecl, ClassName, DeclModel, FieldDecl, Primitive, ResolvedField, TypeDesc};
pub use registry::{Discovery, GenConfig, GenContext, SupportedTypes, discover};
pub use synth::{AdapterSynthesizer, SynthesisOutput};
