#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use jot_adapt as adapt;
pub use jot_gen as codegen;
pub use jot_stream as stream;
