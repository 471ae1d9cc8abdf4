//! Streaming JSON token layer.
//!
//! This crate is the wire surface that generated adapters read from and
//! write to. It exposes exactly one token of lookahead ([`JsonReader::peek`])
//! over a strictly sequential, single-pass cursor, plus a matching
//! [`JsonWriter`]. There is no document model here: values are consumed
//! token by token, and a whole value can be discarded in one call with
//! [`JsonReader::skip_value`].
//!
//! The grammar is plain nested JSON over UTF-8 text: begin/end object,
//! begin/end array, name, string, number, boolean, null.

mod error;
mod read;
mod token;
mod write;

pub use error::StreamError;
pub use read::JsonReader;
pub use token::TokenKind;
pub use write::JsonWriter;
