use jot_stream::{JsonReader, JsonWriter};

use crate::registry::AdapterRegistry;
use crate::{ParseError, WriteError};

/// The generated serialize/deserialize pair for one concrete class.
///
/// Both directions model absence explicitly: `write` accepts `None` and
/// emits an empty object for it, `parse` returns `None` when the stream
/// holds a null or an unparseable top-level value. The registry parameter
/// is the seam through which fields of types *without* a generated adapter
/// stay interoperable.
pub trait Adapter: Sized {
    fn write(
        writer: &mut JsonWriter<'_>,
        adapters: &AdapterRegistry,
        value: Option<&Self>,
    ) -> Result<(), WriteError>;

    fn parse(
        reader: &mut JsonReader<'_>,
        adapters: &AdapterRegistry,
    ) -> Result<Option<Self>, ParseError>;
}

/// What happened to one object entry during a field loop.
///
/// Generated parse code dispatches each entry by name and reports the
/// outcome explicitly instead of signalling skips through errors: a kind
/// mismatch on a recognized field and an unrecognized name are both
/// tolerated, they just leave the field at its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The value matched the field's expected shape and was assigned.
    Assigned,
    /// The name was recognized but the value token had the wrong kind;
    /// the value was skipped.
    SkippedMismatch,
    /// The name matched no field; the driver skips the value.
    SkippedUnknown,
}
