use jot_stream::StreamError;

/// Errors raised while parsing a value through an adapter.
///
/// Token-level tolerance (skip on unknown key or kind mismatch) never
/// produces an error; what does reach this type is either a broken stream
/// or a failure inside a nested object adapter, which is wrapped with the
/// enclosing class and field so deep nesting stays debuggable.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("error parsing {class}.{field}")]
    Field {
        class: &'static str,
        field: &'static str,
        #[source]
        source: Box<ParseError>,
    },

    #[error("no adapter registered for type `{0}`")]
    NoAdapter(&'static str),

    #[error("adapter for `{0}` produced a value of the wrong type")]
    AdapterType(&'static str),
}

impl ParseError {
    /// Wraps a nested failure with the enclosing class and field name.
    pub fn in_field(class: &'static str, field: &'static str, source: ParseError) -> Self {
        ParseError::Field {
            class,
            field,
            source: Box::new(source),
        }
    }
}

/// Errors raised while writing a value through an adapter.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("no adapter registered for type `{0}`")]
    NoAdapter(&'static str),

    #[error("value handed to the adapter for `{0}` has the wrong type")]
    ValueType(&'static str),
}
