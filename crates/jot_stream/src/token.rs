use core::fmt;

/// The kind of the next token a [`JsonReader`](crate::JsonReader) will
/// produce.
///
/// `Name` is only reported inside an object, between entries; everywhere
/// else the reader reports value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Name,
    Str,
    Number,
    Bool,
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::BeginObject => "begin-object",
            Self::EndObject => "end-object",
            Self::BeginArray => "begin-array",
            Self::EndArray => "end-array",
            Self::Name => "name",
            Self::Str => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Null => "null",
        };
        f.write_str(text)
    }
}
