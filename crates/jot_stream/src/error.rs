use crate::TokenKind;

/// Errors produced by the token layer.
///
/// Reader errors carry the byte offset they were detected at. `Io` only
/// occurs on the writer side.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    #[error("unexpected character `{found}` at offset {at}")]
    UnexpectedCharacter { found: char, at: usize },

    #[error("expected {expected} but found {found} at offset {at}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        at: usize,
    },

    #[error("malformed number `{text}` at offset {at}")]
    NumberFormat { text: String, at: usize },

    #[error("malformed string escape at offset {0}")]
    BadEscape(usize),

    #[error("reader is not positioned inside an object or array")]
    NotInContainer,

    #[error("invalid stream state: {0}")]
    InvalidState(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
