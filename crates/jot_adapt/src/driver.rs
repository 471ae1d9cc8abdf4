use jot_stream::{JsonReader, TokenKind};

use crate::{FieldOutcome, ParseError};

/// Drives the field loop of a generated `parse` implementation.
///
/// The sequence is fixed: peek the next token; a null is consumed and
/// reported as absent (`Ok(false)`); anything other than begin-object is
/// skipped and also reported as absent — malformed input is tolerated, not
/// fatal. Otherwise the object is entered and `on_field` is called once per
/// non-null entry with the entry name and the reader positioned at the
/// value. The closure assigns recognized fields itself and reports a
/// [`FieldOutcome`]; for [`FieldOutcome::SkippedUnknown`] the driver
/// discards the value. Null entry values are consumed and skipped before
/// dispatch. On loop exit the end-object token is consumed, so nesting is
/// balanced on every path that returns `Ok`.
pub fn parse_object_fields(
    reader: &mut JsonReader<'_>,
    mut on_field: impl FnMut(&str, &mut JsonReader<'_>) -> Result<FieldOutcome, ParseError>,
) -> Result<bool, ParseError> {
    match reader.peek()? {
        TokenKind::Null => {
            reader.next_null()?;
            return Ok(false);
        }
        TokenKind::BeginObject => {}
        _ => {
            reader.skip_value()?;
            return Ok(false);
        }
    }
    reader.begin_object()?;
    while reader.has_next()? {
        let name = reader.next_name()?;
        if reader.peek()? == TokenKind::Null {
            reader.skip_value()?;
            continue;
        }
        match on_field(&name, reader)? {
            FieldOutcome::Assigned | FieldOutcome::SkippedMismatch => {}
            FieldOutcome::SkippedUnknown => reader.skip_value()?,
        }
    }
    reader.end_object()?;
    Ok(true)
}
