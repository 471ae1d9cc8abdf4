use std::collections::HashMap;

use jot_stream::{JsonReader, JsonWriter, TokenKind};

use crate::{ParseError, WriteError};

/// Writes a begin/end-array bracketed sequence, delegating each element to
/// the given strategy.
///
/// An absent list still brackets: `None` writes `[]`. Generated field code
/// guards for presence before emitting the key, so it always passes
/// `Some`; the absent case exists for direct callers.
pub fn write_list<T>(
    writer: &mut JsonWriter<'_>,
    list: Option<&[T]>,
    mut write_item: impl FnMut(&mut JsonWriter<'_>, &T) -> Result<(), WriteError>,
) -> Result<(), WriteError> {
    writer.begin_array()?;
    if let Some(list) = list {
        for item in list {
            write_item(writer, item)?;
        }
    }
    writer.end_array()?;
    Ok(())
}

/// Reads a begin/end-array bracketed sequence, delegating each element to
/// the given strategy.
///
/// A value that is not an array is skipped and reported absent. Elements
/// the strategy reports absent (nulls, kind mismatches) are dropped rather
/// than stored.
pub fn parse_list<T>(
    reader: &mut JsonReader<'_>,
    mut parse_item: impl FnMut(&mut JsonReader<'_>) -> Result<Option<T>, ParseError>,
) -> Result<Option<Vec<T>>, ParseError> {
    if reader.peek()? != TokenKind::BeginArray {
        reader.skip_value()?;
        return Ok(None);
    }
    reader.begin_array()?;
    let mut items = Vec::new();
    while reader.has_next()? {
        if let Some(item) = parse_item(reader)? {
            items.push(item);
        }
    }
    reader.end_array()?;
    Ok(Some(items))
}

/// Writes a string-keyed map as a begin/end-object bracketed sequence of
/// key/value pairs, delegating each value to the given strategy.
pub fn write_map<V>(
    writer: &mut JsonWriter<'_>,
    map: Option<&HashMap<String, V>>,
    mut write_value: impl FnMut(&mut JsonWriter<'_>, &V) -> Result<(), WriteError>,
) -> Result<(), WriteError> {
    writer.begin_object()?;
    if let Some(map) = map {
        for (key, value) in map {
            writer.name(key)?;
            write_value(writer, value)?;
        }
    }
    writer.end_object()?;
    Ok(())
}

/// Reads a string-keyed map, delegating each value to the given strategy.
///
/// A value that is not an object is skipped and reported absent. Entries
/// whose value is null, or that the strategy reports absent, are dropped.
pub fn parse_map<V>(
    reader: &mut JsonReader<'_>,
    mut parse_value: impl FnMut(&mut JsonReader<'_>) -> Result<Option<V>, ParseError>,
) -> Result<Option<HashMap<String, V>>, ParseError> {
    if reader.peek()? != TokenKind::BeginObject {
        reader.skip_value()?;
        return Ok(None);
    }
    reader.begin_object()?;
    let mut map = HashMap::new();
    while reader.has_next()? {
        let key = reader.next_name()?;
        if reader.peek()? == TokenKind::Null {
            reader.skip_value()?;
            continue;
        }
        if let Some(value) = parse_value(reader)? {
            map.insert(key, value);
        }
    }
    reader.end_object()?;
    Ok(Some(map))
}
