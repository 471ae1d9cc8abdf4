use std::io::Write;

use crate::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Object,
    Array,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    first: bool,
}

/// A streaming JSON writer over any [`std::io::Write`] sink.
///
/// Separators and key quoting are handled by the writer; callers emit
/// tokens in grammar order (`begin_object`, `name`, value, ...,
/// `end_object`). Emitting a value in an object scope without a preceding
/// [`name`](Self::name) is an error, as is closing a scope that was never
/// opened.
///
/// # Example
///
/// ```
/// use jot_stream::JsonWriter;
///
/// let mut out = Vec::new();
/// let mut writer = JsonWriter::new(&mut out);
/// writer.begin_object().unwrap();
/// writer.name("id").unwrap();
/// writer.i64_value(7).unwrap();
/// writer.name("tags").unwrap();
/// writer.begin_array().unwrap();
/// writer.str_value("a").unwrap();
/// writer.end_array().unwrap();
/// writer.end_object().unwrap();
/// assert_eq!(out, br#"{"id":7,"tags":["a"]}"#);
/// ```
pub struct JsonWriter<'w> {
    out: &'w mut dyn Write,
    stack: Vec<Scope>,
    pending_name: bool,
}

impl<'w> JsonWriter<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        JsonWriter {
            out,
            stack: Vec::new(),
            pending_name: false,
        }
    }

    pub fn begin_object(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.write_all(b"{")?;
        self.stack.push(Scope {
            kind: ScopeKind::Object,
            first: true,
        });
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<(), StreamError> {
        self.close(ScopeKind::Object, b"}")
    }

    pub fn begin_array(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.write_all(b"[")?;
        self.stack.push(Scope {
            kind: ScopeKind::Array,
            first: true,
        });
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<(), StreamError> {
        self.close(ScopeKind::Array, b"]")
    }

    /// Emits an entry key (with separator and quoting) inside an object.
    pub fn name(&mut self, key: &str) -> Result<(), StreamError> {
        if self.pending_name {
            return Err(StreamError::InvalidState("two names in a row"));
        }
        let needs_comma = match self.stack.last_mut() {
            Some(scope) if scope.kind == ScopeKind::Object => {
                let first = scope.first;
                scope.first = false;
                !first
            }
            _ => return Err(StreamError::InvalidState("name written outside an object")),
        };
        if needs_comma {
            self.out.write_all(b",")?;
        }
        self.write_escaped(key)?;
        self.out.write_all(b":")?;
        self.pending_name = true;
        Ok(())
    }

    pub fn str_value(&mut self, value: &str) -> Result<(), StreamError> {
        self.before_value()?;
        self.write_escaped(value)
    }

    pub fn i64_value(&mut self, value: i64) -> Result<(), StreamError> {
        self.before_value()?;
        write!(self.out, "{value}")?;
        Ok(())
    }

    pub fn f64_value(&mut self, value: f64) -> Result<(), StreamError> {
        if !value.is_finite() {
            return Err(StreamError::InvalidState(
                "non-finite numbers are not valid JSON",
            ));
        }
        self.before_value()?;
        write!(self.out, "{value}")?;
        Ok(())
    }

    pub fn bool_value(&mut self, value: bool) -> Result<(), StreamError> {
        self.before_value()?;
        self.out
            .write_all(if value { b"true" } else { b"false" })?;
        Ok(())
    }

    pub fn null_value(&mut self) -> Result<(), StreamError> {
        self.before_value()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals

    /// Emits the separator a value needs in the current scope.
    fn before_value(&mut self) -> Result<(), StreamError> {
        if self.pending_name {
            self.pending_name = false;
            return Ok(());
        }
        match self.stack.last_mut() {
            None => Ok(()),
            Some(scope) if scope.kind == ScopeKind::Array => {
                if scope.first {
                    scope.first = false;
                } else {
                    self.out.write_all(b",")?;
                }
                Ok(())
            }
            Some(_) => Err(StreamError::InvalidState(
                "value written without a preceding name",
            )),
        }
    }

    fn close(&mut self, kind: ScopeKind, closer: &[u8]) -> Result<(), StreamError> {
        if self.pending_name {
            return Err(StreamError::InvalidState("dangling name before close"));
        }
        match self.stack.last() {
            Some(scope) if scope.kind == kind => {}
            _ => return Err(StreamError::InvalidState("close without matching open")),
        }
        self.stack.pop();
        self.out.write_all(closer)?;
        Ok(())
    }

    fn write_escaped(&mut self, value: &str) -> Result<(), StreamError> {
        self.out.write_all(b"\"")?;
        let bytes = value.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b != b'"' && b != b'\\' && b >= 0x20 {
                continue;
            }
            self.out.write_all(&bytes[start..i])?;
            match b {
                b'"' => self.out.write_all(b"\\\"")?,
                b'\\' => self.out.write_all(b"\\\\")?,
                0x08 => self.out.write_all(b"\\b")?,
                0x0C => self.out.write_all(b"\\f")?,
                b'\n' => self.out.write_all(b"\\n")?,
                b'\r' => self.out.write_all(b"\\r")?,
                b'\t' => self.out.write_all(b"\\t")?,
                _ => write!(self.out, "\\u{b:04x}")?,
            }
            start = i + 1;
        }
        self.out.write_all(&bytes[start..])?;
        self.out.write_all(b"\"")?;
        Ok(())
    }
}
