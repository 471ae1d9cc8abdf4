use core::any::{Any, TypeId, type_name};
use core::marker::PhantomData;
use std::collections::HashMap;

use jot_stream::{JsonReader, JsonWriter};

use crate::{ParseError, WriteError};

/// A serialize/deserialize pair for a type that has no generated adapter.
///
/// Implementations are free to use any wire shape — an object, a bare
/// string, a number. Generated code never assumes a token kind for
/// delegated fields; it attempts the read and wraps failures with field
/// context instead.
pub trait TypedAdapter<T>: Send + Sync + 'static {
    fn write(
        &self,
        writer: &mut JsonWriter<'_>,
        adapters: &AdapterRegistry,
        value: Option<&T>,
    ) -> Result<(), WriteError>;

    fn parse(
        &self,
        reader: &mut JsonReader<'_>,
        adapters: &AdapterRegistry,
    ) -> Result<Option<T>, ParseError>;
}

/// Object-safe shim over a [`TypedAdapter`], so adapters for arbitrary
/// types can share one table.
trait ErasedAdapter: Send + Sync {
    fn write_value(
        &self,
        writer: &mut JsonWriter<'_>,
        adapters: &AdapterRegistry,
        value: Option<&dyn Any>,
    ) -> Result<(), WriteError>;

    fn parse_value(
        &self,
        reader: &mut JsonReader<'_>,
        adapters: &AdapterRegistry,
    ) -> Result<Option<Box<dyn Any>>, ParseError>;
}

struct Erase<T, A> {
    adapter: A,
    marker: PhantomData<fn() -> T>,
}

impl<T: Any, A: TypedAdapter<T>> ErasedAdapter for Erase<T, A> {
    fn write_value(
        &self,
        writer: &mut JsonWriter<'_>,
        adapters: &AdapterRegistry,
        value: Option<&dyn Any>,
    ) -> Result<(), WriteError> {
        let typed = match value {
            Some(value) => Some(
                value
                    .downcast_ref::<T>()
                    .ok_or_else(|| WriteError::ValueType(type_name::<T>()))?,
            ),
            None => None,
        };
        self.adapter.write(writer, adapters, typed)
    }

    fn parse_value(
        &self,
        reader: &mut JsonReader<'_>,
        adapters: &AdapterRegistry,
    ) -> Result<Option<Box<dyn Any>>, ParseError> {
        Ok(self
            .adapter
            .parse(reader, adapters)?
            .map(|value| Box::new(value) as Box<dyn Any>))
    }
}

/// Lookup of externally supplied adapters by runtime type token.
///
/// This is the single seam by which types without a generated adapter stay
/// interoperable: generated code routes any such field through
/// [`write_with`](Self::write_with) / [`parse_with`](Self::parse_with).
/// The registry is an explicit value threaded through every adapter call —
/// there is no ambient global.
///
/// # Example
///
/// ```rust, ignore
/// let mut adapters = AdapterRegistry::new();
/// adapters.register::<Genre>(GenreAdapter);
///
/// // With the `auto_register` feature, adapters may instead submit
/// // themselves from anywhere in the program:
/// inventory::submit! {
///     jot_adapt::AdapterRegistration::new(|registry| {
///         registry.register::<Genre>(GenreAdapter);
///     })
/// }
/// let adapters = AdapterRegistry::with_auto_registered();
/// ```
#[derive(Default)]
pub struct AdapterRegistry {
    table: HashMap<TypeId, Box<dyn ErasedAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        AdapterRegistry {
            table: HashMap::new(),
        }
    }

    /// Creates a registry pre-populated with every submitted
    /// [`AdapterRegistration`].
    #[cfg(feature = "auto_register")]
    pub fn with_auto_registered() -> Self {
        let mut registry = Self::new();
        registry.auto_register();
        registry
    }

    /// Registers an adapter for `T`, replacing any previous one.
    pub fn register<T: Any>(&mut self, adapter: impl TypedAdapter<T>) {
        self.table.insert(
            TypeId::of::<T>(),
            Box::new(Erase {
                adapter,
                marker: PhantomData,
            }),
        );
    }

    /// Whether an adapter for `T` has been registered.
    pub fn contains<T: Any>(&self) -> bool {
        self.table.contains_key(&TypeId::of::<T>())
    }

    /// Writes `value` through the adapter registered for `T`.
    pub fn write_with<T: Any>(
        &self,
        writer: &mut JsonWriter<'_>,
        value: Option<&T>,
    ) -> Result<(), WriteError> {
        let adapter = self
            .table
            .get(&TypeId::of::<T>())
            .ok_or_else(|| WriteError::NoAdapter(type_name::<T>()))?;
        adapter.write_value(writer, self, value.map(|value| value as &dyn Any))
    }

    /// Parses a value of `T` through the adapter registered for it.
    pub fn parse_with<T: Any>(
        &self,
        reader: &mut JsonReader<'_>,
    ) -> Result<Option<T>, ParseError> {
        let adapter = self
            .table
            .get(&TypeId::of::<T>())
            .ok_or_else(|| ParseError::NoAdapter(type_name::<T>()))?;
        match adapter.parse_value(reader, self)? {
            Some(boxed) => match boxed.downcast::<T>() {
                Ok(value) => Ok(Some(*value)),
                Err(_) => Err(ParseError::AdapterType(type_name::<T>())),
            },
            None => Ok(None),
        }
    }

    /// Runs every [`AdapterRegistration`] submitted through `inventory`.
    ///
    /// Repeated calls are harmless; later registrations replace earlier
    /// ones for the same type.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) {
        for entry in inventory::iter::<AdapterRegistration> {
            (entry.register)(self);
        }
    }
}

/// One submitted auto-registration hook.
///
/// See [`AdapterRegistry::auto_register`].
#[cfg(feature = "auto_register")]
pub struct AdapterRegistration {
    register: fn(&mut AdapterRegistry),
}

#[cfg(feature = "auto_register")]
impl AdapterRegistration {
    pub const fn new(register: fn(&mut AdapterRegistry)) -> Self {
        AdapterRegistration { register }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AdapterRegistration);

#[cfg(test)]
mod tests {
    use super::*;
    use jot_stream::TokenKind;

    #[derive(Debug, PartialEq)]
    struct Genre(String);

    /// External adapter with a non-object wire shape: a bare string.
    struct GenreAdapter;

    impl TypedAdapter<Genre> for GenreAdapter {
        fn write(
            &self,
            writer: &mut JsonWriter<'_>,
            _adapters: &AdapterRegistry,
            value: Option<&Genre>,
        ) -> Result<(), WriteError> {
            match value {
                Some(genre) => writer.str_value(&genre.0)?,
                None => writer.null_value()?,
            }
            Ok(())
        }

        fn parse(
            &self,
            reader: &mut JsonReader<'_>,
            _adapters: &AdapterRegistry,
        ) -> Result<Option<Genre>, ParseError> {
            if reader.peek()? == TokenKind::Str {
                Ok(Some(Genre(reader.next_str()?)))
            } else {
                reader.skip_value()?;
                Ok(None)
            }
        }
    }

    #[test]
    fn registered_adapter_round_trips() {
        let mut adapters = AdapterRegistry::new();
        adapters.register::<Genre>(GenreAdapter);
        assert!(adapters.contains::<Genre>());

        let mut out = Vec::new();
        let mut writer = JsonWriter::new(&mut out);
        adapters
            .write_with(&mut writer, Some(&Genre("jazz".into())))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, r#""jazz""#);

        let mut reader = JsonReader::new(&text);
        let parsed: Option<Genre> = adapters.parse_with(&mut reader).unwrap();
        assert_eq!(parsed, Some(Genre("jazz".into())));
    }

    #[test]
    fn missing_adapter_is_an_error() {
        let adapters = AdapterRegistry::new();

        let mut out = Vec::new();
        let mut writer = JsonWriter::new(&mut out);
        assert!(matches!(
            adapters.write_with(&mut writer, Some(&Genre("jazz".into()))),
            Err(WriteError::NoAdapter(_))
        ));

        let mut reader = JsonReader::new(r#""jazz""#);
        assert!(matches!(
            adapters.parse_with::<Genre>(&mut reader),
            Err(ParseError::NoAdapter(_))
        ));
    }

    #[cfg(feature = "auto_register")]
    mod auto {
        use super::*;

        #[derive(Debug, PartialEq)]
        struct Submitted(i64);

        struct SubmittedAdapter;

        impl TypedAdapter<Submitted> for SubmittedAdapter {
            fn write(
                &self,
                writer: &mut JsonWriter<'_>,
                _adapters: &AdapterRegistry,
                value: Option<&Submitted>,
            ) -> Result<(), WriteError> {
                match value {
                    Some(value) => writer.i64_value(value.0)?,
                    None => writer.null_value()?,
                }
                Ok(())
            }

            fn parse(
                &self,
                reader: &mut JsonReader<'_>,
                _adapters: &AdapterRegistry,
            ) -> Result<Option<Submitted>, ParseError> {
                Ok(Some(Submitted(reader.next_i64()?)))
            }
        }

        inventory::submit! {
            AdapterRegistration::new(|registry| {
                registry.register::<Submitted>(SubmittedAdapter);
            })
        }

        #[test]
        fn submitted_adapters_are_collected() {
            let adapters = AdapterRegistry::with_auto_registered();
            assert!(adapters.contains::<Submitted>());

            let mut reader = JsonReader::new("41");
            assert_eq!(
                adapters.parse_with::<Submitted>(&mut reader).unwrap(),
                Some(Submitted(41))
            );
        }
    }
}
