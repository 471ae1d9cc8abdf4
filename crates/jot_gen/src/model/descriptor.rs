use core::fmt;

use quote::ToTokens;

use crate::error::GenError;
use crate::model::ClassName;

/// Primitive field kinds with value semantics on the wire.
///
/// These are the kinds with no absence state: generated writers always
/// emit them and generated parsers leave them at their numeric/boolean
/// default on null or mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int,
    Long,
    Double,
}

/// A type as the generator sees it.
///
/// The variants cover exactly the shapes the wire format can express:
/// primitives, strings, list-like and string-keyed map-like containers,
/// type variables awaiting substitution, and everything else as an object
/// with ordered type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    Primitive(Primitive),
    Str,
    List(Box<TypeDesc>),
    /// String-keyed map; only the value type varies.
    Map(Box<TypeDesc>),
    Var(String),
    Object {
        name: ClassName,
        args: Vec<TypeDesc>,
    },
}

impl TypeDesc {
    pub fn var(name: impl Into<String>) -> Self {
        TypeDesc::Var(name.into())
    }

    pub fn object(name: impl Into<ClassName>, args: Vec<TypeDesc>) -> Self {
        TypeDesc::Object {
            name: name.into(),
            args,
        }
    }

    /// Whether the descriptor contains no type variable at any depth.
    ///
    /// Primitives and strings are always concrete; containers and objects
    /// are concrete iff all of their arguments are.
    pub fn is_concrete(&self) -> bool {
        match self {
            TypeDesc::Primitive(_) | TypeDesc::Str => true,
            TypeDesc::Var(_) => false,
            TypeDesc::List(elem) | TypeDesc::Map(elem) => elem.is_concrete(),
            TypeDesc::Object { args, .. } => args.iter().all(TypeDesc::is_concrete),
        }
    }

    /// Builds a descriptor from a host type.
    ///
    /// `params` are the type parameters in scope for the declaring class;
    /// a bare single-segment path naming one of them becomes a
    /// [`TypeDesc::Var`]. `Vec<T>` maps to the list shape, `HashMap<String, V>`
    /// to the map shape. Host types outside the supported set (references,
    /// tuples, unsigned or non-default-width numerics, non-string map
    /// keys) are configuration errors.
    pub fn from_syn(ty: &syn::Type, params: &[String]) -> Result<TypeDesc, GenError> {
        let syn::Type::Path(type_path) = ty else {
            return Err(unsupported(ty));
        };
        if type_path.qself.is_some() {
            return Err(unsupported(ty));
        }
        let Some(segment) = type_path.path.segments.last() else {
            return Err(unsupported(ty));
        };
        let ident = segment.ident.to_string();
        match ident.as_str() {
            "bool" => Ok(TypeDesc::Primitive(Primitive::Bool)),
            "i32" => Ok(TypeDesc::Primitive(Primitive::Int)),
            "i64" => Ok(TypeDesc::Primitive(Primitive::Long)),
            "f64" => Ok(TypeDesc::Primitive(Primitive::Double)),
            "String" => Ok(TypeDesc::Str),
            "Vec" => {
                let args = type_args(segment)?;
                let [elem] = args.as_slice() else {
                    return Err(unsupported(ty));
                };
                Ok(TypeDesc::List(Box::new(TypeDesc::from_syn(elem, params)?)))
            }
            "HashMap" => {
                let args = type_args(segment)?;
                let [key, value] = args.as_slice() else {
                    return Err(unsupported(ty));
                };
                if TypeDesc::from_syn(key, params)? != TypeDesc::Str {
                    return Err(unsupported(ty));
                }
                Ok(TypeDesc::Map(Box::new(TypeDesc::from_syn(value, params)?)))
            }
            "i8" | "i16" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
            | "usize" | "f32" | "char" => Err(unsupported(ty)),
            name if params.iter().any(|param| param == name)
                && type_path.path.segments.len() == 1
                && segment.arguments.is_none() =>
            {
                Ok(TypeDesc::Var(ident.clone()))
            }
            _ => {
                let args = type_args(segment)?
                    .into_iter()
                    .map(|arg| TypeDesc::from_syn(arg, params))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDesc::Object {
                    name: ClassName::new(ident.clone()),
                    args,
                })
            }
        }
    }
}

fn unsupported(ty: &impl ToTokens) -> GenError {
    GenError::UnsupportedType {
        ty: ty.to_token_stream().to_string(),
    }
}

fn type_args(segment: &syn::PathSegment) -> Result<Vec<&syn::Type>, GenError> {
    match &segment.arguments {
        syn::PathArguments::None => Ok(Vec::new()),
        syn::PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Ok(ty),
                other => Err(unsupported(other)),
            })
            .collect(),
        syn::PathArguments::Parenthesized(args) => Err(unsupported(args)),
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Primitive(Primitive::Bool) => f.write_str("bool"),
            TypeDesc::Primitive(Primitive::Int) => f.write_str("i32"),
            TypeDesc::Primitive(Primitive::Long) => f.write_str("i64"),
            TypeDesc::Primitive(Primitive::Double) => f.write_str("f64"),
            TypeDesc::Str => f.write_str("String"),
            TypeDesc::List(elem) => write!(f, "List<{elem}>"),
            TypeDesc::Map(value) => write!(f, "Map<String, {value}>"),
            TypeDesc::Var(name) => f.write_str(name),
            TypeDesc::Object { name, args } => {
                write!(f, "{name}")?;
                if let Some((head, tail)) = args.split_first() {
                    write!(f, "<{head}")?;
                    for arg in tail {
                        write!(f, ", {arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}
