//! Emission of the `parse` procedure: the field loop runs through the
//! runtime driver, with one match arm per field dispatching by JSON key.
//!
//! Kinds with a single expected token (numbers, booleans, strings,
//! begin-array for lists, begin-object for maps) check the peeked token
//! and either assign or skip the mismatched value. Object kinds have no
//! expected token — delegated and custom adapters may use any wire shape
//! — so the read is attempted and a failure is wrapped with the enclosing
//! class and field before propagating.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::model::{ClassName, Primitive, ResolvedField, TypeDesc};
use crate::path;
use crate::registry::GenContext;

pub(crate) fn parse_fn_tokens(
    context: &GenContext,
    class: &ClassName,
    fields: &[ResolvedField],
) -> TokenStream {
    let stream_ = path::stream_(&context.config.runtime_crate);
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    let arms = fields
        .iter()
        .map(|field| arm_tokens(context, class, field))
        .collect::<Vec<_>>();
    quote! {
        fn parse(
            reader: &mut #stream_::JsonReader<'_>,
            adapters: &#adapt_::AdapterRegistry,
        ) -> ::core::result::Result<::core::option::Option<Self>, #adapt_::ParseError> {
            let mut object = <Self as ::core::default::Default>::default();
            let present = #adapt_::parse_object_fields(reader, |name, reader| {
                ::core::result::Result::Ok(match name {
                    #(#arms)*
                    _ => #adapt_::FieldOutcome::SkippedUnknown,
                })
            })?;
            ::core::result::Result::Ok(if present {
                ::core::option::Option::Some(object)
            } else {
                ::core::option::Option::None
            })
        }
    }
}

fn arm_tokens(context: &GenContext, class: &ClassName, field: &ResolvedField) -> TokenStream {
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    let key = &field.key;
    let ident = format_ident!("{}", field.ident);
    match &field.ty {
        TypeDesc::Object { name, args } => {
            let read_expr = if context.has_direct_adapter(name, args) {
                let target = name.ident();
                quote!(#target::parse(reader, adapters))
            } else {
                quote!(adapters.parse_with(reader))
            };
            let class_str = class.as_str();
            let field_str = &field.ident;
            quote! {
                #key => match #read_expr {
                    ::core::result::Result::Ok(field_value) => {
                        object.#ident = field_value;
                        #adapt_::FieldOutcome::Assigned
                    }
                    ::core::result::Result::Err(source) => {
                        return ::core::result::Result::Err(
                            #adapt_::ParseError::in_field(#class_str, #field_str, source)
                        );
                    }
                },
            }
        }
        ty => {
            let expected = expected_token(context, ty);
            let assign = assign_stmt(context, ty, &ident);
            quote! {
                #key => {
                    if reader.peek()? == #expected {
                        #assign
                        #adapt_::FieldOutcome::Assigned
                    } else {
                        reader.skip_value()?;
                        #adapt_::FieldOutcome::SkippedMismatch
                    }
                }
            }
        }
    }
}

/// The single token kind a non-object field expects.
fn expected_token(context: &GenContext, ty: &TypeDesc) -> TokenStream {
    let stream_ = path::stream_(&context.config.runtime_crate);
    match ty {
        TypeDesc::Primitive(Primitive::Bool) => quote!(#stream_::TokenKind::Bool),
        TypeDesc::Primitive(_) => quote!(#stream_::TokenKind::Number),
        TypeDesc::Str => quote!(#stream_::TokenKind::Str),
        TypeDesc::List(_) => quote!(#stream_::TokenKind::BeginArray),
        TypeDesc::Map(_) => quote!(#stream_::TokenKind::BeginObject),
        // Object kinds never reach here; variables are resolved before
        // emission. Null never matches: the driver consumes nulls first.
        TypeDesc::Object { .. } | TypeDesc::Var(_) => quote!(#stream_::TokenKind::Null),
    }
}

fn assign_stmt(context: &GenContext, ty: &TypeDesc, ident: &proc_macro2::Ident) -> TokenStream {
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    match ty {
        TypeDesc::Primitive(Primitive::Bool) => quote! { object.#ident = reader.next_bool()?; },
        TypeDesc::Primitive(Primitive::Int) => quote! { object.#ident = reader.next_i32()?; },
        TypeDesc::Primitive(Primitive::Long) => quote! { object.#ident = reader.next_i64()?; },
        TypeDesc::Primitive(Primitive::Double) => quote! { object.#ident = reader.next_f64()?; },
        TypeDesc::Str => quote! {
            object.#ident = ::core::option::Option::Some(reader.next_str()?);
        },
        TypeDesc::List(elem) => {
            let item = item_closure(context, elem);
            quote! { object.#ident = #adapt_::parse_list(reader, #item)?; }
        }
        TypeDesc::Map(value) => {
            let item = item_closure(context, value);
            quote! { object.#ident = #adapt_::parse_map(reader, #item)?; }
        }
        TypeDesc::Object { .. } | TypeDesc::Var(_) => quote! {
            reader.skip_value()?;
        },
    }
}

/// Per-element strategy for list and map helpers, mirroring the write
/// side dispatch.
fn item_closure(context: &GenContext, ty: &TypeDesc) -> TokenStream {
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    match ty {
        TypeDesc::Primitive(_) | TypeDesc::Str => {
            let expected = expected_token(context, ty);
            let read_expr = match ty {
                TypeDesc::Primitive(Primitive::Bool) => quote!(reader.next_bool()?),
                TypeDesc::Primitive(Primitive::Int) => quote!(reader.next_i32()?),
                TypeDesc::Primitive(Primitive::Long) => quote!(reader.next_i64()?),
                TypeDesc::Primitive(Primitive::Double) => quote!(reader.next_f64()?),
                _ => quote!(reader.next_str()?),
            };
            quote! {
                |reader| ::core::result::Result::Ok(if reader.peek()? == #expected {
                    ::core::option::Option::Some(#read_expr)
                } else {
                    reader.skip_value()?;
                    ::core::option::Option::None
                })
            }
        }
        TypeDesc::List(elem) => {
            let inner = item_closure(context, elem);
            quote! { |reader| #adapt_::parse_list(reader, #inner) }
        }
        TypeDesc::Map(value) => {
            let inner = item_closure(context, value);
            quote! { |reader| #adapt_::parse_map(reader, #inner) }
        }
        TypeDesc::Object { name, args } if context.has_direct_adapter(name, args) => {
            let target = name.ident();
            quote! { |reader| #target::parse(reader, adapters) }
        }
        TypeDesc::Object { .. } => quote! { |reader| adapters.parse_with(reader) },
        TypeDesc::Var(_) => quote! {
            |reader| {
                reader.skip_value()?;
                ::core::result::Result::Ok(::core::option::Option::None)
            }
        },
    }
}
