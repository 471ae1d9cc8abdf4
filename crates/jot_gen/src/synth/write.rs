//! Emission of the `write` procedure: begin-object, one null-guarded
//! block per field in declaration order, end-object.
//!
//! Primitive numeric and boolean fields have no absence state and are
//! always written; every other kind is guarded and skipped entirely when
//! absent. Container kinds recurse through the runtime helpers with a
//! synthesized per-element strategy; object kinds either call the target
//! class's generated adapter directly or delegate through the runtime
//! registry, depending on registry membership.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::model::{ClassName, Primitive, ResolvedField, TypeDesc};
use crate::path;
use crate::registry::GenContext;

pub(crate) fn write_fn_tokens(
    context: &GenContext,
    _class: &ClassName,
    fields: &[ResolvedField],
) -> TokenStream {
    let stream_ = path::stream_(&context.config.runtime_crate);
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    let field_blocks = fields
        .iter()
        .map(|field| field_tokens(context, field))
        .collect::<Vec<_>>();
    quote! {
        fn write(
            writer: &mut #stream_::JsonWriter<'_>,
            adapters: &#adapt_::AdapterRegistry,
            value: ::core::option::Option<&Self>,
        ) -> ::core::result::Result<(), #adapt_::WriteError> {
            writer.begin_object()?;
            if let ::core::option::Option::Some(value) = value {
                #(#field_blocks)*
            }
            writer.end_object()?;
            ::core::result::Result::Ok(())
        }
    }
}

fn field_tokens(context: &GenContext, field: &ResolvedField) -> TokenStream {
    let key = &field.key;
    let ident = format_ident!("{}", field.ident);
    match &field.ty {
        TypeDesc::Primitive(primitive) => {
            let value_stmt = primitive_stmt(*primitive, quote!(value.#ident));
            quote! {
                writer.name(#key)?;
                #value_stmt
            }
        }
        ty => {
            let value_stmt = value_stmt(context, ty, quote!(field_value));
            quote! {
                if let ::core::option::Option::Some(field_value) = &value.#ident {
                    writer.name(#key)?;
                    #value_stmt
                }
            }
        }
    }
}

fn primitive_stmt(primitive: Primitive, expr: TokenStream) -> TokenStream {
    match primitive {
        Primitive::Bool => quote! { writer.bool_value(#expr)?; },
        Primitive::Int => quote! { writer.i64_value(i64::from(#expr))?; },
        Primitive::Long => quote! { writer.i64_value(#expr)?; },
        Primitive::Double => quote! { writer.f64_value(#expr)?; },
    }
}

/// Statement writing a present non-primitive value bound to `expr` (a
/// shared reference).
fn value_stmt(context: &GenContext, ty: &TypeDesc, expr: TokenStream) -> TokenStream {
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    match ty {
        TypeDesc::Str => quote! { writer.str_value(#expr)?; },
        TypeDesc::List(elem) => {
            let item = item_closure(context, elem);
            quote! {
                #adapt_::write_list(writer, ::core::option::Option::Some(#expr.as_slice()), #item)?;
            }
        }
        TypeDesc::Map(value) => {
            let item = item_closure(context, value);
            quote! {
                #adapt_::write_map(writer, ::core::option::Option::Some(#expr), #item)?;
            }
        }
        TypeDesc::Object { name, args } if context.has_direct_adapter(name, args) => {
            let target = name.ident();
            quote! { #target::write(writer, adapters, ::core::option::Option::Some(#expr))?; }
        }
        TypeDesc::Object { .. } => {
            quote! { adapters.write_with(writer, ::core::option::Option::Some(#expr))?; }
        }
        TypeDesc::Primitive(_) | TypeDesc::Var(_) => {
            // Primitives are handled at the field level and variables are
            // resolved before emission; nothing sensible can be written.
            quote! { writer.null_value()?; }
        }
    }
}

/// Per-element strategy for list and map helpers, recursing as deep as
/// the container nesting goes.
fn item_closure(context: &GenContext, ty: &TypeDesc) -> TokenStream {
    let adapt_ = path::adapt_(&context.config.runtime_crate);
    match ty {
        TypeDesc::Primitive(primitive) => {
            let value_stmt = primitive_stmt(*primitive, quote!(*item));
            quote! {
                |writer, item| {
                    #value_stmt
                    ::core::result::Result::Ok(())
                }
            }
        }
        TypeDesc::Str => quote! {
            |writer, item| {
                writer.str_value(item)?;
                ::core::result::Result::Ok(())
            }
        },
        TypeDesc::List(elem) => {
            let inner = item_closure(context, elem);
            quote! {
                |writer, item| #adapt_::write_list(writer, ::core::option::Option::Some(item.as_slice()), #inner)
            }
        }
        TypeDesc::Map(value) => {
            let inner = item_closure(context, value);
            quote! {
                |writer, item| #adapt_::write_map(writer, ::core::option::Option::Some(item), #inner)
            }
        }
        TypeDesc::Object { name, args } if context.has_direct_adapter(name, args) => {
            let target = name.ident();
            quote! {
                |writer, item| #target::write(writer, adapters, ::core::option::Option::Some(item))
            }
        }
        TypeDesc::Object { .. } => quote! {
            |writer, item| adapters.write_with(writer, ::core::option::Option::Some(item))
        },
        TypeDesc::Var(_) => quote! {
            |writer, _item| {
                writer.null_value()?;
                ::core::result::Result::Ok(())
            }
        },
    }
}
