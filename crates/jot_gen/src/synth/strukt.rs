//! Emission of the flattened concrete struct for one class.
//!
//! Every field slot except primitives is `Option`al: absence is a real
//! state on the wire (key omitted, or value null), so the struct carries
//! it. Primitives have no absence state and stay bare.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::model::{ClassName, Primitive, ResolvedField, TypeDesc};

pub(crate) fn struct_tokens(name: &ClassName, fields: &[ResolvedField]) -> TokenStream {
    let ident = name.ident();
    let field_defs = fields.iter().map(|field| {
        let field_ident = format_ident!("{}", field.ident);
        let slot = field_slot_tokens(&field.ty);
        quote! { pub #field_ident: #slot }
    });
    quote! {
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #ident {
            #(#field_defs,)*
        }
    }
}

/// The type of the struct slot holding this field.
pub(crate) fn field_slot_tokens(ty: &TypeDesc) -> TokenStream {
    match ty {
        TypeDesc::Primitive(_) => value_type_tokens(ty),
        _ => {
            let value = value_type_tokens(ty);
            quote!(::core::option::Option<#value>)
        }
    }
}

/// The Rust value type a resolved descriptor renders to.
pub(crate) fn value_type_tokens(ty: &TypeDesc) -> TokenStream {
    match ty {
        TypeDesc::Primitive(Primitive::Bool) => quote!(bool),
        TypeDesc::Primitive(Primitive::Int) => quote!(i32),
        TypeDesc::Primitive(Primitive::Long) => quote!(i64),
        TypeDesc::Primitive(Primitive::Double) => quote!(f64),
        TypeDesc::Str => quote!(::std::string::String),
        TypeDesc::List(elem) => {
            let inner = value_type_tokens(elem);
            quote!(::std::vec::Vec<#inner>)
        }
        TypeDesc::Map(value) => {
            let inner = value_type_tokens(value);
            quote!(::std::collections::HashMap<::std::string::String, #inner>)
        }
        TypeDesc::Object { name, args } => {
            let ident = name.ident();
            if args.is_empty() {
                quote!(#ident)
            } else {
                let args = args.iter().map(value_type_tokens);
                quote!(#ident<#(#args),*>)
            }
        }
        // Callers validate concreteness before emission; rendering the
        // bare variable makes any slip a host-side compile error.
        TypeDesc::Var(var) => {
            let ident = format_ident!("{}", var);
            quote!(#ident)
        }
    }
}
