//! Paths the generated code uses to reach the runtime, derived from the
//! configured runtime crate root.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn adapt_(runtime: &syn::Path) -> TokenStream {
    quote!(#runtime::adapt)
}

pub(crate) fn stream_(runtime: &syn::Path) -> TokenStream {
    quote!(#runtime::stream)
}
