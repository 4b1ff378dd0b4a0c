mod composite;
mod unmanaged;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, WhereClause, WherePredicate};

use crate::derive_data::ModelDerive;
use crate::path;

/// Generates the `Model` impl, plus `Fixed` for unmanaged structs.
pub(crate) fn impl_model(data: &ModelDerive) -> TokenStream {
    let tc_codec = path::tc_codec();

    if data.attrs.unmanaged.is_some() {
        unmanaged::impl_unmanaged(data, &tc_codec)
    } else {
        composite::impl_composite(data, &tc_codec)
    }
}

/// Adds `#bound` to every type parameter, plus `extra` predicates.
fn bounded_generics(
    generics: &Generics,
    bound: &TokenStream,
    extra: impl IntoIterator<Item = WherePredicate>,
) -> (Generics, WhereClause) {
    let mut generics = generics.clone();
    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(syn::parse_quote!(#param: #bound));
    }
    where_clause.predicates.extend(extra);
    let where_clause = where_clause.clone();
    (generics, where_clause)
}

/// `impl ... for Ident<...> where ...` header shared by the generated impls.
fn impl_header(
    data: &ModelDerive,
    trait_path: &TokenStream,
    bound: &TokenStream,
    extra: impl IntoIterator<Item = WherePredicate>,
) -> TokenStream {
    let ident = data.ident;
    let (generics, where_clause) = bounded_generics(data.generics, bound, extra);
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    quote! {
        impl #impl_generics #trait_path for #ident #ty_generics #where_clause
    }
}
