use proc_macro2::TokenStream;
use quote::quote;
use syn::{WherePredicate, parse_quote};

use crate::derive_data::ModelDerive;
use crate::impls::impl_header;
use crate::path;

pub(crate) fn impl_composite(data: &ModelDerive, tc_codec: &syn::Path) -> TokenStream {
    let model_ = path::model_(tc_codec);
    let type_shape_ = path::type_shape_(tc_codec);
    let composite_info_ = path::composite_info_(tc_codec);
    let composite_layout_ = path::composite_layout_(tc_codec);
    let member_info_ = path::member_info_(tc_codec);

    let layout = if data.attrs.value.is_some() {
        quote!(#composite_layout_::Value)
    } else {
        quote!(#composite_layout_::Reference)
    };

    let members = data.members().map(|field| {
        let member = &field.member;
        let name = &field.name;
        let ty = field.ty;
        quote! {
            #member_info_::<Self>::new::<#ty>(
                #name,
                |__this| &__this.#member,
                |__this, __value| __this.#member = __value,
            )
        }
    });
    let members = if data.members().next().is_some() {
        quote!([#(#members),*])
    } else {
        quote!(::core::iter::empty())
    };

    let attrs = &data.attrs;
    let use_default = attrs.construct.is_none() && (attrs.default.is_some() || attrs.value.is_some());
    let construct = match &attrs.construct {
        Some(constructor) => quote!(.with_construct(#constructor)),
        None if use_default => quote!(.with_construct(<Self as ::core::default::Default>::default)),
        None => TokenStream::new(),
    };

    // Generic structs are only `Default` for some arguments.
    let ident = data.ident;
    let (_, ty_generics, _) = data.generics.split_for_impl();
    let default_bound: Option<WherePredicate> =
        use_default.then(|| parse_quote!(#ident #ty_generics: ::core::default::Default));
    let header = impl_header(data, &model_, &model_, default_bound);

    quote! {
        #header {
            fn shape() -> #type_shape_<Self> {
                #type_shape_::Composite(
                    #composite_info_::<Self>::new(#layout, #members) #construct
                )
            }
        }
    }
}
