//! Paths into `tc_codec` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `tc_codec` crate from the invoking crate.
///
/// 1. For crates that depend on `tc_codec`, `::tc_codec` is returned.
/// 2. For crates that depend on `tycodec`, `::tycodec::codec` is returned.
/// 3. Otherwise `::tc_codec` is returned, which is also how `tc_codec`
///    refers to itself.
///
/// Reading the manifest is not free, so the path is resolved once per
/// derive and passed around.
pub(crate) fn tc_codec() -> syn::Path {
    tc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("tc_codec"))
}

#[inline(always)]
pub(crate) fn model_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::info::Model
    }
}

#[inline(always)]
pub(crate) fn type_shape_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::info::TypeShape
    }
}

#[inline(always)]
pub(crate) fn composite_info_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::info::CompositeInfo
    }
}

#[inline(always)]
pub(crate) fn composite_layout_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::info::CompositeLayout
    }
}

#[inline(always)]
pub(crate) fn member_info_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::info::MemberInfo
    }
}

#[inline(always)]
pub(crate) fn fixed_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::stream::Fixed
    }
}

#[inline(always)]
pub(crate) fn byte_writer_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::stream::ByteWriter
    }
}

#[inline(always)]
pub(crate) fn byte_reader_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::stream::ByteReader
    }
}

#[inline(always)]
pub(crate) fn codec_error_(tc_codec: &syn::Path) -> TokenStream {
    quote! {
        #tc_codec::CodecError
    }
}
