use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ModelDerive;
use crate::impls::impl_header;
use crate::path;

/// `Fixed` writing every field in declaration order, and a `Model` impl
/// classifying the type as unmanaged.
pub(crate) fn impl_unmanaged(data: &ModelDerive, tc_codec: &syn::Path) -> TokenStream {
    let model_ = path::model_(tc_codec);
    let type_shape_ = path::type_shape_(tc_codec);
    let fixed_ = path::fixed_(tc_codec);
    let byte_writer_ = path::byte_writer_(tc_codec);
    let byte_reader_ = path::byte_reader_(tc_codec);
    let codec_error_ = path::codec_error_(tc_codec);

    let fixed_header = impl_header(data, &fixed_, &fixed_, None);
    let model_header = impl_header(data, &model_, &fixed_, None);

    let members: Vec<_> = data.members().map(|field| &field.member).collect();
    let types: Vec<_> = data.members().map(|field| field.ty).collect();

    quote! {
        #fixed_header {
            const SIZE: usize = 0 #(+ <#types as #fixed_>::SIZE)*;

            #[inline]
            #[allow(unused_variables)]
            fn write_fixed(self, __writer: &mut #byte_writer_) {
                #(#fixed_::write_fixed(self.#members, __writer);)*
            }

            #[inline]
            #[allow(unused_variables)]
            fn read_fixed(
                __reader: &mut #byte_reader_<'_>,
            ) -> ::core::result::Result<Self, #codec_error_> {
                ::core::result::Result::Ok(Self {
                    #(#members: <#types as #fixed_>::read_fixed(__reader)?,)*
                })
            }
        }

        #model_header {
            #[inline]
            fn shape() -> #type_shape_<Self> {
                #type_shape_::unmanaged()
            }
        }
    }
}
