use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;

use crate::codec::Textual;
use crate::info::{Model, TypeShape};

macro_rules! impl_text {
    ($ty:ty, $from_text:expr) => {
        impl Textual for $ty {
            #[inline]
            fn as_text(&self) -> &str {
                self
            }

            #[inline]
            fn from_text(text: String) -> Self {
                $from_text(text)
            }
        }

        impl Model for $ty {
            #[inline]
            fn shape() -> TypeShape<Self> {
                TypeShape::text()
            }
        }
    };
}

impl_text!(String, core::convert::identity);
impl_text!(Box<str>, String::into_boxed_str);
impl_text!(Arc<str>, Arc::from);
