use alloc::boxed::Box;

use crate::info::{IndirectInfo, Model, TypeShape};

impl<T: Model> Model for Option<T> {
    #[inline]
    fn shape() -> TypeShape<Self> {
        TypeShape::Indirect(IndirectInfo::nullable())
    }
}

impl<T: Model> Model for Box<T> {
    #[inline]
    fn shape() -> TypeShape<Self> {
        TypeShape::Indirect(IndirectInfo::boxed())
    }
}
