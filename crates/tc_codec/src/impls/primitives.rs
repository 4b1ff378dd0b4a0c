use crate::info::{Model, TypeShape};
use crate::stream::Fixed;

macro_rules! impl_unmanaged {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Model for $ty {
                #[inline]
                fn shape() -> TypeShape<Self> {
                    TypeShape::unmanaged()
                }
            }
        )*
    };
}

impl_unmanaged!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, (),
);

impl<E: Fixed, const N: usize> Model for [E; N] {
    #[inline]
    fn shape() -> TypeShape<Self> {
        TypeShape::unmanaged()
    }
}
