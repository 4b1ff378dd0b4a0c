use alloc::vec::Vec;
use core::any::type_name;

use crate::CodecError;
use crate::stream::{ByteReader, ByteWriter};

// -----------------------------------------------------------------------------
// Fixed

/// A reference-free value with a fixed-width little-endian representation.
///
/// Types implementing [`Fixed`] are classified as
/// [`ShapeKind::Unmanaged`](crate::info::ShapeKind::Unmanaged): their processor
/// copies exactly [`SIZE`](Fixed::SIZE) bytes, with no length prefix and no
/// padding.
///
/// Floats are written through their bit pattern, so NaN payloads and signed
/// zeros round-trip exactly. `usize` and `isize` always take 8 bytes.
///
/// Use `#[derive(Model)]` with `#[model(unmanaged)]` to implement it for a
/// `Copy` struct whose fields are all [`Fixed`].
pub trait Fixed: Copy + 'static {
    /// Number of bytes written and read.
    const SIZE: usize;

    /// Appends exactly [`SIZE`](Fixed::SIZE) bytes.
    fn write_fixed(self, writer: &mut ByteWriter);

    /// Consumes exactly [`SIZE`](Fixed::SIZE) bytes.
    fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError>;
}

macro_rules! impl_fixed_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Fixed for $ty {
                const SIZE: usize = size_of::<$ty>();

                #[inline]
                fn write_fixed(self, writer: &mut ByteWriter) {
                    writer.write_bytes(&self.to_le_bytes());
                }

                #[inline]
                fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
                    reader.read_array().map(<$ty>::from_le_bytes)
                }
            }
        )*
    };
}

impl_fixed_le!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Fixed for usize {
    const SIZE: usize = 8;

    #[inline]
    fn write_fixed(self, writer: &mut ByteWriter) {
        (self as u64).write_fixed(writer);
    }

    fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let offset = reader.offset();
        usize::try_from(u64::read_fixed(reader)?).map_err(|_| CodecError::InvalidValue {
            type_name: "usize",
            offset,
            reason: "value exceeds the platform word size",
        })
    }
}

impl Fixed for isize {
    const SIZE: usize = 8;

    #[inline]
    fn write_fixed(self, writer: &mut ByteWriter) {
        (self as i64).write_fixed(writer);
    }

    fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let offset = reader.offset();
        isize::try_from(i64::read_fixed(reader)?).map_err(|_| CodecError::InvalidValue {
            type_name: "isize",
            offset,
            reason: "value exceeds the platform word size",
        })
    }
}

impl Fixed for bool {
    const SIZE: usize = 1;

    #[inline]
    fn write_fixed(self, writer: &mut ByteWriter) {
        writer.write_u8(self as u8);
    }

    fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let offset = reader.offset();
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::InvalidValue {
                type_name: "bool",
                offset,
                reason: "expected 0 or 1",
            }),
        }
    }
}

impl Fixed for char {
    const SIZE: usize = 4;

    #[inline]
    fn write_fixed(self, writer: &mut ByteWriter) {
        (self as u32).write_fixed(writer);
    }

    fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let offset = reader.offset();
        char::from_u32(u32::read_fixed(reader)?).ok_or(CodecError::InvalidValue {
            type_name: "char",
            offset,
            reason: "not a unicode scalar value",
        })
    }
}

impl Fixed for () {
    const SIZE: usize = 0;

    #[inline]
    fn write_fixed(self, _writer: &mut ByteWriter) {}

    #[inline]
    fn read_fixed(_reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(())
    }
}

impl<E: Fixed, const N: usize> Fixed for [E; N] {
    const SIZE: usize = E::SIZE * N;

    fn write_fixed(self, writer: &mut ByteWriter) {
        for item in self {
            item.write_fixed(writer);
        }
    }

    fn read_fixed(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(E::read_fixed(reader)?);
        }
        match <[E; N]>::try_from(items) {
            Ok(array) => Ok(array),
            Err(_) => unreachable!("exactly {N} `{}` were read", type_name::<E>()),
        }
    }
}
