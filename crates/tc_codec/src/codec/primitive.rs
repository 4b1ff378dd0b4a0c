use core::any::type_name;

use crate::info::{Model, UnmanagedInfo};
use crate::registry::Processor;

/// Copies exactly `info.size` bytes per value.
pub(crate) fn build<T: Model>(info: UnmanagedInfo<T>) -> Processor<T> {
    let UnmanagedInfo { size, write, read } = info;
    Processor::new(
        type_name::<T>(),
        move |value, writer| {
            let start = writer.len();
            write(value, writer);
            debug_assert_eq!(
                writer.len() - start,
                size,
                "`{}` wrote a wrong number of bytes",
                type_name::<T>(),
            );
            Ok(())
        },
        read,
    )
}

#[cfg(test)]
mod tests {
    use crate::CodecError;
    use crate::info::ShapeKind;
    use crate::registry::ProcessorRegistry;

    #[test]
    fn values_are_raw_little_endian() {
        let registry = ProcessorRegistry::new();

        assert_eq!(registry.to_bytes(&0x1234_u16).unwrap(), [0x34, 0x12]);
        assert_eq!(registry.to_bytes(&-1_i64).unwrap(), [0xFF; 8]);
        assert_eq!(registry.to_bytes(&1.0_f32).unwrap(), [0, 0, 0x80, 0x3F]);
        assert_eq!(registry.to_bytes(&[1_u8, 2, 3]).unwrap(), [1, 2, 3]);
        assert!(registry.to_bytes(&()).unwrap().is_empty());

        let descriptor = registry.descriptor::<[u32; 4]>().unwrap();
        assert_eq!(descriptor.kind(), ShapeKind::Unmanaged);
        assert_eq!(descriptor.size(), Some(16));
    }

    #[test]
    fn special_floats_round_trip() {
        let registry = ProcessorRegistry::new();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0, f64::MIN_POSITIVE] {
            let bytes = registry.to_bytes(&value).unwrap();
            let decoded = registry.from_bytes::<f64>(&bytes).unwrap();
            assert_eq!(decoded.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn short_input_underflows() {
        let registry = ProcessorRegistry::new();
        assert_eq!(
            registry.from_bytes::<u32>(&[1, 2]),
            Err(CodecError::Underflow {
                offset: 0,
                needed: 4,
                remaining: 2,
            })
        );
    }
}
