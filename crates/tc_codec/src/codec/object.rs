use alloc::sync::Arc;
use core::any::type_name;

use crate::CodecError;
use crate::info::{BoundMember, CompositeInfo, CompositeLayout, Model};
use crate::registry::{Processor, ProcessorRegistry};
use crate::stream::{ByteReader, ByteWriter};

const PRESENT: u8 = 1;
const ABSENT: u8 = 0;

/// Builds the member-wise processor of a composite.
///
/// Fails with [`CodecError::Construction`] if the composite has no
/// construction path. Member processors are not requested here.
pub(crate) fn build<T: Model>(
    registry: &ProcessorRegistry,
    info: CompositeInfo<T>,
) -> Result<Processor<T>, CodecError> {
    let type_name = type_name::<T>();
    let construct = info.construct.ok_or(CodecError::Construction { type_name })?;

    let registry = registry.downgrade();
    let members: Arc<[BoundMember<T>]> =
        info.members.iter().map(|member| member.bind(&registry)).collect();
    let reading = Arc::clone(&members);

    let processor = match info.layout {
        CompositeLayout::Reference => Processor::nullable(
            type_name,
            move |value, writer| {
                writer.write_u8(PRESENT);
                write_members(&members, value, writer)
            },
            move |reader| {
                let offset = reader.offset();
                match reader.read_u8()? {
                    ABSENT => Ok(None),
                    PRESENT => read_members(&reading, construct(), reader).map(Some),
                    _ => Err(CodecError::InvalidValue {
                        type_name,
                        offset,
                        reason: "presence flag must be 0 or 1",
                    }),
                }
            },
            write_absent,
        ),
        CompositeLayout::Value => Processor::new(
            type_name,
            move |value, writer| write_members(&members, value, writer),
            move |reader| read_members(&reading, construct(), reader),
        ),
    };
    Ok(processor)
}

fn write_absent(writer: &mut ByteWriter) {
    writer.write_u8(ABSENT);
}

fn write_members<T>(
    members: &[BoundMember<T>],
    value: &T,
    writer: &mut ByteWriter,
) -> Result<(), CodecError> {
    members
        .iter()
        .try_for_each(|member| member.write(value, writer))
}

/// Decodes every member into `value`. On failure `value` is dropped.
fn read_members<T>(
    members: &[BoundMember<T>],
    mut value: T,
    reader: &mut ByteReader<'_>,
) -> Result<T, CodecError> {
    for member in members {
        member.read(reader, &mut value).inspect_err(|_error| {
            #[cfg(all(debug_assertions, feature = "debug"))]
            log::debug!(
                "failed to decode member `{}` of `{}`: {_error}",
                member.name,
                type_name::<T>(),
            );
        })?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::{CompositeInfo, CompositeLayout, MemberInfo, Model, TypeShape};
    use crate::registry::ProcessorRegistry;
    use crate::stream::{ByteReader, ByteWriter};
    use crate::{CodecError, ErrorKind};

    #[derive(Debug, Default, PartialEq)]
    struct Record {
        id: i32,
        name: String,
        tags: Vec<String>,
    }

    fn record_members() -> [MemberInfo<Record>; 3] {
        [
            MemberInfo::<Record>::new::<i32>("id", |r| &r.id, |r, v| r.id = v),
            MemberInfo::<Record>::new::<String>("name", |r| &r.name, |r, v| r.name = v),
            MemberInfo::<Record>::new::<Vec<String>>("tags", |r| &r.tags, |r, v| r.tags = v),
        ]
    }

    impl Model for Record {
        fn shape() -> TypeShape<Self> {
            TypeShape::Composite(
                CompositeInfo::new(CompositeLayout::Reference, record_members())
                    .with_construct(Record::default),
            )
        }
    }

    /// Same members, value layout.
    #[derive(Debug, Default, PartialEq)]
    struct RecordValue(Record);

    impl Model for RecordValue {
        fn shape() -> TypeShape<Self> {
            let members = [MemberInfo::<Self>::new::<Record>("0", |r| &r.0, |r, v| r.0 = v)];
            TypeShape::Composite(
                CompositeInfo::new(CompositeLayout::Value, members).with_construct(Self::default),
            )
        }
    }

    fn sample() -> Record {
        Record {
            id: 42,
            name: String::from("hi"),
            tags: vec![String::from("a"), String::from("b")],
        }
    }

    #[test]
    fn reference_layout_has_presence_byte() {
        let registry = ProcessorRegistry::new();
        let bytes = registry.to_bytes(&sample()).unwrap();

        #[rustfmt::skip]
        let expected = [
            1,
            42, 0, 0, 0,
            2, 0, 0, 0, b'h', b'i',
            2, 0, 0, 0,
            1, 0, 0, 0, b'a',
            1, 0, 0, 0, b'b',
        ];
        assert_eq!(bytes, expected);
        assert_eq!(registry.from_bytes::<Record>(&bytes).unwrap(), sample());
    }

    #[test]
    fn value_layout_omits_presence_byte() {
        let registry = ProcessorRegistry::new();
        let bytes = registry.to_bytes(&RecordValue(sample())).unwrap();

        // The inner record still carries its own flag.
        assert_eq!(bytes.len(), 25);
        assert_eq!(bytes[0], 1);
        assert!(!registry.processor::<RecordValue>().unwrap().has_null_form());
        assert_eq!(
            registry.from_bytes::<RecordValue>(&bytes).unwrap(),
            RecordValue(sample())
        );
    }

    #[test]
    fn null_consumes_only_the_flag() {
        let registry = ProcessorRegistry::new();
        let processor = registry.processor::<Record>().unwrap();

        let mut writer = ByteWriter::new();
        processor.serialize_null(&mut writer).unwrap();
        writer.write(7_u8);
        assert_eq!(writer.as_bytes(), [0, 7]);

        let mut reader = ByteReader::new(writer.as_bytes());
        assert_eq!(processor.deserialize_nullable(&mut reader), Ok(None));
        assert_eq!(reader.offset(), 1);
        assert_eq!(reader.read::<u8>(), Ok(7));
    }

    #[test]
    fn invalid_flag_and_truncation_fail() {
        let registry = ProcessorRegistry::new();

        let error = registry.from_bytes::<Record>(&[2]).unwrap_err();
        assert!(matches!(error, CodecError::InvalidValue { offset: 0, .. }));

        let mut bytes = registry.to_bytes(&sample()).unwrap();
        bytes.truncate(bytes.len() - 1);
        let error = registry.from_bytes::<Record>(&bytes).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Underflow);
    }
}
