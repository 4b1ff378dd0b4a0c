use alloc::string::String;
use core::any::type_name;

use crate::CodecError;
use crate::info::{Model, TextInfo};
use crate::registry::Processor;
use crate::stream::{ByteReader, ByteWriter};

const NULL_LENGTH: i32 = -1;

// -----------------------------------------------------------------------------
// Textual

/// A text-like type, encoded as length-prefixed UTF-8.
///
/// | value | bytes |
/// |---|---|
/// | null | `-1` as `i32` |
/// | `""` | `0` as `i32` |
/// | otherwise | byte length `N` as `i32`, then `N` UTF-8 bytes |
pub trait Textual: Model {
    fn as_text(&self) -> &str;

    fn from_text(text: String) -> Self;
}

// -----------------------------------------------------------------------------
// Codec

pub(crate) fn build<T: Model>(info: TextInfo<T>) -> Processor<T> {
    let TextInfo { as_text, from_text } = info;
    Processor::nullable(
        type_name::<T>(),
        move |value, writer| write_text(as_text(value), writer),
        move |reader| Ok(read_text(reader)?.map(from_text)),
        write_null,
    )
}

fn write_null(writer: &mut ByteWriter) {
    writer.write_i32(NULL_LENGTH);
}

fn write_text(text: &str, writer: &mut ByteWriter) -> Result<(), CodecError> {
    writer.write_len(text.len())?;
    writer.write_bytes(text.as_bytes());
    Ok(())
}

/// Reads a tri-state length prefix and its payload, `None` for null.
fn read_text(reader: &mut ByteReader<'_>) -> Result<Option<String>, CodecError> {
    let offset = reader.offset();
    match reader.read_i32()? {
        NULL_LENGTH => Ok(None),
        0 => Ok(Some(String::new())),
        length if length > 0 => {
            let payload = reader.read_bytes(length as usize)?;
            match core::str::from_utf8(payload) {
                Ok(text) => Ok(Some(String::from(text))),
                Err(source) => Err(CodecError::InvalidUtf8 {
                    offset: offset + 4,
                    source,
                }),
            }
        }
        length => Err(CodecError::InvalidLength { offset, length }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;

    use crate::registry::ProcessorRegistry;
    use crate::stream::{ByteReader, ByteWriter};
    use crate::{CodecError, ErrorKind};

    #[test]
    fn empty_and_null_are_distinct() {
        let registry = ProcessorRegistry::new();
        let processor = registry.processor::<String>().unwrap();

        let empty = registry.to_bytes(&String::new()).unwrap();
        let mut null = ByteWriter::new();
        processor.serialize_null(&mut null).unwrap();

        assert_eq!(empty, [0, 0, 0, 0]);
        assert_eq!(null.as_bytes(), [0xFF; 4]);

        let mut reader = ByteReader::new(&empty);
        assert_eq!(processor.deserialize_nullable(&mut reader), Ok(Some(String::new())));

        let mut reader = ByteReader::new(null.as_bytes());
        assert_eq!(processor.deserialize_nullable(&mut reader), Ok(None));

        let mut reader = ByteReader::new(null.as_bytes());
        assert!(matches!(
            processor.deserialize(&mut reader),
            Err(CodecError::UnexpectedNull { .. })
        ));
    }

    #[test]
    fn length_counts_utf8_bytes() {
        let registry = ProcessorRegistry::new();
        let text = String::from("héllo, 世界");
        let bytes = registry.to_bytes(&text).unwrap();

        assert_eq!(&bytes[..4], &(text.len() as i32).to_le_bytes());
        assert_eq!(bytes.len(), 4 + 14);
        assert_eq!(registry.from_bytes::<String>(&bytes).unwrap(), text);

        let boxed: Box<str> = registry.from_bytes(&bytes).unwrap();
        let shared: Arc<str> = registry.from_bytes(&bytes).unwrap();
        assert_eq!(&*boxed, &*shared);
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        let registry = ProcessorRegistry::new();

        let truncated = [100, 0, 0, 0, b'a', b'b'];
        let error = registry.from_bytes::<String>(&truncated).unwrap_err();
        assert_eq!(
            error,
            CodecError::Underflow {
                offset: 4,
                needed: 100,
                remaining: 2,
            }
        );

        let invalid = [2, 0, 0, 0, 0xC3, 0x28];
        let error = registry.from_bytes::<String>(&invalid).unwrap_err();
        assert!(matches!(error, CodecError::InvalidUtf8 { offset: 4, .. }));
        assert_eq!(error.kind(), ErrorKind::InvalidData);

        let negative = (-2_i32).to_le_bytes();
        assert_eq!(
            registry.from_bytes::<String>(&negative),
            Err(CodecError::InvalidLength {
                offset: 0,
                length: -2,
            })
        );
    }
}
