use alloc::vec::Vec;

use crate::CodecError;
use crate::info::Model;
use crate::registry::ProcessorRegistry;
use crate::stream::{ByteReader, ByteWriter};

/// Encodes `value` into a new buffer using the global registry.
///
/// # Examples
///
/// ```
/// let bytes = tc_codec::to_bytes(&vec![1_u16, 2]).unwrap();
/// assert_eq!(bytes, [2, 0, 0, 0, 1, 0, 2, 0]);
/// ```
#[inline]
pub fn to_bytes<T: Model>(value: &T) -> Result<Vec<u8>, CodecError> {
    ProcessorRegistry::global().to_bytes(value)
}

/// Decodes a `T` occupying the whole of `bytes` using the global registry.
///
/// # Examples
///
/// ```
/// use tc_codec::CodecError;
///
/// let text: String = tc_codec::from_bytes(&[2, 0, 0, 0, b'o', b'k']).unwrap();
/// assert_eq!(text, "ok");
///
/// let error = tc_codec::from_bytes::<u8>(&[1, 2]).unwrap_err();
/// assert_eq!(error, CodecError::TrailingBytes { remaining: 1 });
/// ```
#[inline]
pub fn from_bytes<T: Model>(bytes: &[u8]) -> Result<T, CodecError> {
    ProcessorRegistry::global().from_bytes(bytes)
}

/// Appends the encoding of `value` to `writer` using the global registry.
///
/// # Examples
///
/// ```
/// use tc_codec::stream::{ByteReader, ByteWriter};
///
/// let mut writer = ByteWriter::new();
/// tc_codec::serialize_into(&7_u8, &mut writer).unwrap();
/// tc_codec::serialize_into(&String::from("x"), &mut writer).unwrap();
///
/// let mut reader = ByteReader::new(writer.as_bytes());
/// assert_eq!(tc_codec::deserialize_from::<u8>(&mut reader).unwrap(), 7);
/// assert_eq!(tc_codec::deserialize_from::<String>(&mut reader).unwrap(), "x");
/// assert!(reader.is_empty());
/// ```
#[inline]
pub fn serialize_into<T: Model>(value: &T, writer: &mut ByteWriter) -> Result<(), CodecError> {
    ProcessorRegistry::global().serialize_into(value, writer)
}

/// Decodes the next `T` from `reader` using the global registry.
#[inline]
pub fn deserialize_from<T: Model>(reader: &mut ByteReader<'_>) -> Result<T, CodecError> {
    ProcessorRegistry::global().deserialize_from(reader)
}
