use alloc::vec::Vec;

use crate::CodecError;
use crate::stream::Fixed;

/// A growable little-endian byte sink.
///
/// # Examples
///
/// ```
/// use tc_codec::stream::ByteWriter;
///
/// let mut writer = ByteWriter::new();
/// writer.write(42_i32);
/// writer.write_bytes(b"hi");
///
/// assert_eq!(writer.as_bytes(), &[42, 0, 0, 0, b'h', b'i']);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[inline]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates an empty writer with at least `capacity` bytes preallocated.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Appends raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Appends the `T::SIZE` byte representation of `value`.
    #[inline]
    pub fn write<T: Fixed>(&mut self, value: T) {
        value.write_fixed(self);
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Writes a non-negative 32-bit length or count prefix.
    pub(crate) fn write_len(&mut self, len: usize) -> Result<(), CodecError> {
        let len = i32::try_from(len).map_err(|_| CodecError::LengthOverflow { len })?;
        self.write_i32(len);
        Ok(())
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Discards the written bytes, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl From<ByteWriter> for Vec<u8> {
    #[inline]
    fn from(writer: ByteWriter) -> Self {
        writer.buffer
    }
}
