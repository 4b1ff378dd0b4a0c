use crate::CodecError;
use crate::stream::Fixed;

/// A bounds-checked little-endian cursor over a byte slice.
///
/// Every read either consumes exactly the requested bytes or fails with
/// [`CodecError::Underflow`] leaving the cursor where it was.
///
/// # Examples
///
/// ```
/// use tc_codec::stream::ByteReader;
///
/// let mut reader = ByteReader::new(&[7, 0, 0, 0, 1]);
/// assert_eq!(reader.read::<u32>().unwrap(), 7);
/// assert_eq!(reader.remaining(), 1);
/// assert!(reader.read::<u16>().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Consumes `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::Underflow {
                offset: self.offset,
                needed: len,
                remaining,
            });
        }
        let bytes = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Consumes exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut array = [0_u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Consumes `T::SIZE` bytes and reinterprets them as `T`.
    #[inline]
    pub fn read<T: Fixed>(&mut self) -> Result<T, CodecError> {
        T::read_fixed(self)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.read_array().map(u8::from_le_bytes)
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Position of the next unread byte.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
