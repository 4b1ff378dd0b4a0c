use alloc::boxed::Box;
use core::fmt;

use crate::CodecError;
use crate::stream::{ByteReader, ByteWriter};

type SerializeFn<T> = Box<dyn Fn(&T, &mut ByteWriter) -> Result<(), CodecError> + Send + Sync>;
type DeserializeFn<T> =
    Box<dyn Fn(&mut ByteReader<'_>) -> Result<Option<T>, CodecError> + Send + Sync>;

/// The serialize/deserialize pair governing one concrete type.
///
/// Obtained from [`ProcessorRegistry::processor`]. A published processor is
/// immutable and shared by every caller of the same registry.
///
/// Some types have a *null form*: text writes length `-1` and reference
/// composites write presence `0`. For those, [`serialize_null`] writes it and
/// [`deserialize_nullable`] reports it as `None`.
///
/// # Examples
///
/// ```
/// use tc_codec::registry::ProcessorRegistry;
/// use tc_codec::stream::{ByteReader, ByteWriter};
///
/// let processor = ProcessorRegistry::global().processor::<String>().unwrap();
///
/// let mut writer = ByteWriter::new();
/// processor.serialize(&"hi".to_string(), &mut writer).unwrap();
/// processor.serialize_null(&mut writer).unwrap();
/// assert_eq!(writer.as_bytes(), &[2, 0, 0, 0, b'h', b'i', 255, 255, 255, 255]);
///
/// let mut reader = ByteReader::new(writer.as_bytes());
/// assert_eq!(processor.deserialize(&mut reader).unwrap(), "hi");
/// assert_eq!(processor.deserialize_nullable(&mut reader).unwrap(), None);
/// ```
///
/// [`ProcessorRegistry::processor`]: crate::registry::ProcessorRegistry::processor
/// [`serialize_null`]: Processor::serialize_null
/// [`deserialize_nullable`]: Processor::deserialize_nullable
pub struct Processor<T> {
    type_name: &'static str,
    serialize: SerializeFn<T>,
    deserialize: DeserializeFn<T>,
    write_null: Option<fn(&mut ByteWriter)>,
}

impl<T: 'static> Processor<T> {
    /// A processor without a null form.
    pub(crate) fn new(
        type_name: &'static str,
        serialize: impl Fn(&T, &mut ByteWriter) -> Result<(), CodecError> + Send + Sync + 'static,
        deserialize: impl Fn(&mut ByteReader<'_>) -> Result<T, CodecError> + Send + Sync + 'static,
    ) -> Self {
        Self::from_parts(
            type_name,
            serialize,
            move |reader: &mut ByteReader<'_>| deserialize(reader).map(Some),
            None,
        )
    }

    /// A processor whose `deserialize` returns `None` for the null form.
    pub(crate) fn nullable(
        type_name: &'static str,
        serialize: impl Fn(&T, &mut ByteWriter) -> Result<(), CodecError> + Send + Sync + 'static,
        deserialize: impl Fn(&mut ByteReader<'_>) -> Result<Option<T>, CodecError>
        + Send
        + Sync
        + 'static,
        write_null: fn(&mut ByteWriter),
    ) -> Self {
        Self::from_parts(type_name, serialize, deserialize, Some(write_null))
    }

    pub(crate) fn from_parts(
        type_name: &'static str,
        serialize: impl Fn(&T, &mut ByteWriter) -> Result<(), CodecError> + Send + Sync + 'static,
        deserialize: impl Fn(&mut ByteReader<'_>) -> Result<Option<T>, CodecError>
        + Send
        + Sync
        + 'static,
        write_null: Option<fn(&mut ByteWriter)>,
    ) -> Self {
        Self {
            type_name,
            serialize: Box::new(serialize),
            deserialize: Box::new(deserialize),
            write_null,
        }
    }
}

impl<T> Processor<T> {
    /// Returns the name of the processed type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Appends the encoding of `value`.
    #[inline]
    pub fn serialize(&self, value: &T, writer: &mut ByteWriter) -> Result<(), CodecError> {
        (self.serialize)(value, writer)
    }

    /// Decodes one value.
    ///
    /// Fails with [`CodecError::UnexpectedNull`] if the source holds the null
    /// form, use [`deserialize_nullable`](Self::deserialize_nullable) to
    /// accept it.
    pub fn deserialize(&self, reader: &mut ByteReader<'_>) -> Result<T, CodecError> {
        (self.deserialize)(reader)?.ok_or(CodecError::UnexpectedNull {
            type_name: self.type_name,
        })
    }

    /// Decodes one value, returning `None` for the null form.
    #[inline]
    pub fn deserialize_nullable(&self, reader: &mut ByteReader<'_>) -> Result<Option<T>, CodecError> {
        (self.deserialize)(reader)
    }

    /// Appends the null form.
    ///
    /// Fails with [`CodecError::UnsupportedShape`] if the type has none.
    pub fn serialize_null(&self, writer: &mut ByteWriter) -> Result<(), CodecError> {
        match self.write_null {
            Some(write_null) => {
                write_null(writer);
                Ok(())
            }
            None => Err(CodecError::UnsupportedShape {
                type_name: self.type_name,
                reason: "the type has no null wire form",
            }),
        }
    }

    /// Returns `true` if the type has a null form.
    #[inline]
    pub fn has_null_form(&self) -> bool {
        self.write_null.is_some()
    }

    #[inline]
    pub(crate) fn null_writer(&self) -> Option<fn(&mut ByteWriter)> {
        self.write_null
    }
}

impl<T> fmt::Debug for Processor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("type_name", &self.type_name)
            .field("has_null_form", &self.has_null_form())
            .finish_non_exhaustive()
    }
}
