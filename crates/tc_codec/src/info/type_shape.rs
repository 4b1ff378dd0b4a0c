use alloc::boxed::Box;
use alloc::string::String;

use crate::CodecError;
use crate::codec::{self, Built, CollectionInterface, Sequence, Textual};
use crate::info::{CompositeInfo, Model, ShapeKind, TypeRef};
use crate::registry::{Processor, ProcessorRegistry};
use crate::stream::{ByteReader, ByteWriter, Fixed};

// -----------------------------------------------------------------------------
// TypeShape

/// The classification of one concrete type.
///
/// Returned by [`Model::shape`] and turned into a
/// [`Processor`] by the registry. Classification order is expressed by
/// which variant an implementation returns: fixed-width values are
/// [`Unmanaged`](Self::Unmanaged), text is [`Text`](Self::Text), arrays,
/// lists and collection interfaces are [`Array`](Self::Array),
/// [`List`](Self::List) and [`Collection`](Self::Collection), everything else
/// is a [`Composite`](Self::Composite).
pub enum TypeShape<T> {
    Unmanaged(UnmanagedInfo<T>),
    Text(TextInfo<T>),
    Array(SequenceInfo<T>),
    List(SequenceInfo<T>),
    Collection(SequenceInfo<T>),
    Composite(CompositeInfo<T>),
    /// `Option<T>` or `Box<T>`, classified as the wrapped type.
    Indirect(IndirectInfo<T>),
}

impl<T> TypeShape<T> {
    /// Returns the kind of this shape, `None` for wrappers.
    pub fn kind(&self) -> Option<ShapeKind> {
        match self {
            Self::Unmanaged(_) => Some(ShapeKind::Unmanaged),
            Self::Text(_) => Some(ShapeKind::Text),
            Self::Array(_) => Some(ShapeKind::Array),
            Self::List(_) => Some(ShapeKind::List),
            Self::Collection(_) => Some(ShapeKind::Collection),
            Self::Composite(_) => Some(ShapeKind::Composite),
            Self::Indirect(_) => None,
        }
    }
}

impl<T: Fixed> TypeShape<T> {
    #[inline]
    pub fn unmanaged() -> Self {
        Self::Unmanaged(UnmanagedInfo::new())
    }
}

impl<T: Textual> TypeShape<T> {
    #[inline]
    pub fn text() -> Self {
        Self::Text(TextInfo::new())
    }
}

impl<T: Sequence> TypeShape<T> {
    /// A fixed-length array of `T::Item`.
    #[inline]
    pub fn array() -> Self {
        Self::Array(SequenceInfo::sequence())
    }

    /// A growable ordered list of `T::Item`.
    #[inline]
    pub fn list() -> Self {
        Self::List(SequenceInfo::sequence())
    }
}

impl<T: CollectionInterface> TypeShape<T> {
    #[inline]
    pub fn collection() -> Self {
        Self::Collection(SequenceInfo::collection())
    }
}

// -----------------------------------------------------------------------------
// UnmanagedInfo

/// A fixed-width value copied as raw little-endian bytes.
pub struct UnmanagedInfo<T> {
    pub(crate) size: usize,
    pub(crate) write: fn(&T, &mut ByteWriter),
    pub(crate) read: fn(&mut ByteReader<'_>) -> Result<T, CodecError>,
}

impl<T: Fixed> UnmanagedInfo<T> {
    pub fn new() -> Self {
        Self {
            size: T::SIZE,
            write: |value, writer| writer.write(*value),
            read: T::read_fixed,
        }
    }
}

impl<T> UnmanagedInfo<T> {
    /// Number of bytes written per value.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

// -----------------------------------------------------------------------------
// TextInfo

/// A text-like value, encoded as a tri-state length prefix and UTF-8 bytes.
pub struct TextInfo<T> {
    pub(crate) as_text: fn(&T) -> &str,
    pub(crate) from_text: fn(String) -> T,
}

impl<T: Textual> TextInfo<T> {
    pub fn new() -> Self {
        Self {
            as_text: T::as_text,
            from_text: T::from_text,
        }
    }
}

// -----------------------------------------------------------------------------
// SequenceInfo

/// A count-prefixed sequence of elements.
pub struct SequenceInfo<T> {
    element: TypeRef,
    pub(crate) build: fn(&ProcessorRegistry) -> Result<Processor<T>, CodecError>,
}

impl<T: Sequence> SequenceInfo<T> {
    /// An array or list, encoded element by element.
    pub fn sequence() -> Self {
        Self {
            element: TypeRef::of::<T::Item>(),
            build: codec::sequence::build::<T>,
        }
    }
}

impl<T: CollectionInterface> SequenceInfo<T> {
    /// A collection interface, encoded with the strategy of its backing value.
    pub fn collection() -> Self {
        Self {
            element: TypeRef::of::<T::Item>(),
            build: codec::collection::build::<T>,
        }
    }
}

impl<T> SequenceInfo<T> {
    #[inline]
    pub fn element(&self) -> TypeRef {
        self.element
    }
}

// -----------------------------------------------------------------------------
// IndirectInfo

/// A wrapper reusing the processor of the wrapped type.
pub struct IndirectInfo<T> {
    inner: TypeRef,
    pub(crate) build: fn(&ProcessorRegistry) -> Result<Built<T>, CodecError>,
}

impl<I: Model> IndirectInfo<Option<I>> {
    /// `None` is written as the null form of `I`.
    ///
    /// Building fails with
    /// [`CodecError::UnsupportedShape`] if `I` has no null form.
    pub fn nullable() -> Self {
        Self {
            inner: TypeRef::of::<I>(),
            build: codec::indirect::build_option::<I>,
        }
    }
}

impl<I: Model> IndirectInfo<Box<I>> {
    /// Encoded exactly like `I`.
    pub fn boxed() -> Self {
        Self {
            inner: TypeRef::of::<I>(),
            build: codec::indirect::build_box::<I>,
        }
    }
}

impl<T> IndirectInfo<T> {
    #[inline]
    pub fn inner(&self) -> TypeRef {
        self.inner
    }
}
