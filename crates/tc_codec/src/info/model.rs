use core::fmt;

use crate::info::TypeShape;

// -----------------------------------------------------------------------------
// ShapeKind

/// The kind of a [`TypeShape`], without its payload.
///
/// Wrappers (`Option<T>`, `Box<T>`) have no kind of their own and report the
/// kind of the wrapped type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Unmanaged,
    Text,
    Array,
    List,
    Collection,
    Composite,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmanaged => f.pad("Unmanaged"),
            Self::Text => f.pad("Text"),
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
            Self::Collection => f.pad("Collection"),
            Self::Composite => f.pad("Composite"),
        }
    }
}

// -----------------------------------------------------------------------------
// Model

/// A type that can be encoded by a [`ProcessorRegistry`].
///
/// [`shape`](Model::shape) classifies the type. It is called at most once per
/// registry, the first time a processor for `Self` is requested, and must
/// return the same classification every time.
///
/// Implementations exist for the fixed-width primitives, text types,
/// sequences, collection interfaces, `Option<T>` and `Box<T>`. Structs use
/// `#[derive(Model)]`.
///
/// # Examples
///
/// ```
/// use tc_codec::info::{Model, ShapeKind};
///
/// assert_eq!(<u32 as Model>::shape().kind(), Some(ShapeKind::Unmanaged));
/// assert_eq!(<Vec<String> as Model>::shape().kind(), Some(ShapeKind::List));
/// assert_eq!(<Option<String> as Model>::shape().kind(), None);
/// ```
///
/// [`ProcessorRegistry`]: crate::registry::ProcessorRegistry
pub trait Model: Sized + 'static {
    /// Returns the classification of `Self`.
    fn shape() -> TypeShape<Self>;
}
