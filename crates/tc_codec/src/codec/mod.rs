//! The codecs turning a [`TypeShape`] into a [`Processor`].
//!
//! - `primitive`: raw byte copy of [`Fixed`](crate::stream::Fixed) values.
//! - `text`: tri-state length-prefixed UTF-8, for [`Textual`] types.
//! - `sequence`: count-prefixed elements, for [`Sequence`] types.
//! - `collection`: the strategy table of [`CollectionInterface`] types.
//! - `object`: presence-flagged member-wise encoding of composites.
//! - `indirect`: `Option<T>` and `Box<T>` over the wrapped type's processor.

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod collection;
pub(crate) mod indirect;
pub(crate) mod object;
pub(crate) mod primitive;
pub(crate) mod sequence;
pub(crate) mod text;

// -----------------------------------------------------------------------------
// Exports

pub use collection::{Collection, CollectionInterface, CollectionStrategy, OrderedCollection};
pub use sequence::Sequence;
pub use text::Textual;

use crate::CodecError;
use crate::info::{Model, SequenceInfo, ShapeKind, TypeDescriptor, TypeRef, TypeShape};
use crate::registry::{Processor, ProcessorRegistry};

/// A freshly built descriptor and processor, not yet published.
pub(crate) struct Built<T> {
    pub(crate) descriptor: TypeDescriptor,
    pub(crate) processor: Processor<T>,
}

/// Classifies `T` and builds its processor.
pub(crate) fn build<T: Model>(registry: &ProcessorRegistry) -> Result<Built<T>, CodecError> {
    let ty = TypeRef::of::<T>();
    let built = match T::shape() {
        TypeShape::Unmanaged(info) => Built {
            descriptor: TypeDescriptor::new(ty, ShapeKind::Unmanaged).with_size(info.size),
            processor: primitive::build(info),
        },
        TypeShape::Text(info) => Built {
            descriptor: TypeDescriptor::new(ty, ShapeKind::Text),
            processor: text::build(info),
        },
        TypeShape::Array(info) => build_sequence(registry, ty, ShapeKind::Array, info)?,
        TypeShape::List(info) => build_sequence(registry, ty, ShapeKind::List, info)?,
        TypeShape::Collection(info) => build_sequence(registry, ty, ShapeKind::Collection, info)?,
        TypeShape::Composite(info) => Built {
            descriptor: TypeDescriptor::new(ty, ShapeKind::Composite).with_members(
                info.layout,
                info.members.iter().map(|member| member.descriptor().clone()),
            ),
            processor: object::build(registry, info)?,
        },
        TypeShape::Indirect(info) => (info.build)(registry)?,
    };
    Ok(built)
}

fn build_sequence<T>(
    registry: &ProcessorRegistry,
    ty: TypeRef,
    kind: ShapeKind,
    info: SequenceInfo<T>,
) -> Result<Built<T>, CodecError> {
    Ok(Built {
        descriptor: TypeDescriptor::new(ty, kind).with_element(info.element()),
        processor: (info.build)(registry)?,
    })
}
