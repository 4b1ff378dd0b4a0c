use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::type_name;

use crate::CodecError;
use crate::info::Model;
use crate::registry::{LazyProcessor, Processor, ProcessorRegistry};
use crate::stream::{ByteReader, ByteWriter};

// -----------------------------------------------------------------------------
// Sequence

/// An array or growable list of `Item`.
///
/// Encoded as an `i32` element count followed by every element, in
/// iteration order, through the processor of `Item`. Decoding collects the
/// elements into a `Vec` and hands it to [`from_items`](Sequence::from_items).
///
/// Encoding fails with [`CodecError::ItemCountMismatch`] if `items` does not
/// yield exactly `item_count` items.
pub trait Sequence: Model {
    type Item: Model;

    /// Number of items [`items`](Sequence::items) yields.
    fn item_count(&self) -> usize;

    fn items(&self) -> impl Iterator<Item = &Self::Item>;

    fn from_items(items: Vec<Self::Item>) -> Self;
}

// -----------------------------------------------------------------------------
// Codec

/// The element processor is resolved on first use, so sequences of
/// themselves (or of each other) build without waiting on their elements.
pub(crate) fn build<T: Sequence>(registry: &ProcessorRegistry) -> Result<Processor<T>, CodecError> {
    let element = Arc::new(LazyProcessor::<T::Item>::new(registry.downgrade()));
    let reading = Arc::clone(&element);
    Ok(Processor::new(
        type_name::<T>(),
        move |value: &T, writer| {
            let element: &Processor<T::Item> = element.get()?;
            write_items(type_name::<T>(), element, value.item_count(), value.items(), writer)
        },
        move |reader| {
            let element: &Processor<T::Item> = reading.get()?;
            read_items(element, reader).map(T::from_items)
        },
    ))
}

/// Writes `count`, then each item.
///
/// `items` must yield exactly `count` items.
pub(crate) fn write_items<'a, E: Model>(
    owner: &'static str,
    element: &Processor<E>,
    count: usize,
    mut items: impl Iterator<Item = &'a E>,
    writer: &mut ByteWriter,
) -> Result<(), CodecError> {
    writer.write_len(count)?;
    let mut written = 0;
    for item in items.by_ref().take(count) {
        element.serialize(item, writer)?;
        written += 1;
    }

    let actual = written + items.count();
    if actual != count {
        return Err(CodecError::ItemCountMismatch {
            type_name: owner,
            declared: count,
            actual,
        });
    }
    Ok(())
}

/// Reads a count, then exactly that many items.
///
/// The count is not trusted for allocation: at most one slot per remaining
/// byte is reserved up front.
pub(crate) fn read_items<E: Model>(
    element: &Processor<E>,
    reader: &mut ByteReader<'_>,
) -> Result<Vec<E>, CodecError> {
    let offset = reader.offset();
    let length = reader.read_i32()?;
    let count = usize::try_from(length).map_err(|_| CodecError::InvalidLength { offset, length })?;

    let mut items = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        items.push(element.deserialize(reader)?);
    }
    Ok(items)
}
