use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use crate::CodecError;
use crate::codec::sequence;
use crate::info::Model;
use crate::registry::{LazyProcessor, Processor, ProcessorRegistry};
use crate::stream::ByteWriter;

// -----------------------------------------------------------------------------
// Collection traits

/// A read-only view over a collection of `E`, usable as a trait object.
pub trait Collection<E>: Any + 'static {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enumerates the items in the collection's own order.
    fn items(&self) -> Box<dyn Iterator<Item = &E> + '_>;
}

/// A [`Collection`] with positional access.
pub trait OrderedCollection<E>: Collection<E> {
    fn get(&self, index: usize) -> Option<&E>;
}

/// A type exposed only through a collection interface, such as
/// `Box<dyn OrderedCollection<E>>` or `Arc<dyn Collection<E>>`.
///
/// Encoding inspects the value behind the interface (see
/// [`CollectionStrategy`]), decoding always materializes a `Vec<Item>`.
pub trait CollectionInterface: Model {
    type Item: Model;

    fn view(&self) -> &dyn Collection<Self::Item>;

    fn from_list(items: Vec<Self::Item>) -> Self;
}

// -----------------------------------------------------------------------------
// CollectionStrategy

/// How the value behind a collection interface is encoded.
///
/// All strategies produce the same layout: an `i32` count and the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStrategy {
    /// Backed by a `Vec<E>`.
    List,
    /// Backed by a `Box<[E]>`.
    Array,
    /// Anything else: items are enumerated and counted while writing.
    Enumerable,
}

impl CollectionStrategy {
    /// Selects the strategy for the concrete value behind `collection`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use tc_codec::codec::{Collection, CollectionStrategy};
    ///
    /// let list: Box<dyn Collection<u8>> = Box::new(vec![1, 2]);
    /// let set: Box<dyn Collection<u8>> = Box::new(BTreeSet::from([1, 2]));
    ///
    /// assert_eq!(CollectionStrategy::of(&*list), CollectionStrategy::List);
    /// assert_eq!(CollectionStrategy::of(&*set), CollectionStrategy::Enumerable);
    /// ```
    pub fn of<E: 'static>(collection: &dyn Collection<E>) -> Self {
        let collection: &dyn Any = collection;
        if collection.is::<Vec<E>>() {
            Self::List
        } else if collection.is::<Box<[E]>>() {
            Self::Array
        } else {
            Self::Enumerable
        }
    }
}

// -----------------------------------------------------------------------------
// Codec

pub(crate) fn build<T: CollectionInterface>(
    registry: &ProcessorRegistry,
) -> Result<Processor<T>, CodecError> {
    let element = Arc::new(LazyProcessor::<T::Item>::new(registry.downgrade()));
    let reading = Arc::clone(&element);
    Ok(Processor::new(
        type_name::<T>(),
        move |value: &T, writer| {
            let element: &Processor<T::Item> = element.get()?;
            write_collection(type_name::<T>(), element, value.view(), writer)
        },
        move |reader| {
            let element: &Processor<T::Item> = reading.get()?;
            sequence::read_items(element, reader).map(T::from_list)
        },
    ))
}

fn write_collection<E: Model>(
    owner: &'static str,
    element: &Processor<E>,
    collection: &dyn Collection<E>,
    writer: &mut ByteWriter,
) -> Result<(), CodecError> {
    match CollectionStrategy::of(collection) {
        CollectionStrategy::List | CollectionStrategy::Array => {
            sequence::write_items(owner, element, collection.len(), collection.items(), writer)
        }
        CollectionStrategy::Enumerable => {
            log::trace!(
                "enumerating a collection of `{}` with unknown backing type",
                type_name::<E>(),
            );
            let items: Vec<&E> = collection.items().collect();
            sequence::write_items(owner, element, items.len(), items.into_iter(), writer)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeSet, VecDeque};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::Any;

    use super::{Collection, CollectionStrategy, OrderedCollection};
    use crate::info::ShapeKind;
    use crate::registry::ProcessorRegistry;

    #[test]
    fn strategy_follows_backing_value() {
        let list: Box<dyn Collection<u8>> = Box::new(vec![1, 2]);
        let array: Box<dyn Collection<u8>> = Box::new(vec![1, 2].into_boxed_slice());
        let queue: Box<dyn Collection<u8>> = Box::new(VecDeque::from([1, 2]));

        assert_eq!(CollectionStrategy::of(&*list), CollectionStrategy::List);
        assert_eq!(CollectionStrategy::of(&*array), CollectionStrategy::Array);
        assert_eq!(CollectionStrategy::of(&*queue), CollectionStrategy::Enumerable);
    }

    #[test]
    fn every_strategy_writes_the_list_layout() {
        let registry = ProcessorRegistry::new();
        let expected = [3, 0, 0, 0, 1, 2, 3];

        let list: Box<dyn OrderedCollection<u8>> = Box::new(vec![1, 2, 3]);
        let array: Arc<dyn OrderedCollection<u8>> = Arc::new(vec![1, 2, 3].into_boxed_slice());
        let set: Box<dyn Collection<u8>> = Box::new(BTreeSet::from([3, 1, 2]));

        assert_eq!(registry.to_bytes(&list).unwrap(), expected);
        assert_eq!(registry.to_bytes(&array).unwrap(), expected);
        assert_eq!(registry.to_bytes(&set).unwrap(), expected);
    }

    #[test]
    fn decoding_materializes_a_list() {
        let registry = ProcessorRegistry::new();
        let set: Arc<dyn Collection<u32>> = Arc::new(BTreeSet::from([10, 20]));
        let bytes = registry.to_bytes(&set).unwrap();

        let decoded: Arc<dyn Collection<u32>> = registry.from_bytes(&bytes).unwrap();
        let backing: &dyn Any = &*decoded;
        assert_eq!(backing.downcast_ref::<Vec<u32>>(), Some(&vec![10, 20]));

        let ordered: Box<dyn OrderedCollection<u32>> = registry.from_bytes(&bytes).unwrap();
        assert_eq!(ordered.get(1), Some(&20));
        assert_eq!(ordered.len(), 2);

        let descriptor = registry.descriptor::<Arc<dyn Collection<u32>>>().unwrap();
        assert_eq!(descriptor.kind(), ShapeKind::Collection);
        assert!(descriptor.element().unwrap().is::<u32>());
    }
}
