use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::collections::HashSet;

use crate::codec::{Collection, CollectionInterface, OrderedCollection};
use crate::info::{Model, TypeShape};

// -----------------------------------------------------------------------------
// Collection

impl<E: 'static> Collection<E> for Vec<E> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

impl<E: 'static> OrderedCollection<E> for Vec<E> {
    #[inline]
    fn get(&self, index: usize) -> Option<&E> {
        <[E]>::get(self, index)
    }
}

impl<E: 'static> Collection<E> for Box<[E]> {
    #[inline]
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

impl<E: 'static> OrderedCollection<E> for Box<[E]> {
    #[inline]
    fn get(&self, index: usize) -> Option<&E> {
        <[E]>::get(self, index)
    }
}

impl<E: 'static> Collection<E> for VecDeque<E> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

impl<E: 'static> OrderedCollection<E> for VecDeque<E> {
    #[inline]
    fn get(&self, index: usize) -> Option<&E> {
        VecDeque::get(self, index)
    }
}

impl<E: 'static> Collection<E> for BTreeSet<E> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

impl<E: 'static, S: 'static> Collection<E> for HashSet<E, S> {
    #[inline]
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn items(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

// -----------------------------------------------------------------------------
// CollectionInterface

macro_rules! impl_collection_interface {
    ($($pointer:ident<dyn $interface:ident>),* $(,)?) => {
        $(
            impl<E: Model> CollectionInterface for $pointer<dyn $interface<E>> {
                type Item = E;

                #[inline]
                fn view(&self) -> &dyn Collection<E> {
                    &**self
                }

                #[inline]
                fn from_list(items: Vec<E>) -> Self {
                    $pointer::new(items)
                }
            }

            impl<E: Model> Model for $pointer<dyn $interface<E>> {
                #[inline]
                fn shape() -> TypeShape<Self> {
                    TypeShape::collection()
                }
            }
        )*
    };
}

impl_collection_interface!(
    Box<dyn OrderedCollection>,
    Arc<dyn OrderedCollection>,
    Box<dyn Collection>,
    Arc<dyn Collection>,
);
