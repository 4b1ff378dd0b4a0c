use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::codec::Sequence;
use crate::info::{Model, TypeShape};

impl<E: Model> Sequence for Vec<E> {
    type Item = E;

    #[inline]
    fn item_count(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn items(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }

    #[inline]
    fn from_items(items: Vec<E>) -> Self {
        items
    }
}

impl<E: Model> Model for Vec<E> {
    #[inline]
    fn shape() -> TypeShape<Self> {
        TypeShape::list()
    }
}

impl<E: Model> Sequence for VecDeque<E> {
    type Item = E;

    #[inline]
    fn item_count(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn items(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }

    #[inline]
    fn from_items(items: Vec<E>) -> Self {
        VecDeque::from(items)
    }
}

impl<E: Model> Model for VecDeque<E> {
    #[inline]
    fn shape() -> TypeShape<Self> {
        TypeShape::list()
    }
}

impl<E: Model> Sequence for Box<[E]> {
    type Item = E;

    #[inline]
    fn item_count(&self) -> usize {
        <[E]>::len(self)
    }

    #[inline]
    fn items(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }

    #[inline]
    fn from_items(items: Vec<E>) -> Self {
        items.into_boxed_slice()
    }
}

impl<E: Model> Model for Box<[E]> {
    #[inline]
    fn shape() -> TypeShape<Self> {
        TypeShape::array()
    }
}
