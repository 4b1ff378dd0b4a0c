//! [`Model`](crate::info::Model) implementations for standard types.

mod collections;
mod primitives;
mod sequences;
mod text;
mod wrappers;
