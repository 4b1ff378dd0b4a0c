//! A binary serialization engine driven by a per-type processor cache.
//!
//! Every encodable type implements [`Model`], which classifies it as one of a
//! few shapes: fixed-width values, text, arrays, lists, collection interfaces
//! or composites. The first time a type is encoded or decoded, a
//! [`ProcessorRegistry`](registry::ProcessorRegistry) turns that
//! classification into a [`Processor`](registry::Processor) and caches it, so
//! later calls only run the processor.
//!
//! # Wire format
//!
//! Little-endian, no header, no type tags.
//!
//! | Shape | Bytes |
//! |---|---|
//! | fixed-width value | raw `SIZE` bytes |
//! | text | `i32` length (`-1` null, `0` empty), then UTF-8 bytes |
//! | array, list, collection | `i32` count, then each element |
//! | composite (reference) | `u8` presence flag, then members if present |
//! | composite (value) | members |
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "derive")]
//! # {
//! use tc_codec::derive::Model;
//!
//! #[derive(Model, Debug, Default, PartialEq)]
//! #[model(value)]
//! struct Item {
//!     id: i32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let item = Item {
//!     id: 42,
//!     name: "hi".into(),
//!     tags: vec!["a".into(), "b".into()],
//! };
//!
//! let bytes = tc_codec::to_bytes(&item).unwrap();
//! assert_eq!(bytes.len(), 24);
//! assert_eq!(tc_codec::from_bytes::<Item>(&bytes).unwrap(), item);
//! # }
//! ```
//!
//! # Features
//!
//! - `derive` (default): re-exports `#[derive(Model)]` as [`derive::Model`].
//! - `debug` (default): logs the failing member of a composite decode, only in
//!   builds with `debug_assertions`.
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derived code refers to `tc_codec`, which must also resolve inside this crate.
extern crate self as tc_codec;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod api;
mod error;
mod impls;

pub mod codec;
pub mod info;
pub mod registry;
pub mod stream;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use api::{deserialize_from, from_bytes, serialize_into, to_bytes};
pub use error::{CodecError, ErrorKind};
pub use info::Model;

#[cfg(feature = "derive")]
pub use tc_codec_derive as derive;
