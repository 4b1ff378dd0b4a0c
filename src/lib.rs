//! Type-directed binary serialization.
//!
//! `tycodec` classifies every model type once, builds a specialized
//! encode/decode [`Processor`](codec::registry::Processor) for it and caches
//! the result in a process-wide [`ProcessorRegistry`](codec::registry::ProcessorRegistry).
//!
//! ```
//! use tycodec::codec::{self, derive::Model};
//!
//! #[derive(Model, Default, Debug, PartialEq)]
//! #[model(default)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User { id: 7, name: "ada".into(), tags: vec!["admin".into()] };
//! let bytes = codec::to_bytes(&user).unwrap();
//! assert_eq!(codec::from_bytes::<User>(&bytes).unwrap(), user);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use tc_codec as codec;
pub use tc_utils as utils;
