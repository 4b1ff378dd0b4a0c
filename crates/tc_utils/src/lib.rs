//! Small shared utilities for the `tc_*` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId) that skips hashing.
//! - [`hash`]: the pass-through hasher backing it.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
