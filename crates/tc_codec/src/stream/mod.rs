//! The byte sink and source the codecs read from and write to.
//!
//! - [`ByteWriter`]: growable sink, writes never fail.
//! - [`ByteReader`]: bounds-checked cursor over a byte slice, fails with
//!   [`CodecError::Underflow`](crate::CodecError::Underflow) instead of
//!   zero-filling.
//! - [`Fixed`]: values with a fixed-width little-endian representation.

// -----------------------------------------------------------------------------
// Modules

mod fixed;
mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use fixed::Fixed;
pub use reader::ByteReader;
pub use writer::ByteWriter;
