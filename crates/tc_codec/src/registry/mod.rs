//! The per-type processor cache.
//!
//! - [`ProcessorRegistry`]: classifies each type once and publishes its processor.
//! - [`Processor`]: the serialize/deserialize pair of one concrete type.

// -----------------------------------------------------------------------------
// Modules

mod lazy;
mod processor;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use processor::Processor;
pub use type_registry::ProcessorRegistry;

pub(crate) use lazy::LazyProcessor;
pub(crate) use type_registry::WeakRegistry;
