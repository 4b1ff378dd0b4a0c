use alloc::sync::Arc;
use std::sync::OnceLock;

use crate::CodecError;
use crate::info::Model;
use crate::registry::{Processor, WeakRegistry};

/// A processor requested from the registry on first use, then kept.
pub(crate) struct LazyProcessor<T> {
    registry: WeakRegistry,
    cell: OnceLock<Arc<Processor<T>>>,
}

impl<T: Model> LazyProcessor<T> {
    #[inline]
    pub(crate) const fn new(registry: WeakRegistry) -> Self {
        Self {
            registry,
            cell: OnceLock::new(),
        }
    }

    pub(crate) fn get(&self) -> Result<&Arc<Processor<T>>, CodecError> {
        if let Some(processor) = self.cell.get() {
            return Ok(processor);
        }

        let registry = self.registry.upgrade().ok_or(CodecError::RegistryDropped)?;
        let processor = registry.processor::<T>()?;
        Ok(self.cell.get_or_init(|| processor))
    }
}
