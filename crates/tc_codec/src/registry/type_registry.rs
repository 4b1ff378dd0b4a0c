use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use std::sync::{LazyLock, Mutex, OnceLock, PoisonError, RwLock};

use tc_utils::TypeIdMap;

use crate::CodecError;
use crate::codec::{self, Built};
use crate::info::{Model, TypeDescriptor};
use crate::registry::Processor;
use crate::stream::{ByteReader, ByteWriter};

// -----------------------------------------------------------------------------
// Slot

/// The descriptor and processor of one type, once built.
#[derive(Clone)]
struct Published {
    descriptor: Arc<TypeDescriptor>,
    processor: Arc<dyn Any + Send + Sync>,
}

/// The cache entry of one type.
///
/// `building` serializes first requests for this type only. `published` is
/// written once and read without locking afterwards.
struct Slot {
    published: OnceLock<Published>,
    building: Mutex<()>,
}

impl Slot {
    const fn new() -> Self {
        Self {
            published: OnceLock::new(),
            building: Mutex::new(()),
        }
    }
}

struct RegistryInner {
    slots: RwLock<TypeIdMap<Arc<Slot>>>,
}

// -----------------------------------------------------------------------------
// ProcessorRegistry

/// A cache of processors keyed by concrete type.
///
/// The first request for a type classifies it through [`Model::shape`],
/// builds its processor and publishes the result. Every later request
/// returns the same [`Arc`]. Concurrent first requests for one type build it
/// once; requests for unrelated types never wait for each other's builds.
///
/// Element and member processors are requested through the same registry
/// the first time they are needed, so a build never holds one type's build
/// lock while waiting on another's.
///
/// A failed build is not cached: the next request rebuilds and fails again.
///
/// Cloning a registry yields a handle to the same cache.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tc_codec::registry::ProcessorRegistry;
///
/// let registry = ProcessorRegistry::new();
/// let first = registry.processor::<Vec<String>>().unwrap();
/// let again = registry.processor::<Vec<String>>().unwrap();
///
/// assert!(Arc::ptr_eq(&first, &again));
/// assert_eq!(registry.len(), 1);
///
/// // The element type `String` is published on first use.
/// registry.to_bytes(&vec![String::from("a")]).unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone)]
pub struct ProcessorRegistry {
    inner: Arc<RegistryInner>,
}

/// A non-owning handle to a registry, held by lazily resolved members.
#[derive(Clone)]
pub(crate) struct WeakRegistry(Weak<RegistryInner>);

impl WeakRegistry {
    #[inline]
    pub(crate) fn upgrade(&self) -> Option<ProcessorRegistry> {
        self.0.upgrade().map(|inner| ProcessorRegistry { inner })
    }
}

impl ProcessorRegistry {
    /// Creates an empty registry, independent of [`global`](Self::global).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                slots: RwLock::new(TypeIdMap::new()),
            }),
        }
    }

    /// Returns the process-wide registry used by the crate-level functions.
    pub fn global() -> &'static ProcessorRegistry {
        static GLOBAL: LazyLock<ProcessorRegistry> = LazyLock::new(ProcessorRegistry::new);
        &GLOBAL
    }

    /// Returns the processor of `T`, building it on first request.
    pub fn processor<T: Model>(&self) -> Result<Arc<Processor<T>>, CodecError> {
        self.resolve::<T>().map(|(_, processor)| processor)
    }

    /// Returns the classification of `T`, building its processor on first
    /// request.
    pub fn descriptor<T: Model>(&self) -> Result<Arc<TypeDescriptor>, CodecError> {
        self.publish::<T>().map(|published| published.descriptor)
    }

    /// Returns `true` if the processor of `T` has been published.
    pub fn contains<T: Model>(&self) -> bool {
        self.read_slots()
            .get_type::<T>()
            .is_some_and(|slot| slot.published.get().is_some())
    }

    /// Returns the number of published processors.
    pub fn len(&self) -> usize {
        self.read_slots()
            .values()
            .filter(|slot| slot.published.get().is_some())
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Front end

    /// Encodes `value` into a new buffer.
    pub fn to_bytes<T: Model>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut writer = ByteWriter::new();
        self.serialize_into(value, &mut writer)?;
        Ok(writer.into_vec())
    }

    /// Decodes a `T` occupying the whole of `bytes`.
    ///
    /// Fails with [`CodecError::TrailingBytes`] if bytes remain after the
    /// value.
    pub fn from_bytes<T: Model>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let mut reader = ByteReader::new(bytes);
        let value = self.deserialize_from(&mut reader)?;
        match reader.remaining() {
            0 => Ok(value),
            remaining => Err(CodecError::TrailingBytes { remaining }),
        }
    }

    /// Appends the encoding of `value` to `writer`.
    pub fn serialize_into<T: Model>(&self, value: &T, writer: &mut ByteWriter) -> Result<(), CodecError> {
        self.processor::<T>()?.serialize(value, writer)
    }

    /// Decodes the next `T` from `reader`.
    pub fn deserialize_from<T: Model>(&self, reader: &mut ByteReader<'_>) -> Result<T, CodecError> {
        self.processor::<T>()?.deserialize(reader)
    }

    // -------------------------------------------------------------------------
    // Internal

    #[inline]
    pub(crate) fn downgrade(&self) -> WeakRegistry {
        WeakRegistry(Arc::downgrade(&self.inner))
    }

    /// Returns the published descriptor and processor of `T`.
    pub(crate) fn resolve<T: Model>(
        &self,
    ) -> Result<(Arc<TypeDescriptor>, Arc<Processor<T>>), CodecError> {
        let Published {
            descriptor,
            processor,
        } = self.publish::<T>()?;
        match processor.downcast::<Processor<T>>() {
            Ok(processor) => Ok((descriptor, processor)),
            Err(_) => unreachable!("the slot of `{}` holds another type", type_name::<T>()),
        }
    }

    fn read_slots(&self) -> std::sync::RwLockReadGuard<'_, TypeIdMap<Arc<Slot>>> {
        self.inner.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, type_id: TypeId) -> Arc<Slot> {
        if let Some(slot) = self.read_slots().get(&type_id) {
            return Arc::clone(slot);
        }

        let mut slots = self.inner.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.get_or_insert(type_id, || Arc::new(Slot::new())))
    }

    fn publish<T: Model>(&self) -> Result<Published, CodecError> {
        let slot = self.slot(TypeId::of::<T>());
        if let Some(published) = slot.published.get() {
            return Ok(published.clone());
        }

        let _building = slot.building.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(published) = slot.published.get() {
            return Ok(published.clone());
        }

        match codec::build::<T>(self) {
            Ok(Built {
                descriptor,
                processor,
            }) => {
                log::debug!(
                    "published processor of `{}` ({})",
                    descriptor.type_name(),
                    descriptor.kind(),
                );
                let published = Published {
                    descriptor: Arc::new(descriptor),
                    processor: Arc::new(processor),
                };
                Ok(slot.published.get_or_init(|| published).clone())
            }
            Err(error) => {
                log::debug!("failed to build processor of `{}`: {error}", type_name::<T>());
                Err(error)
            }
        }
    }
}

impl Default for ProcessorRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;
    use std::sync::{Barrier, mpsc};
    use std::thread;

    use super::ProcessorRegistry;
    use crate::codec::Sequence;
    use crate::info::{CompositeInfo, CompositeLayout, MemberInfo, Model, ShapeKind, TypeShape};
    use crate::stream::ByteWriter;
    use crate::{CodecError, ErrorKind};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Pair {
        left: u32,
        right: String,
    }

    impl Model for Pair {
        fn shape() -> TypeShape<Self> {
            let members = [
                MemberInfo::<Self>::new::<u32>("left", |p| &p.left, |p, v| p.left = v),
                MemberInfo::<Self>::new::<String>("right", |p| &p.right, |p, v| p.right = v),
            ];
            TypeShape::Composite(
                CompositeInfo::new(CompositeLayout::Reference, members).with_construct(Pair::default),
            )
        }
    }

    /// Hand-written list shape whose element type is itself.
    #[derive(Debug, PartialEq)]
    struct SelfList(Vec<SelfList>);

    impl Sequence for SelfList {
        type Item = SelfList;

        fn item_count(&self) -> usize {
            self.0.len()
        }

        fn items(&self) -> impl Iterator<Item = &Self::Item> {
            self.0.iter()
        }

        fn from_items(items: Vec<Self::Item>) -> Self {
            SelfList(items)
        }
    }

    impl Model for SelfList {
        fn shape() -> TypeShape<Self> {
            TypeShape::list()
        }
    }

    /// Two list shapes of each other, slow to classify so that concurrent
    /// first requests overlap.
    #[derive(Debug, PartialEq)]
    struct Even(Vec<Odd>);

    #[derive(Debug, PartialEq)]
    struct Odd(Vec<Even>);

    macro_rules! slow_list {
        ($name:ident, $item:ident) => {
            impl Sequence for $name {
                type Item = $item;

                fn item_count(&self) -> usize {
                    self.0.len()
                }

                fn items(&self) -> impl Iterator<Item = &Self::Item> {
                    self.0.iter()
                }

                fn from_items(items: Vec<Self::Item>) -> Self {
                    $name(items)
                }
            }

            impl Model for $name {
                fn shape() -> TypeShape<Self> {
                    thread::sleep(Duration::from_millis(100));
                    TypeShape::list()
                }
            }
        };
    }

    slow_list!(Even, Odd);
    slow_list!(Odd, Even);

    /// Composite without a construction path.
    struct NoConstruct {
        value: u8,
    }

    impl Model for NoConstruct {
        fn shape() -> TypeShape<Self> {
            let members = [MemberInfo::<Self>::new::<u8>("value", |n| &n.value, |n, v| n.value = v)];
            TypeShape::Composite(CompositeInfo::new(CompositeLayout::Reference, members))
        }
    }

    #[test]
    fn repeated_requests_share_one_processor() {
        let registry = ProcessorRegistry::new();
        assert!(registry.is_empty());

        let first = registry.processor::<Pair>().unwrap();
        let second = registry.processor::<Pair>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.contains::<Pair>());
        // Members are resolved on first use, not at build time.
        assert!(!registry.contains::<String>());
        assert_eq!(registry.len(), 1);

        let descriptor = registry.descriptor::<Pair>().unwrap();
        assert_eq!(descriptor.kind(), ShapeKind::Composite);
        assert_eq!(descriptor.layout(), Some(CompositeLayout::Reference));
        let names: Vec<_> = descriptor.members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["left", "right"]);
        assert!(descriptor.member("right").unwrap().ty().is::<String>());
    }

    #[test]
    fn registries_are_isolated() {
        let a = ProcessorRegistry::new();
        let b = ProcessorRegistry::new();
        let from_a = a.processor::<u64>().unwrap();
        let from_b = b.processor::<u64>().unwrap();

        assert!(!Arc::ptr_eq(&from_a, &from_b));
        assert!(a.clone().contains::<u64>());
        assert!(!b.contains::<u32>());
    }

    #[test]
    fn concurrent_first_requests_build_once() {
        const THREADS: usize = 8;

        let registry = ProcessorRegistry::new();
        let barrier = Arc::new(Barrier::new(THREADS));
        let value = Pair {
            left: 7,
            right: String::from("seven"),
        };

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = registry.clone();
                let barrier = Arc::clone(&barrier);
                let value = value.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let processor = registry.processor::<Vec<Pair>>().unwrap();
                    let bytes = registry.to_bytes(&vec![value]).unwrap();
                    (processor, bytes)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let (first, bytes) = &results[0];
        for (processor, other) in &results[1..] {
            assert!(Arc::ptr_eq(first, processor));
            assert_eq!(bytes, other);
        }
        assert_eq!(registry.from_bytes::<Vec<Pair>>(bytes).unwrap(), vec![value]);
    }

    #[test]
    fn self_containing_sequences_build() {
        let registry = ProcessorRegistry::new();
        let value = SelfList(vec![SelfList(vec![]), SelfList(vec![SelfList(vec![])])]);

        let bytes = registry.to_bytes(&value).unwrap();
        assert_eq!(bytes, [2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(registry.from_bytes::<SelfList>(&bytes).unwrap(), value);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn mutually_recursive_first_requests_do_not_block() {
        let registry = ProcessorRegistry::new();
        let barrier = Arc::new(Barrier::new(2));
        let (done, finished) = mpsc::channel();

        let even = {
            let (registry, barrier, done) = (registry.clone(), Arc::clone(&barrier), done.clone());
            thread::spawn(move || {
                barrier.wait();
                let value = Even(vec![Odd(vec![Even(vec![])])]);
                let bytes = registry.to_bytes(&value).unwrap();
                assert_eq!(registry.from_bytes::<Even>(&bytes).unwrap(), value);
                done.send("even").unwrap();
            })
        };
        let odd = {
            let (registry, barrier) = (registry.clone(), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                let value = Odd(vec![Even(vec![]), Even(vec![Odd(vec![])])]);
                let bytes = registry.to_bytes(&value).unwrap();
                assert_eq!(registry.from_bytes::<Odd>(&bytes).unwrap(), value);
                done.send("odd").unwrap();
            })
        };

        for _ in 0..2 {
            finished
                .recv_timeout(Duration::from_secs(10))
                .expect("a first request never completed");
        }
        even.join().unwrap();
        odd.join().unwrap();
        assert!(registry.contains::<Even>() && registry.contains::<Odd>());
    }

    #[test]
    fn failed_builds_are_not_cached() {
        let registry = ProcessorRegistry::new();
        let first = registry.processor::<NoConstruct>().unwrap_err();
        let second = registry.processor::<Box<NoConstruct>>().unwrap_err();

        assert_eq!(first, second);
        assert_eq!(first.kind(), ErrorKind::Construction);
        assert!(registry.is_empty());
    }

    #[test]
    fn members_need_their_registry() {
        let registry = ProcessorRegistry::new();
        let processor = registry.processor::<Pair>().unwrap();
        drop(registry);

        let mut writer = ByteWriter::new();
        assert_eq!(
            processor.serialize(&Pair::default(), &mut writer),
            Err(CodecError::RegistryDropped)
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let registry = ProcessorRegistry::new();
        assert_eq!(
            registry.from_bytes::<u16>(&[1, 0, 9]),
            Err(CodecError::TrailingBytes { remaining: 1 })
        );
        assert_eq!(registry.from_bytes::<u16>(&[1, 0]), Ok(1));
    }
}
