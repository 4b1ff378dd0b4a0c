use core::any::TypeId;
use core::fmt::Debug;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::hash::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A specialized map container with [`TypeId`] as the fixed key type.
///
/// `TypeId` is already a well distributed hash, so the map uses
/// [`NoOpHashState`] and never runs a real hasher.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use tc_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.get_or_insert(TypeId::of::<u32>(), || "u32");
///
/// assert_eq!(map.get_type::<u32>(), Some(&"u32"));
/// assert_eq!(map.get_type::<u64>(), None);
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Gets a mutable reference to the value associated with the given key,
    /// inserting the result of `f` if the key is not present.
    ///
    /// The closure `f` is only called if the key is not present.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns a reference to the value corresponding to the type.
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns a reference to the value corresponding to the type.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An iterator visiting all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T> Default for TypeIdMap<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for TypeIdMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}
