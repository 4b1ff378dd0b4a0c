//! Provide [`NoOpHasher`], re-exports *hashbrown*.
//!
//! `NoOpHasher` directly uses the written `u64` as the hash value, which is
//! enough for keys that are already uniformly distributed such as `TypeId`.

use core::hash::{BuildHasher, Hasher};

pub use hashbrown;

// -----------------------------------------------------------------------------
// NoOpHasher

/// A no-op hash that directly pass value through `u64`.
///
/// Which can be created through [`NoOpHashState::build_hasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // `TypeId` may feed its bits through `write`, fold them in.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use tc_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 42_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hasher};

    use super::NoOpHashState;

    #[test]
    fn write_and_write_u64_agree_for_single_value() {
        let mut a = NoOpHashState.build_hasher();
        a.write_u64(0x1234);

        let mut b = NoOpHashState.build_hasher();
        b.write(&0x1234_u64.to_le_bytes());

        assert_eq!(a.finish(), b.finish());
    }
}
