//! Construction-time configuration for [`ChainedMap`].

use crate::chained_map::ChainedMap;
use crate::error::BuildError;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Bucket count used by [`ChainedMap::new`] and an unconfigured builder.
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// Builder for a [`ChainedMap`]. The bucket count is fixed once built.
///
/// ```
/// use chained_map::ChainedMapBuilder;
///
/// let mut m = ChainedMapBuilder::new().bucket_count(3).build().unwrap();
/// m.insert("a", 1);
/// assert_eq!(m.bucket_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ChainedMapBuilder<S = RandomState> {
    bucket_count: usize,
    hasher: S,
}

impl Default for ChainedMapBuilder<RandomState> {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            hasher: RandomState::new(),
        }
    }
}

impl ChainedMapBuilder<RandomState> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: BuildHasher> ChainedMapBuilder<S> {
    /// Number of buckets. Zero is rejected by [`build`](Self::build).
    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Replace the hasher, keeping the configured bucket count.
    pub fn hasher<T: BuildHasher>(self, hasher: T) -> ChainedMapBuilder<T> {
        ChainedMapBuilder {
            bucket_count: self.bucket_count,
            hasher,
        }
    }

    pub fn build<K, V>(self) -> Result<ChainedMap<K, V, S>, BuildError>
    where
        K: Eq + Hash,
    {
        ChainedMap::with_buckets_and_hasher(self.bucket_count, self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasherDefault;
    use std::collections::hash_map::DefaultHasher;

    /// Invariant: an unconfigured builder matches `ChainedMap::new`.
    #[test]
    fn defaults_match_new() {
        let m: ChainedMap<String, i32> = ChainedMapBuilder::new().build().unwrap();
        assert_eq!(m.bucket_count(), DEFAULT_BUCKET_COUNT);
        assert!(m.is_empty());
    }

    /// Invariant: zero buckets is rejected; any positive count is honoured.
    #[test]
    fn bucket_count_is_validated() {
        let err = ChainedMapBuilder::new()
            .bucket_count(0)
            .build::<u8, u8>()
            .unwrap_err();
        assert_eq!(err, BuildError::ZeroBuckets);

        let m = ChainedMapBuilder::new()
            .bucket_count(1)
            .build::<u8, u8>()
            .unwrap();
        assert_eq!(m.bucket_count(), 1);
    }

    /// Invariant: switching the hasher keeps the bucket count set earlier.
    #[test]
    fn hasher_swap_keeps_bucket_count() {
        let m = ChainedMapBuilder::new()
            .bucket_count(7)
            .hasher(BuildHasherDefault::<DefaultHasher>::default())
            .build::<&str, i32>()
            .unwrap();
        assert_eq!(m.bucket_count(), 7);
    }
}
