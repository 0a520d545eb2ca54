//! ChainedMap: fixed-bucket separate chaining with aliasing-free cloning.

use crate::builder::DEFAULT_BUCKET_COUNT;
use crate::deep_copy::{copy_link, CloneStrategy};
use crate::entry::{chain_len, find_in, find_in_mut, Chain, ChainMut, Entry, Link};
use crate::error::{BuildError, CloneError};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use std::collections::hash_map::RandomState;
use tracing::{debug, trace};

/// Hash table with a fixed number of buckets, each holding an owned chain of
/// entries.
///
/// The bucket count never changes after construction: there is no resize,
/// rehash, or removal. Cloning always yields a table that shares no entry
/// with its source; see [`try_clone_with`](Self::try_clone_with) for the
/// available duplication strategies.
pub struct ChainedMap<K, V, S = RandomState> {
    buckets: Box<[Link<K, V>]>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainedMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    pub fn with_buckets(bucket_count: usize) -> Result<Self, BuildError> {
        Self::with_buckets_and_hasher(bucket_count, RandomState::new())
    }
}

impl<K, V> Default for ChainedMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedMap<K, V, S> {
    fn empty(bucket_count: usize, hasher: S) -> Self {
        let buckets = core::iter::repeat_with(|| None).take(bucket_count).collect();
        Self {
            buckets,
            len: 0,
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets; fixed for the lifetime of the table.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Entries of bucket `index`, head first.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.bucket_count()`.
    pub fn chain(&self, index: usize) -> Chain<'_, K, V> {
        Chain::new(&self.buckets[index])
    }

    /// Length of the chain in bucket `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.bucket_count()`.
    pub fn chain_len(&self, index: usize) -> usize {
        chain_len(&self.buckets[index])
    }

    /// Visit every entry, bucket by bucket and head to tail within a bucket.
    /// The order is stable for a given table but is not otherwise specified.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Chain::empty(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: ChainMut::empty(),
            remaining: self.len,
        }
    }
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Empty table with [`DEFAULT_BUCKET_COUNT`] buckets and the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::empty(DEFAULT_BUCKET_COUNT, hasher)
    }

    pub fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> Result<Self, BuildError> {
        if bucket_count == 0 {
            return Err(BuildError::ZeroBuckets);
        }
        Ok(Self::empty(bucket_count, hasher))
    }

    /// Bucket that `q` hashes to: `hash(q) % bucket_count`.
    pub fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    /// Associate `value` with `key`.
    ///
    /// An existing entry for an equal key keeps its place in the chain and
    /// has its value replaced; the old value is returned. Otherwise a new
    /// entry is prepended to the bucket's chain.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some(entry) = find_in_mut(bucket, &key) {
            trace!(bucket = index, "insert replaced existing value");
            return Some(core::mem::replace(&mut entry.value, value));
        }
        let rest = bucket.take();
        *bucket = Some(Entry::boxed(key, value, rest));
        self.len += 1;
        trace!(bucket = index, len = self.len, "insert prepended entry");
        None
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        find_in(&self.buckets[index], q).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        find_in_mut(&mut self.buckets[index], q).map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        find_in(&self.buckets[index], q).is_some()
    }
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// Deep-copy the table with an explicit duplication strategy.
    ///
    /// The result has the same bucket count, hasher state, and per-bucket
    /// chain order as `self`, built from freshly allocated entries.
    /// [`CloneStrategy::Iterative`] always succeeds. [`CloneStrategy::Recursive`]
    /// uses one stack frame per chain link and therefore first checks every
    /// chain against its `max_depth`; if any is longer, it returns
    /// [`CloneError::ChainTooDeep`] without copying anything.
    pub fn try_clone_with(&self, strategy: CloneStrategy) -> Result<Self, CloneError> {
        if let Some(max_depth) = strategy.max_depth() {
            for (bucket, link) in self.buckets.iter().enumerate() {
                let len = chain_len(link);
                if len > max_depth {
                    debug!(bucket, len, max_depth, "chain too deep for recursive clone");
                    return Err(CloneError::ChainTooDeep {
                        bucket,
                        len,
                        max_depth,
                    });
                }
            }
        }
        Ok(self.clone_buckets(strategy))
    }

    /// Recursive deep copy bounded by
    /// [`DEFAULT_RECURSION_LIMIT`](crate::DEFAULT_RECURSION_LIMIT).
    pub fn clone_recursive(&self) -> Result<Self, CloneError> {
        self.try_clone_with(CloneStrategy::recursive())
    }

    fn clone_buckets(&self, strategy: CloneStrategy) -> Self {
        debug!(
            ?strategy,
            bucket_count = self.buckets.len(),
            len = self.len,
            "deep-copying table"
        );
        let buckets = self
            .buckets
            .iter()
            .map(|link| copy_link(link, strategy))
            .collect();
        Self {
            buckets,
            len: self.len,
            hasher: self.hasher.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn node_addrs(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len);
        for link in self.buckets.iter() {
            let mut cur = link.as_deref();
            while let Some(node) = cur {
                out.push(node as *const Entry<K, V> as usize);
                cur = node.next.as_deref();
            }
        }
        out
    }
}

/// Iterative deep copy; never shares an entry with `self`.
impl<K, V, S> Clone for ChainedMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        self.clone_buckets(CloneStrategy::Iterative)
    }
}

impl<K, V, S> fmt::Debug for ChainedMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over immutable entries in `ChainedMap`.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Link<K, V>>,
    chain: Chain<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                self.remaining -= 1;
                return Some(item);
            }
            self.chain = Chain::new(self.buckets.next()?);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over mutable entries in `ChainedMap`.
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Link<K, V>>,
    chain: ChainMut<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                self.remaining -= 1;
                return Some(item);
            }
            self.chain = ChainMut::new(self.buckets.next()?);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}
