//! Error types for construction and depth-limited cloning.

use thiserror::Error;

/// Construction failure for [`ChainedMap`](crate::ChainedMap).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum BuildError {
    /// The bucket array must hold at least one bucket; index computation is
    /// `hash % bucket_count`.
    #[error("bucket count must be at least 1")]
    ZeroBuckets,
}

/// Failure of a fallible clone strategy.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum CloneError {
    /// A chain is longer than the recursion budget of
    /// [`CloneStrategy::Recursive`](crate::CloneStrategy::Recursive).
    /// Nothing was allocated when this is returned.
    #[error("chain in bucket {bucket} has {len} entries, over the recursion limit of {max_depth}")]
    ChainTooDeep {
        bucket: usize,
        len: usize,
        max_depth: usize,
    },
}
