//! chained-map: a fixed-bucket, separately-chained hash table whose clones
//! never alias their source.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table where "deep copy" is a checked property rather than
//!   an accident of the type's fields.
//! - Layers:
//!   - `entry`: `Entry<K, V>` nodes and the owned `Link` chain pointer, plus
//!     the per-bucket iterators. Chains drop iteratively.
//!   - `deep_copy`: the two chain duplication algorithms and the
//!     `CloneStrategy` that picks between them.
//!   - `ChainedMap<K, V, S>`: bucket array, hasher, insert/lookup, and
//!     whole-table cloning.
//!   - `ChainedMapBuilder`: construction-time configuration.
//!
//! Constraints
//! - The bucket count is chosen at construction (default 10) and never
//!   changes: no resize, no rehash, no removal.
//! - `bucket = hash(key) % bucket_count`, with the hash produced by the
//!   table's `S: BuildHasher` over the caller's `K: Hash`. Key equality is
//!   the caller's `K: Eq`; an inconsistent `Hash`/`Eq` is a contract
//!   violation and is not detected.
//! - Insert on an existing key replaces the value in place; otherwise the new
//!   entry is prepended to its bucket's chain.
//!
//! Cloning
//! - Every node is exclusively owned by its predecessor (or its bucket), so a
//!   clone must allocate every node afresh. `Clone` is implemented by hand
//!   and runs the iterative algorithm: copy the head, then advance a cursor
//!   over the copy in lockstep with the source, appending a fresh duplicate of
//!   each successor. Constant stack.
//! - The recursive algorithm (duplicate the tail, then build the node on top)
//!   is available through `CloneStrategy::Recursive { max_depth }`. It needs
//!   one stack frame per link, so every chain is measured first and the clone
//!   is refused with `CloneError::ChainTooDeep` when any is longer than
//!   `max_depth`.
//! - Both algorithms produce bucket-for-bucket, node-for-node identical
//!   layouts.
//!
//! Drop
//! - Compiler-generated drop of a `Box` chain recurses once per node. `Entry`
//!   unlinks its successors in a loop instead, so dropping a long chain is as
//!   stack-safe as cloning it.
//!
//! Concurrency
//! - No interior mutability. `insert` takes `&mut self` and cloning takes
//!   `&self`, so a clone can never observe a chain mid-mutation. The table is
//!   `Send`/`Sync` exactly when `K`, `V`, and `S` are.
//!
//! Logging
//! - `tracing` events only; the crate never installs a subscriber. Clones log
//!   at `debug`, inserts at `trace`.

mod builder;
mod chained_map;
mod chained_map_proptest;
mod deep_copy;
mod entry;
mod error;

// Public surface
pub use builder::{ChainedMapBuilder, DEFAULT_BUCKET_COUNT};
pub use chained_map::{ChainedMap, Iter, IterMut};
pub use deep_copy::{CloneStrategy, DEFAULT_RECURSION_LIMIT};
pub use entry::{Chain, ChainMut};
pub use error::{BuildError, CloneError};
