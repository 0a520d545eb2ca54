//! Chain duplication: the two algorithms behind whole-table cloning.
//!
//! Both produce a chain with the same `(key, value)` sequence as the source,
//! built entirely from fresh allocations. They differ only in stack usage:
//!
//! - [`copy_chain_recursive`] duplicates the rest of the chain first and then
//!   builds the current node on top of it. One stack frame per link, so a
//!   chain of length `n` needs `O(n)` stack. Callers bound `n` before using it.
//! - [`copy_chain_iterative`] copies the head, then walks the source while a
//!   cursor appends a fresh copy of each successor to the output. `O(1)`
//!   extra stack, `O(n)` time.

use crate::entry::{Entry, Link};

/// Recursion budget used by [`CloneStrategy::recursive`].
pub const DEFAULT_RECURSION_LIMIT: usize = 4096;

/// How chains are duplicated when cloning a [`ChainedMap`](crate::ChainedMap).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CloneStrategy {
    /// Lockstep cursor walk. Constant stack; never fails.
    #[default]
    Iterative,
    /// Duplicate-the-tail-first recursion. Refuses any chain longer than
    /// `max_depth` instead of risking stack exhaustion.
    Recursive { max_depth: usize },
}

impl CloneStrategy {
    /// Recursive duplication bounded by [`DEFAULT_RECURSION_LIMIT`].
    pub const fn recursive() -> Self {
        CloneStrategy::Recursive {
            max_depth: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Longest chain this strategy accepts, if bounded.
    pub const fn max_depth(&self) -> Option<usize> {
        match *self {
            CloneStrategy::Iterative => None,
            CloneStrategy::Recursive { max_depth } => Some(max_depth),
        }
    }
}

/// Duplicate a chain by recursing to its tail first.
pub(crate) fn copy_chain_recursive<K, V>(node: &Entry<K, V>) -> Box<Entry<K, V>>
where
    K: Clone,
    V: Clone,
{
    let next = node.next.as_deref().map(copy_chain_recursive);
    Entry::boxed(node.key.clone(), node.value.clone(), next)
}

/// Duplicate a chain with a tail cursor; source and copy advance together.
pub(crate) fn copy_chain_iterative<K, V>(head: &Entry<K, V>) -> Box<Entry<K, V>>
where
    K: Clone,
    V: Clone,
{
    let mut result = Entry::boxed(head.key.clone(), head.value.clone(), None);
    let mut tail = &mut result.next;
    let mut src = head.next.as_deref();
    while let Some(node) = src {
        let copy = tail.insert(Entry::boxed(node.key.clone(), node.value.clone(), None));
        tail = &mut copy.next;
        src = node.next.as_deref();
    }
    result
}

/// Duplicate one bucket. Depth limits are enforced by the caller, which knows
/// the bucket index to report.
pub(crate) fn copy_link<K, V>(link: &Link<K, V>, strategy: CloneStrategy) -> Link<K, V>
where
    K: Clone,
    V: Clone,
{
    link.as_deref().map(|head| match strategy {
        CloneStrategy::Iterative => copy_chain_iterative(head),
        CloneStrategy::Recursive { .. } => copy_chain_recursive(head),
    })
}
