//! Entry nodes and the owned, singly-linked chains built from them.
//!
//! A bucket is a [`Link`]: either empty or the head of a chain whose nodes
//! each exclusively own the rest of the chain. There is no sharing between
//! nodes, so a chain is dropped, cloned, or walked through plain ownership.

use core::borrow::Borrow;
use core::iter::FusedIterator;

/// Owned pointer to the rest of a chain; `None` terminates it.
pub(crate) type Link<K, V> = Option<Box<Entry<K, V>>>;

/// One key/value association in a bucket chain.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) next: Link<K, V>,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn boxed(key: K, value: V, next: Link<K, V>) -> Box<Self> {
        Box::new(Entry { key, value, next })
    }
}

impl<K, V> Drop for Entry<K, V> {
    fn drop(&mut self) {
        // Detach successors one at a time; each node is dropped with an empty
        // `next`, so teardown never recurses along the chain.
        let mut cur = self.next.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

/// Number of entries in a chain.
pub(crate) fn chain_len<K, V>(link: &Link<K, V>) -> usize {
    Chain::new(link).count()
}

/// First entry in the chain whose key equals `q`.
pub(crate) fn find_in<'a, K, V, Q>(link: &'a Link<K, V>, q: &Q) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        if node.key.borrow() == q {
            return Some(node);
        }
        cur = node.next.as_deref();
    }
    None
}

/// Mutable variant of [`find_in`].
pub(crate) fn find_in_mut<'a, K, V, Q>(
    link: &'a mut Link<K, V>,
    q: &Q,
) -> Option<&'a mut Entry<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    let mut cur = link.as_deref_mut();
    while let Some(node) = cur {
        if node.key.borrow() == q {
            return Some(node);
        }
        cur = node.next.as_deref_mut();
    }
    None
}

/// Iterator over the entries of a single bucket, head to tail.
pub struct Chain<'a, K, V> {
    next: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> Chain<'a, K, V> {
    pub(crate) fn new(link: &'a Link<K, V>) -> Self {
        Chain {
            next: link.as_deref(),
        }
    }

    pub(crate) fn empty() -> Self {
        Chain { next: None }
    }
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (&node.key, &node.value)
        })
    }
}

impl<K, V> FusedIterator for Chain<'_, K, V> {}

impl<K, V> Clone for Chain<'_, K, V> {
    fn clone(&self) -> Self {
        Chain { next: self.next }
    }
}

/// Iterator over the entries of a single bucket with mutable values.
pub struct ChainMut<'a, K, V> {
    next: Option<&'a mut Entry<K, V>>,
}

impl<'a, K, V> ChainMut<'a, K, V> {
    pub(crate) fn new(link: &'a mut Link<K, V>) -> Self {
        ChainMut {
            next: link.as_deref_mut(),
        }
    }

    pub(crate) fn empty() -> Self {
        ChainMut { next: None }
    }
}

impl<'a, K, V> Iterator for ChainMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            (&node.key, &mut node.value)
        })
    }
}

impl<K, V> FusedIterator for ChainMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn chain_of(pairs: &[(&'static str, i32)]) -> Link<&'static str, i32> {
        let mut head: Link<&'static str, i32> = None;
        for &(k, v) in pairs.iter().rev() {
            head = Some(Entry::boxed(k, v, head));
        }
        head
    }

    /// Invariant: `Chain` yields entries head to tail and `chain_len` agrees.
    #[test]
    fn chain_walks_head_to_tail() {
        let link = chain_of(&[("x", 1), ("y", 2), ("z", 3)]);
        let seen: Vec<_> = Chain::new(&link).map(|(k, v)| (*k, *v)).collect();
        assert_eq!(seen, vec![("x", 1), ("y", 2), ("z", 3)]);
        assert_eq!(chain_len(&link), 3);
        assert_eq!(chain_len::<&str, i32>(&None), 0);
    }

    /// Invariant: lookup returns the first matching node; misses return `None`.
    #[test]
    fn find_in_matches_by_key_equality() {
        let mut link = chain_of(&[("x", 1), ("y", 2)]);
        assert_eq!(find_in(&link, &"y").map(|e| e.value), Some(2));
        assert!(find_in(&link, &"q").is_none());

        find_in_mut(&mut link, &"x").unwrap().value = 10;
        let seen: Vec<_> = Chain::new(&link).map(|(_, v)| *v).collect();
        assert_eq!(seen, vec![10, 2]);
    }

    /// Invariant: `ChainMut` updates are visible in later reads.
    #[test]
    fn chain_mut_updates_values() {
        let mut link = chain_of(&[("x", 1), ("y", 2)]);
        for (_, v) in ChainMut::new(&mut link) {
            *v *= 10;
        }
        let seen: Vec<_> = Chain::new(&link).map(|(_, v)| *v).collect();
        assert_eq!(seen, vec![10, 20]);
    }

    /// Invariant: dropping a chain drops every value exactly once.
    #[test]
    fn drop_releases_every_node() {
        struct Tracked(Rc<Cell<usize>>);
        impl Drop for Tracked {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut head: Link<u32, Tracked> = None;
        for i in 0..50 {
            head = Some(Entry::boxed(i, Tracked(drops.clone()), head));
        }
        drop(head);
        assert_eq!(drops.get(), 50);
    }

    /// Invariant: a chain far longer than any sane recursion depth drops
    /// without exhausting a small thread stack.
    #[test]
    fn long_chain_drops_iteratively() {
        let handle = std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(|| {
                let mut head: Link<u32, u32> = None;
                for i in 0..200_000 {
                    head = Some(Entry::boxed(i, i, head));
                }
                drop(head);
            })
            .unwrap();
        handle.join().unwrap();
    }
}
