#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can inspect
// entry addresses when checking that clones share no nodes.

use crate::chained_map::ChainedMap;
use crate::deep_copy::CloneStrategy;
use hashbrown::{HashMap, HashSet};
use proptest::prelude::*;

type Layout = Vec<Vec<(String, i32)>>;

fn layout(m: &ChainedMap<String, i32>) -> Layout {
    (0..m.bucket_count())
        .map(|i| m.chain(i).map(|(k, v)| (k.clone(), *v)).collect())
        .collect()
}

fn contents(m: &ChainedMap<String, i32>) -> HashMap<String, i32> {
    m.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

fn addrs(m: &ChainedMap<String, i32>) -> HashSet<usize> {
    m.node_addrs().into_iter().collect()
}

// Small key pools and bucket counts force collisions and repeated keys.
fn arb_table() -> impl Strategy<Value = (usize, Vec<String>, Vec<(usize, i32)>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,4}", 1..=12)).prop_flat_map(
        |(buckets, pool)| {
            let n = pool.len();
            let ops = proptest::collection::vec((0..n, any::<i32>()), 0..80);
            (Just(buckets), Just(pool), ops)
        },
    )
}

fn build(
    buckets: usize,
    pool: &[String],
    ops: &[(usize, i32)],
) -> (ChainedMap<String, i32>, HashMap<String, i32>) {
    let mut sut = ChainedMap::with_buckets(buckets).unwrap();
    let mut model = HashMap::new();
    for &(i, v) in ops {
        let k = pool[i].clone();
        let prev_sut = sut.insert(k.clone(), v);
        let prev_model = model.insert(k, v);
        assert_eq!(prev_sut, prev_model);
    }
    (sut, model)
}

// Property: insert semantics match a reference map.
// - `insert` returns the displaced value exactly when the model does.
// - `len`, `get`, and `contains_key` agree with the model.
// - Chain lengths sum to `len`; no key appears twice.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_insert_matches_model((buckets, pool, ops) in arb_table()) {
        let (sut, model) = build(buckets, &pool, &ops);
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(contents(&sut), model.clone());
        let total: usize = (0..sut.bucket_count()).map(|i| sut.chain_len(i)).sum();
        prop_assert_eq!(total, sut.len());
        for k in &pool {
            prop_assert_eq!(sut.get(k), model.get(k));
            prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
        }
    }
}

// Property: cloning under either strategy.
// - Same bucket count and identical per-bucket chain order as the source.
// - Recursive and iterative copies are layout-identical.
// - No entry address is shared between any two of source, iterative copy,
//   and recursive copy.
// - Updating every key in the source leaves both copies at the snapshot, and
//   updating a copy leaves the source untouched.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_clone_is_deep_and_independent((buckets, pool, ops) in arb_table()) {
        let (mut sut, model) = build(buckets, &pool, &ops);
        let snapshot = layout(&sut);

        let mut it = sut.try_clone_with(CloneStrategy::Iterative).unwrap();
        let rec = sut.try_clone_with(CloneStrategy::recursive()).unwrap();

        prop_assert_eq!(it.bucket_count(), sut.bucket_count());
        prop_assert_eq!(layout(&it), snapshot.clone());
        prop_assert_eq!(layout(&rec), snapshot.clone());

        let (a, b, c) = (addrs(&sut), addrs(&it), addrs(&rec));
        prop_assert_eq!(a.len(), sut.len());
        prop_assert!(a.is_disjoint(&b));
        prop_assert!(a.is_disjoint(&c));
        prop_assert!(b.is_disjoint(&c));

        for (k, v) in &model {
            sut.insert(k.clone(), v.wrapping_add(1));
        }
        prop_assert_eq!(layout(&it), snapshot.clone());
        prop_assert_eq!(layout(&rec), snapshot.clone());

        for (_k, v) in it.iter_mut() {
            *v = v.wrapping_mul(3);
        }
        for (k, v) in &model {
            let bumped = v.wrapping_add(1);
            prop_assert_eq!(sut.get(k), Some(&bumped));
        }
        prop_assert_eq!(layout(&rec), snapshot);
    }
}

// Property: clone of a clone.
// - T3 = clone(clone(T)) is layout-identical to T.
// - T, T2, T3 pairwise share no entry.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_double_clone((buckets, pool, ops) in arb_table(), recursive_first in any::<bool>()) {
        let (t, _model) = build(buckets, &pool, &ops);
        let (first, second) = if recursive_first {
            (CloneStrategy::recursive(), CloneStrategy::Iterative)
        } else {
            (CloneStrategy::Iterative, CloneStrategy::recursive())
        };
        let t2 = t.try_clone_with(first).unwrap();
        let t3 = t2.try_clone_with(second).unwrap();

        prop_assert_eq!(layout(&t3), layout(&t));
        let (a, b, c) = (addrs(&t), addrs(&t2), addrs(&t3));
        prop_assert!(a.is_disjoint(&b));
        prop_assert!(a.is_disjoint(&c));
        prop_assert!(b.is_disjoint(&c));
    }
}
