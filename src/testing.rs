use std::{collections::BTreeMap, fmt::Debug};

use itertools::Itertools;
use proptest::{
    collection::{btree_set, vec},
    prelude::*,
    sample::SizeRange,
};

use crate::{collections::OrderedMap, collections::Link};

/// A single mutation, replayable against an [`OrderedMap`] and a `BTreeMap` model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op<K, V> {
    Insert(K, V),
    Delete(K),
}

impl<K: Ord, V: Clone> Op<K, V> {
    /// Applies the operation, returning the value it displaced, if any.
    pub fn apply(self, map: &mut OrderedMap<K, V>) -> Option<V> {
        match self {
            Op::Insert(key, value) => {
                let previous = map.search(&key).cloned();
                map.insert(key, value);
                previous
            }
            Op::Delete(key) => map.remove(&key),
        }
    }

    pub fn apply_model(self, model: &mut BTreeMap<K, V>) -> Option<V> {
        match self {
            Op::Insert(key, value) => model.insert(key, value),
            Op::Delete(key) => model.remove(&key),
        }
    }
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: 'static + Arbitrary,
    V: 'static + Arbitrary,
{
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            2 => any::<(K, V)>().prop_map(|(key, value)| Op::Insert(key, value)),
            1 => any::<K>().prop_map(Op::Delete),
        ]
        .boxed()
    }
}

/// Operation scripts drawing keys from `keys`. Narrow key strategies give plenty of
/// overwrites and hits on delete.
pub fn ops<K, V>(
    keys: impl Strategy<Value = K> + Clone,
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = Vec<Op<K, V>>>
where
    K: Debug + Clone,
    V: Arbitrary,
{
    vec(
        prop_oneof![
            2 => (keys.clone(), any::<V>()).prop_map(|(key, value)| Op::Insert(key, value)),
            1 => keys.prop_map(Op::Delete),
        ],
        size,
    )
}

/// Generates distinct keys in ascending order.
pub fn ascending_keys<K>(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<K>>
where
    K: Arbitrary + Ord,
{
    btree_set(any::<K>(), size).prop_map(|keys| keys.into_iter().collect_vec())
}

/// Generates distinct keys in random order.
pub fn shuffled_keys<K>(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<K>>
where
    K: Arbitrary + Ord + Clone,
{
    ascending_keys(size).prop_shuffle()
}

/// Height computed from scratch, ignoring every cached value.
pub fn naive_height<K, V>(map: &OrderedMap<K, V>) -> usize {
    subtree_height(&map.root)
}

/// Balance computed from scratch, ignoring every cached value.
pub fn naive_is_balanced<K, V>(map: &OrderedMap<K, V>) -> bool {
    subtree_is_balanced(&map.root)
}

fn subtree_height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| {
        1 + subtree_height(&node.left).max(subtree_height(&node.right))
    })
}

fn subtree_is_balanced<K, V>(link: &Link<K, V>) -> bool {
    let Some(node) = link else {
        return true;
    };

    subtree_height(&node.left).abs_diff(subtree_height(&node.right)) <= 1
        && subtree_is_balanced(&node.left)
        && subtree_is_balanced(&node.right)
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest(fork = false)]
    fn test_ascending_keys_are_strictly_increasing(
        #[strategy(ascending_keys::<i32>(0..32))] keys: Vec<i32>,
    ) {
        prop_assert!(keys.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[proptest(fork = false)]
    fn test_shuffled_keys_are_distinct(#[strategy(shuffled_keys::<u8>(0..32))] keys: Vec<u8>) {
        prop_assert_eq!(keys.iter().unique().count(), keys.len());
    }

    #[proptest(fork = false)]
    fn test_ops_stay_within_key_range(#[strategy(ops(0u8..4, 0..32))] script: Vec<Op<u8, ()>>) {
        for op in script {
            let key = match op {
                Op::Insert(key, _) | Op::Delete(key) => key,
            };
            prop_assert!(key < 4);
        }
    }

    #[test]
    fn test_naive_measures_on_empty_map() {
        let map = OrderedMap::<u8, u8>::new();
        assert_eq!(naive_height(&map), 0);
        assert!(naive_is_balanced(&map));
    }
}
