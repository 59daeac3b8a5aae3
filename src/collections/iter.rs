use std::iter::FusedIterator;

use super::node::{drop_iteratively, Link, Node};

/// In-order iterator over the entries of an [`OrderedMap`](super::OrderedMap).
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root.as_deref());
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[derive(Debug, Clone)]
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

#[derive(Debug, Clone)]
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Owning in-order iterator, consumes the map node by node.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.descend_left(node.right.take());
        self.remaining -= 1;

        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            drop_iteratively(Some(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::{collection::btree_map, prelude::*};
    use test_strategy::proptest;

    use crate::prelude::*;

    #[proptest(fork = false)]
    fn test_iter_matches_btree_model(
        #[strategy(btree_map(any::<i16>(), any::<u8>(), 0..64))] model: std::collections::BTreeMap<i16, u8>,
    ) {
        let map: OrderedMap<_, _> = model.clone().into_iter().collect();

        prop_assert_eq!(map.iter().len(), model.len());
        prop_assert_eq!(map.iter().collect_vec(), model.iter().collect_vec());
        prop_assert_eq!(map.keys().collect_vec(), model.keys().collect_vec());
        prop_assert_eq!(map.values().collect_vec(), model.values().collect_vec());
        prop_assert_eq!(map.into_iter().collect_vec(), model.into_iter().collect_vec());
    }

    #[test]
    fn test_partially_consumed_into_iter_drops_the_rest() {
        let map: OrderedMap<u32, String> = (0..10).map(|k| (k, k.to_string())).collect();
        let mut iter = map.into_iter();

        assert_eq!(iter.next(), Some((0, "0".to_string())));
        assert_eq!(iter.next(), Some((1, "1".to_string())));
        assert_eq!(iter.len(), 8);
    }

    #[test]
    fn test_empty_map_yields_nothing() {
        let map = OrderedMap::<u8, u8>::new();
        assert_eq!(map.iter().next(), None);
        assert_eq!(map.keys().len(), 0);
    }
}
