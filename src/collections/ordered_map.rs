use std::{cmp::Ordering, fmt::Debug, mem};

use proptest::{collection::vec, prelude::*};
use tracing::{debug, trace};

use super::{
    iter::{IntoIter, Iter, Keys, Values},
    node::{drop_iteratively, height, Link, Node},
    print,
};
use crate::prelude::*;

/// An ordered map stored as a plain binary search tree.
///
/// Every node caches the height of its subtree, which makes [`height`](Self::height) O(1)
/// and lets [`is_balanced`](Self::is_balanced) report on the shape. The tree never
/// rotates: inserting keys in ascending order degenerates it into a chain, and the
/// balance check will say so.
///
/// Equality is structural. Two maps holding the same entries compare unequal when the
/// entries were inserted in orders that produced different shapes.
///
/// ```
/// use ordtree::prelude::*;
///
/// let mut map = OrderedMap::new();
/// map.insert(50, "Apple");
/// map.insert(30, "Banana");
/// map.insert(70, "Cherry");
///
/// assert_eq!(map.search(&30), Some(&"Banana"));
/// assert_eq!(map.height(), 2);
/// assert!(map.is_balanced());
///
/// map.delete(&50);
/// assert_eq!(map.root_key(), Some(&70));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct OrderedMap<K, V> {
    pub(crate) root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree: `0` when empty, `1` for a single entry. O(1).
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Checks every node, not only the root, for a height difference of at most one
    /// between its subtrees. An empty map is balanced.
    pub fn is_balanced(&self) -> bool {
        let mut stack: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            if !node.is_locally_balanced() {
                return false;
            }

            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        true
    }

    pub fn root_key(&self) -> Option<&K> {
        self.root.as_ref().map(|node| &node.key)
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root
            .as_deref()
            .map(Node::min)
            .map(|node| (&node.key, &node.value))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root
            .as_deref()
            .map(Node::max)
            .map(|node| (&node.key, &node.value))
    }

    pub fn clear(&mut self) {
        drop_iteratively(self.root.take());
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    pub fn render(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        print::render(&self.root)
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts `value` under `key`, overwriting the value in place when the key is
    /// already present. Heights along the descent path are recomputed on the way back up.
    pub fn insert(&mut self, key: K, value: V) {
        if Self::insert_at(&mut self.root, key, value) {
            self.len += 1;
        }
    }

    fn insert_at(link: &mut Link<K, V>, key: K, value: V) -> bool {
        match link {
            None => {
                trace!("inserting new leaf");
                *link = Some(Node::leaf(key, value));
                true
            }
            Some(node) => {
                let inserted = match key.cmp(&node.key) {
                    Ordering::Less => Self::insert_at(&mut node.left, key, value),
                    Ordering::Greater => Self::insert_at(&mut node.right, key, value),
                    Ordering::Equal => {
                        trace!(height = node.height, "overwriting value in place");
                        node.value = value;
                        return false;
                    }
                };

                node.update_height();
                inserted
            }
        }
    }

    /// Looks up the value stored under `key`. A missing key is `None`, not an error.
    pub fn search(&self, key: &K) -> Option<&V> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }

        None
    }

    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut current = self.root.as_deref_mut();

        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            };
        }

        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Removes `key` if present; absent keys leave the tree untouched.
    pub fn delete(&mut self, key: &K) {
        self.remove(key);
    }

    /// Removes `key` and returns its value.
    ///
    /// A node with two children takes over the key and value of its in-order successor,
    /// the leftmost node of its right subtree, which is then unlinked in its place.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = Self::remove_at(&mut self.root, key);

        match removed {
            Some(_) => self.len -= 1,
            None => trace!("key not present, nothing to delete"),
        }

        removed
    }

    fn remove_at(link: &mut Link<K, V>, key: &K) -> Option<V> {
        let node = link.as_mut()?;

        let removed = match key.cmp(&node.key) {
            Ordering::Less => Self::remove_at(&mut node.left, key),
            Ordering::Greater => Self::remove_at(&mut node.right, key),
            Ordering::Equal => return Self::unlink(link),
        };

        node.update_height();
        removed
    }

    fn unlink(link: &mut Link<K, V>) -> Option<V> {
        let mut node = link.take()?;

        match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                let (right, key, value) = Self::split_min(right);
                debug!(height = node.height, "promoting in-order successor");

                node.key = key;
                node.left = Some(left);
                node.right = right;
                node.update_height();

                let removed = mem::replace(&mut node.value, value);
                *link = Some(node);
                Some(removed)
            }
            (left, right) => {
                *link = left.or(right);
                Some(node.value)
            }
        }
    }

    /// Detaches the minimum entry of a subtree, returning what is left of the subtree.
    fn split_min(mut node: Box<Node<K, V>>) -> (Link<K, V>, K, V) {
        match node.left.take() {
            None => {
                let Node {
                    key, value, right, ..
                } = *node;
                (right, key, value)
            }
            Some(left) => {
                let (rest, key, value) = Self::split_min(left);
                node.left = rest;
                node.update_height();
                (Some(node), key, value)
            }
        }
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        drop_iteratively(self.root.take());
    }
}

impl<K, V> Shape for OrderedMap<K, V> {
    fn height(&self) -> usize {
        OrderedMap::height(self)
    }

    fn is_balanced(&self) -> bool {
        OrderedMap::is_balanced(self)
    }
}

impl<K: Ord, V> Validate for OrderedMap<K, V> {
    fn validate(&self) -> Result<()> {
        let mut stack: Vec<&Node<K, V>> = Vec::new();
        let mut current = self.root.as_deref();
        let mut previous: Option<&K> = None;
        let mut counted = 0;

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }

            let Some(node) = stack.pop() else {
                break;
            };

            let computed = 1 + height(&node.left).max(height(&node.right));
            if node.height != computed {
                return Err(Error::HeightMismatch {
                    cached: node.height,
                    computed,
                });
            }

            if previous.is_some_and(|previous| previous >= &node.key) {
                return Err(Error::OrderViolation);
            }

            previous = Some(&node.key);
            counted += 1;
            current = node.right.as_deref();
        }

        if counted != self.len {
            return Err(Error::LengthMismatch {
                cached: self.len,
                counted,
            });
        }

        Ok(())
    }
}

impl<K: Debug, V: Debug> Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::take(&mut self.len);
        IntoIter::new(self.root.take(), len)
    }
}

impl<K, V> Arbitrary for OrderedMap<K, V>
where
    K: 'static + Arbitrary + Ord,
    V: 'static + Arbitrary,
{
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        vec(any::<(K, V)>(), 0..32)
            .prop_map(|entries| entries.into_iter().collect())
            .boxed()
    }
}
