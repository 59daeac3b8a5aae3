pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
    pub height: usize,
}

impl<K, V> Node<K, V> {
    pub fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Recomputes the cached height from the children's cached heights.
    pub fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    pub fn is_locally_balanced(&self) -> bool {
        height(&self.left).abs_diff(height(&self.right)) <= 1
    }

    /// Leftmost node of this subtree.
    pub fn min(&self) -> &Self {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current
    }

    /// Rightmost node of this subtree.
    pub fn max(&self) -> &Self {
        let mut current = self;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        current
    }
}

pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Releases a subtree without recursing, so degenerate chains of any depth can be dropped.
pub(crate) fn drop_iteratively<K, V>(link: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = link.into_iter().collect();

    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(keys: &[u32]) -> Box<Node<u32, ()>> {
        let mut iter = keys.iter().rev();
        let mut node = Node::leaf(*iter.next().unwrap(), ());

        for key in iter {
            let mut parent = Node::leaf(*key, ());
            parent.right = Some(node);
            parent.update_height();
            node = parent;
        }

        node
    }

    #[test]
    fn test_leaf_has_height_one() {
        let node = Node::leaf(1, "a");
        assert_eq!(node.height, 1);
        assert!(node.is_locally_balanced());
        assert_eq!(height(&None::<Box<Node<u8, u8>>>), 0);
    }

    #[test]
    fn test_update_height_follows_tallest_child() {
        let root = chain(&[1, 2, 3, 4]);
        assert_eq!(root.height, 4);
        assert!(!root.is_locally_balanced());
        assert_eq!(root.min().key, 1);
        assert_eq!(root.max().key, 4);
    }

    #[test]
    fn test_drop_iteratively_handles_deep_chains() {
        let mut root: Link<u32, ()> = None;

        for key in (0..200_000).rev() {
            let mut node = Node::leaf(key, ());
            node.right = root.take();
            root = Some(node);
        }

        drop_iteratively(root);
    }
}
