pub use crate::{
    collections::*, error::*, prop_assert_changes, prop_assert_does_not_change,
    test_ordered_map_properties,
};

/// Structural queries shared by tree-shaped containers.
pub trait Shape {
    /// Number of nodes on the longest root-to-leaf path, `0` when empty.
    fn height(&self) -> usize;

    /// Whether every node's subtrees differ in height by at most one.
    ///
    /// This is a report on the current shape, nothing enforces it.
    fn is_balanced(&self) -> bool;
}

pub trait Validate {
    /// Walks the whole structure and returns the first broken invariant, if any.
    fn validate(&self) -> Result<()>;
}
