mod iter;
mod node;
mod ordered_map;
mod print;

pub(crate) use node::Link;

pub use {
    iter::{IntoIter, Iter, Keys, Values},
    ordered_map::OrderedMap,
};
