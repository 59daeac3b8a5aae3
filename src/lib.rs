//! An ordered key-value map backed by an unbalanced binary search tree.
//!
//! [`OrderedMap`](collections::OrderedMap) keeps a cached height on every node and
//! reports whether its current shape is balanced, but never restructures itself.
//! The [`testing`] module and the macros exported here let downstream crates run the
//! same property suites against their own key and value types.

mod error;

pub mod collections;
pub mod prelude;
pub mod testing;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use itertools;
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

/// Stamps out a property suite for `OrderedMap<$key, $value>`.
///
/// Both types must implement `Arbitrary` and `Clone`, and the key must be `Ord`.
#[macro_export]
macro_rules! test_ordered_map_properties {
    ($key:ty, $value:ty) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_ordered_map_ $key:snake _ $value:snake>] {
                use $crate::__dependencies::{
                    itertools::Itertools,
                    proptest::prelude::*,
                    test_strategy,
                };
                use $crate::prelude::*;
                use $crate::testing::{naive_height, naive_is_balanced};

                type Map = OrderedMap<$key, $value>;

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_arbitrary_is_valid(map: Map) {
                    map.validate()?;
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_search_finds_inserted_value(mut map: Map, key: $key, value: $value) {
                    map.insert(key.clone(), value.clone());

                    prop_assert_eq!(map.search(&key), Some(&value));
                    prop_assert!(map.contains_key(&key));
                    map.validate()?;
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_overwrite_keeps_len_and_shape(
                    mut map: Map,
                    key: $key,
                    first: $value,
                    second: $value,
                ) {
                    map.insert(key.clone(), first);
                    let len = map.len();
                    let height = map.height();

                    map.insert(key.clone(), second.clone());

                    prop_assert_eq!(map.search(&key), Some(&second));
                    prop_assert_eq!(map.len(), len);
                    prop_assert_eq!(map.height(), height);
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_delete_removes_key(mut map: Map, key: $key, value: $value) {
                    map.insert(key.clone(), value);
                    let len = map.len();

                    map.delete(&key);

                    prop_assert_eq!(map.search(&key), None);
                    prop_assert_eq!(map.len(), len - 1);
                    map.validate()?;
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_delete_absent_key_changes_nothing(mut map: Map, key: $key) {
                    prop_assume!(!map.contains_key(&key));

                    $crate::prop_assert_does_not_change!(map.delete(&key), map);
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_keys_are_strictly_ascending(map: Map) {
                    prop_assert!(map.keys().tuple_windows().all(|(a, b)| a < b));
                    prop_assert_eq!(map.keys().count(), map.len());
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_cached_measures_match_recomputed(map: Map) {
                    prop_assert_eq!(map.height(), naive_height(&map));
                    prop_assert_eq!(map.is_balanced(), naive_is_balanced(&map));
                    prop_assert!(map.height() <= map.len());
                }
            }
        }
    };
}

#[macro_export]
macro_rules! prop_assert_changes {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        prop_assert_eq!($value, old_value);

        $action;

        prop_assert_ne!($value, old_value);
    };
}

#[macro_export]
macro_rules! prop_assert_does_not_change {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        $action;

        prop_assert_eq!($value, old_value);
    };
}
