//! Hash utilities backed by ahash
//!
//! Provides ahash-based sets and maps for the de-duplication passes of the
//! parser (speakers, UI elements) where document order is kept separately.

use ahash::RandomState;
use std::collections::{HashMap, HashSet};

/// Create a new `HashMap` with the ahash hasher
#[must_use]
pub fn create_hash_map<K, V>() -> HashMap<K, V, RandomState> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashSet` with the ahash hasher
#[must_use]
pub fn create_hash_set<T>() -> HashSet<T, RandomState> {
    HashSet::with_hasher(RandomState::new())
}

/// Collect distinct items while keeping first-seen order
///
/// # Example
///
/// ```rust
/// use beat_core::utils::hashers::distinct_in_order;
///
/// let items = distinct_in_order(["a", "b", "a", "c"]);
/// assert_eq!(items, vec!["a", "b", "c"]);
/// ```
pub fn distinct_in_order<T, I>(items: I) -> Vec<T>
where
    T: core::hash::Hash + Eq + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = create_hash_set();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
