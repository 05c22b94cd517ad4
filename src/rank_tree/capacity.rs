use parking_lot::RwLock;

use super::RankTree;
use crate::RankTreeConfig;
use crate::raw::RawRankTree;

impl<K, V, P> RankTree<K, V, P> {
    /// Creates an empty tree with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{OrdPolicy, RankTree};
    ///
    /// let policy = OrdPolicy::<(u64, u32), _>::new(|e: &(u64, u32)| e.1);
    /// let tree = RankTree::with_capacity(policy, 32);
    ///
    /// tree.put(7, (10, 7))?;
    /// assert_eq!(tree.get_rank(&7), Some(1));
    /// assert!(tree.capacity() >= 32);
    /// # Ok::<(), rank_tree::RankError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(policy: P, capacity: usize) -> Self {
        Self {
            raw: RwLock::new(RawRankTree::with_capacity(capacity)),
            policy,
        }
    }

    /// Creates an empty tree from a [`RankTreeConfig`].
    #[must_use]
    pub fn with_config(policy: P, config: RankTreeConfig) -> Self {
        Self::with_capacity(policy, config.initial_capacity)
    }

    /// Returns how many entries fit before the node store or key index
    /// reallocates.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.read().capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrdPolicy;
    use pretty_assertions::assert_eq;

    type Entry = (u64, u32);

    fn key_of(e: &Entry) -> u32 {
        e.1
    }

    #[test]
    fn with_capacity_reserves_room() {
        let tree = RankTree::with_capacity(OrdPolicy::new(key_of), 100);
        assert!(tree.is_empty());
        assert!(tree.capacity() >= 100);

        for id in 0..100 {
            tree.put(id, (u64::from(id) * 3, id)).unwrap();
        }
        tree.assert_invariants();
        assert!(tree.capacity() >= 100);
        assert_eq!(tree.rank_size(), 100);
        assert_eq!(tree.get_rank(&99), Some(100));
    }

    #[test]
    fn with_config_uses_initial_capacity() {
        let config = RankTreeConfig::default().with_initial_capacity(64);
        let tree = RankTree::with_config(OrdPolicy::new(key_of), config);
        assert!(tree.capacity() >= 64);

        tree.put(5, (1, 5)).unwrap();
        tree.put(6, (0, 6)).unwrap();
        assert_eq!(tree.rank_in(1), Ok(Some(6)));
    }

    #[test]
    fn default_config_starts_unallocated() {
        let tree = RankTree::with_config(OrdPolicy::new(key_of), RankTreeConfig::default());
        assert_eq!(tree.capacity(), 0);

        tree.put(1, (1, 1)).unwrap();
        assert!(tree.capacity() >= 1);
    }
}
