use core::borrow::Borrow;
use core::hash::Hash;

use super::RankTree;
use crate::RankPolicy;
use crate::error::{RankError, Result};

impl<K, V, P> RankTree<K, V, P>
where
    K: Hash + Eq,
    P: RankPolicy<K, V>,
{
    /// Returns the 1-based rank of `key`, or `None` if it has no entry.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{OrdPolicy, RankTree};
    ///
    /// let board = RankTree::new(OrdPolicy::new(|e: &(u32, u8)| e.1));
    /// board.put(1, (300, 1)).unwrap();
    /// board.put(2, (100, 2)).unwrap();
    ///
    /// assert_eq!(board.get_rank(&2), Some(1));
    /// assert_eq!(board.get_rank(&1), Some(2));
    /// assert_eq!(board.get_rank(&9), None);
    /// ```
    #[must_use]
    pub fn get_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.read().rank_of(key)
    }

    /// Returns the number of ranked entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn rank_size(&self) -> usize {
        self.raw.read().len()
    }

    /// Returns the key holding rank `rank` (1-based), or `None` if fewer than
    /// `rank` entries exist.
    ///
    /// # Errors
    ///
    /// [`RankError::InvalidRank`] if `rank` is 0.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{OrdPolicy, RankError, RankTree};
    ///
    /// let board = RankTree::new(OrdPolicy::new(|e: &(u32, &'static str)| e.1));
    /// board.put("ana", (7, "ana")).unwrap();
    /// board.put("bo", (3, "bo")).unwrap();
    ///
    /// assert_eq!(board.rank_in(1), Ok(Some("bo")));
    /// assert_eq!(board.rank_in(3), Ok(None));
    /// assert_eq!(board.rank_in(0), Err(RankError::InvalidRank { rank: 0 }));
    /// ```
    pub fn rank_in(&self, rank: usize) -> Result<Option<K>> {
        if rank == 0 {
            return Err(RankError::InvalidRank { rank });
        }

        let raw = self.raw.read();
        Ok(raw.select(rank).map(|h| self.policy.key_of(raw.value(h))))
    }

    /// Returns copies of the values ranked `from..to` (1-based, end
    /// exclusive), in rank order.
    ///
    /// Bounds past the end are clamped: `from` to the entry count and `to`
    /// to one past it. A `from` of 0 reads as 1. If nothing is left after
    /// clamping the result is empty.
    ///
    /// # Errors
    ///
    /// [`RankError::InvalidRange`] if `from >= to`.
    ///
    /// # Complexity
    ///
    /// O(log n + k) for `k` returned values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{OrdPolicy, RankTree};
    ///
    /// let board = RankTree::new(OrdPolicy::new(|e: &(u32, u32)| e.1));
    /// for (player, score) in [(1, 10), (2, 20), (3, 5), (4, 15), (5, 25)] {
    ///     board.put(player, (score, player)).unwrap();
    /// }
    ///
    /// assert_eq!(board.rank_range(2, 4).unwrap(), [(10, 1), (15, 4)]);
    /// assert_eq!(board.rank_range(4, 100).unwrap(), [(20, 2), (25, 5)]);
    /// assert!(board.rank_range(3, 3).is_err());
    /// ```
    pub fn rank_range(&self, from: usize, to: usize) -> Result<Vec<V>> {
        if from >= to {
            return Err(RankError::InvalidRange { from, to });
        }

        let raw = self.raw.read();
        let len = raw.len();
        let to = to.min(len + 1);
        let from = from.min(len).max(1);
        if from >= to {
            return Ok(Vec::new());
        }

        let values = raw.iter_from(raw.select(from), to - from);
        Ok(values.map(|value| self.policy.copy(value)).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{OrdPolicy, RankError, RankTree};
    use pretty_assertions::assert_eq;

    type Entry = (u32, u32);

    fn scenario() -> RankTree<u32, Entry, OrdPolicy<Entry, fn(&Entry) -> u32>> {
        let key_of: fn(&Entry) -> u32 = |e| e.1;
        let tree = RankTree::new(OrdPolicy::new(key_of));
        for (key, score) in [(1, 10), (2, 20), (3, 25), (4, 15), (5, 5)] {
            tree.put(key, (score, key)).unwrap();
        }
        tree
    }

    #[test]
    fn rank_in_rejects_zero_and_misses_past_the_end() {
        let tree = scenario();
        assert_eq!(tree.rank_in(0), Err(RankError::InvalidRank { rank: 0 }));
        assert_eq!(tree.rank_in(tree.rank_size() + 1), Ok(None));
        assert_eq!(tree.rank_in(tree.rank_size()), Ok(Some(3)));
    }

    #[test]
    fn rank_range_clamps() {
        let tree = scenario();

        // `from` past the end is pulled back to the last rank.
        assert_eq!(tree.rank_range(9, 12), Ok(vec![(25, 3)]));
        assert_eq!(tree.rank_range(0, 2), Ok(vec![(5, 5)]));
        assert_eq!(tree.rank_range(1, usize::MAX).unwrap().len(), 5);
        assert_eq!(tree.rank_range(2, 1), Err(RankError::InvalidRange { from: 2, to: 1 }));
    }

    #[test]
    fn rank_range_on_empty_tree_is_empty() {
        let key_of: fn(&Entry) -> u32 = |e| e.1;
        let tree: RankTree<u32, Entry, _> = RankTree::new(OrdPolicy::new(key_of));
        assert_eq!(tree.rank_range(0, 1), Ok(vec![]));
        assert_eq!(tree.rank_range(1, 5), Ok(vec![]));
        assert_eq!(tree.rank_in(1), Ok(None));
    }
}
