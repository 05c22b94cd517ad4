use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use parking_lot::RwLock;

use crate::error::{RankError, Result};
use crate::logging::{debug_log, warn_log};
use crate::raw::{RawRankTree, Side};
use crate::RankPolicy;

mod capacity;
mod order_statistic;

/// A thread-safe ranking of values, indexed by key.
///
/// Values are kept in the order given by a [`RankPolicy`] in a red-black tree
/// whose nodes also count their subtree sizes, so ranks can be looked up in
/// O(log n) in both directions. A hash index from key to node gives every
/// keyed operation an O(1) way into the tree.
///
/// All methods take `&self`. Queries share a read lock and run concurrently;
/// [`put`](Self::put) and [`remove`](Self::remove) take the write lock for
/// their whole duration. Values go in and come back out as copies made by
/// the policy, so neither side aliases tree storage.
///
/// Ranks are 1-based: the lowest value under the policy's order has rank 1.
///
/// # Updating scores
///
/// Putting a new value for a key that is already present does not delete
/// and reinsert. The values between the old and new position are shifted
/// one slot along the in-order sequence, and the tree's shape and colors are
/// left alone. Small score changes, the common case for a live leaderboard,
/// therefore touch only a handful of nodes. A value that jumps across the
/// whole ranking costs O(n).
///
/// # Examples
///
/// ```
/// use rank_tree::{OrdPolicy, RankTree};
///
/// // (score, player): ties on score are broken by player id.
/// let board = RankTree::new(OrdPolicy::new(|e: &(u32, u32)| e.1));
///
/// board.put(1, (10, 1))?;
/// board.put(2, (20, 2))?;
/// board.put(3, (5, 3))?;
///
/// assert_eq!(board.get_rank(&1), Some(2));
/// assert_eq!(board.rank_in(1)?, Some(3));
///
/// // Player 1 overtakes player 2.
/// board.put(1, (25, 1))?;
/// assert_eq!(board.get_rank(&1), Some(3));
/// assert_eq!(board.rank_range(1, 4)?, [(5, 3), (20, 2), (25, 1)]);
/// # Ok::<(), rank_tree::RankError>(())
/// ```
pub struct RankTree<K, V, P> {
    raw: RwLock<RawRankTree<K, V>>,
    policy: P,
}

impl<K, V, P> RankTree<K, V, P> {
    /// Creates an empty tree ordered and keyed by `policy`.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self {
            raw: RwLock::new(RawRankTree::new()),
            policy,
        }
    }

    /// Returns the policy the tree was built with.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.read().len() == 0
    }

    /// Removes every entry. Allocated capacity is kept.
    pub fn clear(&self) {
        self.raw.write().clear();
        debug_log!("cleared");
    }
}

impl<K, V, P> RankTree<K, V, P>
where
    K: Hash + Eq,
    P: RankPolicy<K, V>,
{
    /// Returns a copy of the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(1) plus the cost of one copy.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let raw = self.raw.read();
        raw.get(key).map(|value| self.policy.copy(value))
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.read().handle_of(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaces.
    ///
    /// The tree stores a [`copy`](RankPolicy::copy) of `value`, made before the
    /// lock is taken. A new key is inserted as a leaf and the tree rebalanced.
    /// An existing key is repositioned in place; see the
    /// [type docs](Self#updating-scores).
    ///
    /// # Errors
    ///
    /// - [`RankError::KeyMismatch`] if the policy extracts a key from `value`
    ///   other than `key`.
    /// - [`RankError::TiedValues`] if `value` compares equal to the value of
    ///   a different key.
    ///
    /// The tree is unchanged when an error is returned.
    ///
    /// # Complexity
    ///
    /// O(log n) for a new key; O(1 + d) for an update that moves the entry
    /// by `d` ranks. Both add the cost of one copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_tree::{OrdPolicy, RankError, RankTree};
    ///
    /// let board = RankTree::new(OrdPolicy::new(|e: &(u32, char)| e.1));
    ///
    /// assert_eq!(board.put('a', (10, 'a')), Ok(None));
    /// assert_eq!(board.put('a', (12, 'a')), Ok(Some((10, 'a'))));
    /// assert_eq!(board.put('b', (1, 'c')), Err(RankError::KeyMismatch));
    /// ```
    pub fn put(&self, key: K, value: V) -> Result<Option<V>> {
        if self.policy.key_of(&value) != key {
            warn_log!(error = %RankError::KeyMismatch, "rejected put");
            return Err(RankError::KeyMismatch);
        }

        // Stored values must not share state with anything the caller holds.
        let value = self.policy.copy(&value);

        let mut raw = self.raw.write();
        let result = raw.put(&self.policy, key, value);
        #[cfg(feature = "tracing")]
        if let Err(error) = &result {
            warn_log!(%error, "rejected put");
        }
        result
    }

    /// Removes `key`, returning its value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.write().remove(&self.policy, key)
    }

    /// Returns a copy of the rank 1 value.
    pub fn first(&self) -> Option<V> {
        let raw = self.raw.read();
        raw.extreme(Side::Left).map(|h| self.policy.copy(raw.value(h)))
    }

    /// Returns a copy of the highest ranked value.
    pub fn last(&self) -> Option<V> {
        let raw = self.raw.read();
        raw.extreme(Side::Right).map(|h| self.policy.copy(raw.value(h)))
    }

    /// Returns copies of every value in rank order.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn to_vec(&self) -> Vec<V> {
        let raw = self.raw.read();
        raw.iter().map(|value| self.policy.copy(value)).collect()
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.raw.read().assert_invariants(&self.policy);
    }
}

impl<K, V, P: Default> Default for RankTree<K, V, P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

/// Formats entries in rank order as `key: value`.
impl<K, V, P> fmt::Debug for RankTree<K, V, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: RankPolicy<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw.read();
        f.debug_map().entries(raw.iter().map(|value| (self.policy.key_of(value), value))).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrdPolicy;
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    type Entry = (i64, u32);
    type Policy = OrdPolicy<Entry, fn(&Entry) -> u32>;

    assert_impl_all!(RankTree<u32, Entry, Policy>: Send, Sync);

    fn board() -> RankTree<u32, Entry, Policy> {
        let key_of: fn(&Entry) -> u32 = |e| e.1;
        RankTree::new(OrdPolicy::new(key_of))
    }

    #[test]
    fn key_mismatch_is_rejected_before_locking() {
        let tree = board();
        assert_eq!(tree.put(1, (10, 2)), Err(RankError::KeyMismatch));
        assert!(tree.is_empty());
    }

    #[test]
    fn first_last_and_to_vec() {
        let tree = board();
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);

        for (key, score) in [(1, 30), (2, 10), (3, 20)] {
            tree.put(key, (score, key)).unwrap();
        }

        assert_eq!(tree.first(), Some((10, 2)));
        assert_eq!(tree.last(), Some((30, 1)));
        assert_eq!(tree.to_vec(), [(10, 2), (20, 3), (30, 1)]);
    }

    #[test]
    fn debug_lists_entries_in_rank_order() {
        let tree = board();
        tree.put(7, (2, 7)).unwrap();
        tree.put(3, (1, 3)).unwrap();

        assert_eq!(format!("{tree:?}"), "{3: (1, 3), 7: (2, 7)}");
    }

    #[test]
    fn clear_empties_the_tree() {
        let tree = board();
        for key in 0..10 {
            tree.put(key, (i64::from(key), key)).unwrap();
        }

        tree.clear();
        tree.assert_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.get(&3), None);
        assert!(!tree.contains_key(&3));

        tree.put(3, (1, 3)).unwrap();
        assert_eq!(tree.get_rank(&3), Some(1));
    }
}
