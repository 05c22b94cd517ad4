use core::borrow::Borrow;
use core::cmp::Ordering;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::mem;
use std::collections::HashMap;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use crate::RankPolicy;
use crate::error::{RankError, Result};
use crate::logging::{debug_log, trace_log};

/// The single-threaded engine behind `RankTree`.
///
/// Nodes live in an arena and link to each other by [`Handle`]. The key
/// index maps every live key to the handle of the node currently holding its
/// value. Rotations never move values between nodes; repositioning and
/// two-child deletion do, and they repoint the index as they go.
pub(crate) struct RawRankTree<K, V> {
    /// Arena storing all tree nodes.
    pub(super) nodes: Arena<Node<V>>,
    /// Key to node association, one entry per live key.
    pub(super) index: HashMap<K, Handle>,
    /// Handle to the root node, if the tree is non-empty.
    pub(super) root: Option<Handle>,
}

impl<K, V> RawRankTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new() -> Self {
        Self {
            nodes: Arena::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries in the tree.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().min(self.index.capacity())
    }

    /// Drops every entry, keeping allocations.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.root = None;
    }

    #[inline]
    pub(super) fn size_of(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.nodes.get(h).size)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &V {
        &self.nodes.get(handle).value
    }

    /// Returns the handle holding rank `rank` (1-based), or `None` when
    /// `rank` is 0 or past the end.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        loop {
            let node = self.nodes.get(current);
            let here = self.size_of(node.left) + 1;
            match remaining.cmp(&here) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = node.left?,
                Ordering::Greater => {
                    remaining -= here;
                    current = node.right?;
                }
            }
        }
    }

    /// The in-order neighbor of `node` towards `side`: `Side::Right` is the
    /// successor, `Side::Left` the predecessor.
    pub(crate) fn neighbor(&self, node: Handle, side: Side) -> Option<Handle> {
        if let Some(mut current) = self.nodes.get(node).child(side) {
            while let Some(next) = self.nodes.get(current).child(!side) {
                current = next;
            }
            return Some(current);
        }

        let mut child = node;
        let mut parent = self.nodes.get(node).parent;
        while let Some(p) = parent {
            if self.nodes.get(p).child(side) != Some(child) {
                break;
            }
            child = p;
            parent = self.nodes.get(p).parent;
        }
        parent
    }

    /// The lowest (`Side::Left`) or highest (`Side::Right`) ranked node.
    pub(crate) fn extreme(&self, side: Side) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(next) = self.nodes.get(current).child(side) {
            current = next;
        }
        Some(current)
    }

    /// Iterates over at most `count` values in rank order, starting at `start`.
    pub(crate) fn iter_from(&self, start: Option<Handle>, count: usize) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            next: start,
            remaining: if start.is_some() { count } else { 0 },
        }
    }

    /// Iterates over every value in rank order.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        self.iter_from(self.extreme(Side::Left), self.len())
    }

    fn grow_ancestors(&mut self, mut node: Option<Handle>) {
        while let Some(h) = node {
            let n = self.nodes.get_mut(h);
            n.size += 1;
            node = n.parent;
        }
    }

    fn shrink_ancestors(&mut self, mut node: Option<Handle>) {
        while let Some(h) = node {
            let n = self.nodes.get_mut(h);
            n.size -= 1;
            node = n.parent;
        }
    }
}

impl<K: Hash + Eq, V> RawRankTree<K, V> {
    /// Looks up the node holding `key`'s value.
    #[inline]
    pub(crate) fn handle_of<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key).copied()
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.handle_of(key).map(|h| self.value(h))
    }

    /// Returns the 1-based rank of `key`.
    ///
    /// Starts from the key's own node and climbs to the root, adding the
    /// left subtree plus the parent itself every time the climb leaves a
    /// right child.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut node = self.handle_of(key)?;
        let mut rank = self.size_of(self.nodes.get(node).left) + 1;

        while let Some(parent) = self.nodes.get(node).parent {
            let p = self.nodes.get(parent);
            if p.right == Some(node) {
                rank += self.size_of(p.left) + 1;
            }
            node = parent;
        }

        Some(rank)
    }

    /// Inserts or updates `key`.
    ///
    /// Returns the value previously stored under `key`.
    pub(crate) fn put<P>(&mut self, policy: &P, key: K, value: V) -> Result<Option<V>>
    where
        P: RankPolicy<K, V>,
    {
        match self.handle_of(&key) {
            Some(node) => self.reposition(policy, node, key, value).map(Some),
            None => self.insert(policy, key, value).map(|_| None),
        }
    }

    /// Links `value` in as a new leaf and rebalances.
    fn insert<P>(&mut self, policy: &P, key: K, value: V) -> Result<Handle>
    where
        P: RankPolicy<K, V>,
    {
        let Some(mut parent) = self.root else {
            let root = self.nodes.alloc(Node::leaf(value, None));
            self.root = Some(root);
            self.index.insert(key, root);
            debug_log!("inserted first entry");
            return Ok(root);
        };

        let side = loop {
            let node = self.nodes.get(parent);
            let side = match policy.compare(&value, &node.value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(RankError::TiedValues),
            };
            match node.child(side) {
                Some(child) => parent = child,
                None => break side,
            }
        };

        let node = self.nodes.alloc(Node::leaf(value, Some(parent)));
        self.nodes.get_mut(parent).set_child(side, Some(node));
        self.grow_ancestors(Some(parent));
        self.fix_after_insert(node);
        self.index.insert(key, node);

        debug_log!(len = self.len(), "inserted entry");
        Ok(node)
    }

    /// Moves `key`'s value from `start` to wherever `value` now belongs by
    /// shifting the values in between one slot back towards `start`.
    ///
    /// Tree shape and colors are untouched, so the cost is proportional to
    /// how many ranks the entry moves. The walk is planned before anything is
    /// written, which keeps a tie from leaving the tree half-shifted.
    fn reposition<P>(&mut self, policy: &P, start: Handle, key: K, value: V) -> Result<V>
    where
        P: RankPolicy<K, V>,
    {
        let direction = policy.compare(&value, self.value(start));
        let forward = match direction {
            Ordering::Equal => {
                trace_log!("overwrite in place");
                return Ok(mem::replace(&mut self.nodes.get_mut(start).value, value));
            }
            Ordering::Greater => Side::Right,
            Ordering::Less => Side::Left,
        };

        let mut dest = start;
        let mut shifts = 0_usize;
        while let Some(next) = self.neighbor(dest, forward) {
            match policy.compare(&value, self.value(next)) {
                Ordering::Equal => return Err(RankError::TiedValues),
                ordering if ordering == direction => {
                    dest = next;
                    shifts += 1;
                }
                _ => break,
            }
        }

        let mut carry = mem::replace(&mut self.nodes.get_mut(dest).value, value);
        self.index.insert(key, dest);

        let mut slot = dest;
        for _ in 0..shifts {
            slot = self
                .neighbor(slot, !forward)
                .expect("`RawRankTree::reposition()` - walk ran off the tree!");
            let moved_key = policy.key_of(&carry);
            carry = mem::replace(&mut self.nodes.get_mut(slot).value, carry);
            self.index.insert(moved_key, slot);
        }

        debug_log!(shifts, "repositioned entry");
        Ok(carry)
    }

    /// Removes `key` and returns its value.
    pub(crate) fn remove<Q, P>(&mut self, policy: &P, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        P: RankPolicy<K, V>,
    {
        let mut target = self.index.remove(key)?;

        // Two children: take over the successor's value and unlink the
        // successor instead. It has no left child.
        let node = self.nodes.get(target);
        if node.left.is_some() && node.right.is_some() {
            let successor = self
                .neighbor(target, Side::Right)
                .expect("`RawRankTree::remove()` - internal node without successor!");
            let (internal, leaf) = self.nodes.pair_mut(target, successor);
            mem::swap(&mut internal.value, &mut leaf.value);
            let moved_key = policy.key_of(&internal.value);
            self.index.insert(moved_key, target);
            target = successor;
        }

        self.unlink(target);
        let removed = self.nodes.take(target);
        debug_log!(len = self.len(), "removed entry");
        Some(removed.value)
    }
}

impl<K, V> RawRankTree<K, V> {
    /// Detaches `node`, which has at most one child, and rebalances.
    ///
    /// The slot itself stays allocated; the caller frees it.
    fn unlink(&mut self, node: Handle) {
        let n = self.nodes.get(node);
        let parent = n.parent;
        let color = n.color;
        debug_assert!(n.left.is_none() || n.right.is_none());

        if let Some(child) = n.left.or(n.right) {
            self.nodes.get_mut(child).parent = parent;
            self.replace_in_parent(parent, node, Some(child));
            self.shrink_ancestors(parent);

            let n = self.nodes.get_mut(node);
            n.left = None;
            n.right = None;
            n.parent = None;

            if color == Color::Black {
                self.fix_after_delete(child);
            }
        } else if parent.is_none() {
            self.root = None;
        } else {
            // Leaf: let it stand in for the empty slot during fix-up, then
            // cut it loose from wherever the rotations left it.
            if color == Color::Black {
                self.fix_after_delete(node);
            }

            if let Some(parent) = self.nodes.get(node).parent {
                self.shrink_ancestors(Some(parent));
                self.replace_in_parent(Some(parent), node, None);
                self.nodes.get_mut(node).parent = None;
            }
        }
    }
}

/// Iterator over values in rank order.
pub(crate) struct Iter<'a, K, V> {
    tree: &'a RawRankTree<K, V>,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.tree.neighbor(current, Side::Right);
        Some(self.tree.value(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Hash + Eq, V> RawRankTree<K, V> {
    /// Panics with a description of the first broken invariant found.
    ///
    /// Checks ordering, subtree sizes, parent links, the red-black rules and
    /// that every index entry points at the node holding its key's value.
    pub(crate) fn assert_invariants<P>(&self, policy: &P)
    where
        P: RankPolicy<K, V>,
    {
        assert_eq!(self.nodes.len(), self.index.len(), "node count differs from index size");

        let Some(root) = self.root else {
            assert!(self.index.is_empty(), "empty tree with a non-empty index");
            return;
        };
        assert!(self.nodes.get(root).parent.is_none(), "root has a parent");
        assert_eq!(self.nodes.get(root).color, Color::Black, "root is red");

        let (size, _) = self.check_subtree(root);
        assert_eq!(size, self.len(), "root size differs from entry count");

        let mut previous: Option<&V> = None;
        let mut walked = 0;
        for value in self.iter() {
            if let Some(previous) = previous {
                assert_eq!(policy.compare(previous, value), Ordering::Less, "in-order walk is not strictly ascending");
            }
            previous = Some(value);
            walked += 1;
        }
        assert_eq!(walked, self.len(), "in-order walk length differs from entry count");

        for (key, &handle) in &self.index {
            assert!(policy.key_of(self.value(handle)) == *key, "index entry points at another key's value");
        }
    }

    /// Returns `(size, black_height)` of the subtree at `node`.
    fn check_subtree(&self, node: Handle) -> (usize, usize) {
        let n = self.nodes.get(node);
        let mut sizes = [0; 2];
        let mut heights = [1; 2];

        for (i, child) in [n.left, n.right].into_iter().enumerate() {
            let Some(child) = child else { continue };
            let c = self.nodes.get(child);
            assert_eq!(c.parent, Some(node), "child's parent link is wrong");
            assert!(
                !(n.color == Color::Red && c.color == Color::Red),
                "red node has a red child"
            );
            (sizes[i], heights[i]) = self.check_subtree(child);
        }

        assert_eq!(heights[0], heights[1], "black heights differ between subtrees");
        assert_eq!(n.size, sizes[0] + sizes[1] + 1, "size counter is stale");
        (n.size, heights[0] + usize::from(n.color == Color::Black))
    }
}
