//! Red-black rebalancing.
//!
//! Each procedure is written once for a generic [`Side`]; the mirror case
//! is the same code with `side` flipped. Missing children read as black
//! with size 0 through the `*_of` accessors, so no sentinel node is needed.

use super::handle::Handle;
use super::node::{Color, Side};
use super::raw_rank_tree::RawRankTree;
use crate::logging::trace_log;

impl<K, V> RawRankTree<K, V> {
    #[inline]
    pub(super) fn color_of(&self, node: Option<Handle>) -> Color {
        node.map_or(Color::Black, |h| self.nodes.get(h).color)
    }

    #[inline]
    pub(super) fn set_color(&mut self, node: Option<Handle>, color: Color) {
        if let Some(h) = node {
            self.nodes.get_mut(h).color = color;
        }
    }

    #[inline]
    pub(super) fn parent_of(&self, node: Handle) -> Option<Handle> {
        self.nodes.get(node).parent
    }

    #[inline]
    pub(super) fn child_of(&self, node: Option<Handle>, side: Side) -> Option<Handle> {
        node.and_then(|h| self.nodes.get(h).child(side))
    }

    /// Which side of its parent `node` hangs from. Roots report `Right`.
    #[inline]
    pub(super) fn side_of(&self, node: Handle) -> Side {
        match self.parent_of(node) {
            Some(parent) if self.nodes.get(parent).left == Some(node) => Side::Left,
            _ => Side::Right,
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root)
    /// at `new` instead. Does not touch `new`'s parent link.
    pub(super) fn replace_in_parent(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = self.nodes.get_mut(p);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// Rotates `pivot` down towards `side`, lifting its opposite child.
    ///
    /// `rotate(p, Side::Left)` is the classic left rotation. Only the two
    /// nodes whose children change get their sizes rederived.
    pub(super) fn rotate(&mut self, pivot: Handle, side: Side) {
        let Some(lifted) = self.nodes.get(pivot).child(!side) else {
            panic!("`RawRankTree::rotate()` - no child to lift on the {:?} side!", !side);
        };
        trace_log!(?side, "rotate");

        let inner = self.nodes.get(lifted).child(side);
        self.nodes.get_mut(pivot).set_child(!side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).parent = Some(pivot);
        }

        let grandparent = self.parent_of(pivot);
        self.nodes.get_mut(lifted).parent = grandparent;
        self.replace_in_parent(grandparent, pivot, Some(lifted));

        self.nodes.get_mut(lifted).set_child(side, Some(pivot));
        self.nodes.get_mut(pivot).parent = Some(lifted);

        self.nodes.get_mut(lifted).size = self.nodes.get(pivot).size;
        let node = self.nodes.get(pivot);
        let size = self.size_of(node.left) + self.size_of(node.right) + 1;
        self.nodes.get_mut(pivot).size = size;
    }

    /// Restores the red-black rules after `node` was linked in as a leaf.
    pub(super) fn fix_after_insert(&mut self, mut node: Handle) {
        self.nodes.get_mut(node).color = Color::Red;

        while let Some(parent) = self.parent_of(node).filter(|&p| self.color_of(Some(p)) == Color::Red) {
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.parent_of(parent) else {
                break;
            };
            let side = self.side_of(parent);
            let uncle = self.nodes.get(grandparent).child(!side);

            if self.color_of(uncle) == Color::Red {
                trace_log!("insert fix-up: red uncle, recolor");
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            if self.side_of(node) != side {
                trace_log!("insert fix-up: inner child, rotate parent");
                node = parent;
                self.rotate(node, side);
            }

            trace_log!("insert fix-up: outer child, rotate grandparent");
            let parent = self.parent_of(node);
            let grandparent = parent.and_then(|p| self.parent_of(p));
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            if let Some(grandparent) = grandparent {
                self.rotate(grandparent, !side);
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Restores the red-black rules after a black node was removed from
    /// above `node`, which now carries an extra black.
    ///
    /// `node` may still be linked in as a phantom: the leaf about to be
    /// unlinked stands in for its own empty slot.
    pub(super) fn fix_after_delete(&mut self, mut node: Handle) {
        while Some(node) != self.root && self.color_of(Some(node)) == Color::Black {
            let Some(parent) = self.parent_of(node) else {
                break;
            };
            let side = self.side_of(node);
            let mut sibling = self.nodes.get(parent).child(!side);

            if self.color_of(sibling) == Color::Red {
                trace_log!("delete fix-up: red sibling, rotate parent");
                self.set_color(sibling, Color::Black);
                self.set_color(Some(parent), Color::Red);
                self.rotate(parent, side);
                sibling = self.child_of(self.parent_of(node), !side);
            }

            let near = self.child_of(sibling, side);
            let far = self.child_of(sibling, !side);
            if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                trace_log!("delete fix-up: black nephews, push extra black up");
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if self.color_of(far) == Color::Black {
                trace_log!("delete fix-up: red near nephew, rotate sibling");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                if let Some(s) = sibling {
                    self.rotate(s, !side);
                }
                sibling = self.child_of(self.parent_of(node), !side);
            }

            trace_log!("delete fix-up: red far nephew, rotate parent");
            let parent = self.parent_of(node);
            let parent_color = self.color_of(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far = self.child_of(sibling, !side);
            self.set_color(far, Color::Black);
            if let Some(parent) = parent {
                self.rotate(parent, side);
            }
            match self.root {
                Some(root) => node = root,
                None => break,
            }
        }

        self.set_color(Some(node), Color::Black);
    }
}
