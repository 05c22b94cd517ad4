use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl core::ops::Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One ranked entry.
///
/// Links are arena handles: the parent owns both children, `parent` is a
/// back-reference. `size` counts the subtree rooted here, including this node.
pub(crate) struct Node<V> {
    pub(crate) value: V,
    pub(crate) size: usize,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<V> Node<V> {
    /// A fresh leaf. New nodes start black; insertion fix-up repaints them.
    pub(crate) fn leaf(value: V, parent: Option<Handle>) -> Self {
        Self {
            value,
            size: 1,
            color: Color::Black,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}
