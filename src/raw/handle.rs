use core::num::NonZero;

// Narrow under test so the node store can be filled to its limit quickly.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Stable address of a node slot in the [`Arena`](super::arena::Arena).
///
/// Slot `n` is stored as `n + 1`, which leaves zero free as the niche for
/// `Option<Handle>`. A handle keeps naming the same node across rotations
/// and repositioning; only deletion retires it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Number of slots a node store can address.
    pub(crate) const SLOTS: usize = RawHandle::MAX as usize;

    /// Addresses `slot`.
    ///
    /// # Panics
    ///
    /// If `slot` is past the last addressable slot.
    #[inline]
    pub(crate) fn for_slot(slot: usize) -> Self {
        let raw = slot
            .checked_add(1)
            .and_then(|n| RawHandle::try_from(n).ok())
            .and_then(NonZero::new);
        match raw {
            Some(raw) => Self(raw),
            None => panic!("`Handle::for_slot()` - node store is full ({} slots)!", Self::SLOTS),
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        // Lossless: `RawHandle` is never wider than `usize` on supported targets.
        self.0.get() as usize - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Child and parent links are `Option<Handle>`.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);

    #[test]
    fn first_and_last_slots() {
        assert_eq!(Handle::for_slot(0).slot(), 0);
        assert_eq!(Handle::for_slot(Handle::SLOTS - 1).slot(), Handle::SLOTS - 1);
    }

    #[test]
    #[should_panic(expected = "`Handle::for_slot()` - node store is full")]
    fn slot_past_the_limit_panics() {
        let _ = Handle::for_slot(Handle::SLOTS);
    }

    #[test]
    #[should_panic(expected = "`Handle::for_slot()` - node store is full")]
    fn overflowing_slot_panics() {
        let _ = Handle::for_slot(usize::MAX);
    }

    proptest! {
        #[test]
        fn distinct_slots_get_distinct_handles(a in 0..Handle::SLOTS, b in 0..Handle::SLOTS) {
            prop_assert_eq!(Handle::for_slot(a) == Handle::for_slot(b), a == b);
            prop_assert_eq!(Handle::for_slot(a).slot(), a);
        }
    }
}
