/// Construction-time settings for a [`RankTree`](crate::RankTree).
///
/// # Examples
///
/// ```
/// use rank_tree::{OrdPolicy, RankTree, RankTreeConfig};
///
/// let config = RankTreeConfig::default().with_initial_capacity(1024);
/// let policy = OrdPolicy::<(u64, u32), _>::new(|v: &(u64, u32)| v.1);
/// let tree = RankTree::with_config(policy, config);
///
/// assert!(tree.capacity() >= 1024);
/// tree.put(3, (40, 3))?;
/// # Ok::<(), rank_tree::RankError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RankTreeConfig {
    /// Number of entries to reserve room for in the node store and key index.
    pub initial_capacity: usize,
}

impl RankTreeConfig {
    /// Sets [`initial_capacity`](Self::initial_capacity).
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
