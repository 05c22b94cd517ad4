use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

/// The three collaborators a [`RankTree`](crate::RankTree) needs from its
/// caller: an order over values, a way to pull the key out of a value, and a
/// way to copy a value.
///
/// Implementations must be pure. The tree calls them while holding its lock
/// and assumes the same inputs always give the same answer.
///
/// `compare` must never return [`Ordering::Equal`] for values that belong to
/// different keys. Scores are rarely unique, so the usual shape is "score,
/// then key":
///
/// ```
/// use core::cmp::Ordering;
/// use rank_tree::RankPolicy;
///
/// #[derive(Clone)]
/// struct Entry { user: u32, score: u64 }
///
/// struct ByScore;
///
/// impl RankPolicy<u32, Entry> for ByScore {
///     fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
///         a.score.cmp(&b.score).then(a.user.cmp(&b.user))
///     }
///
///     fn key_of(&self, value: &Entry) -> u32 {
///         value.user
///     }
///
///     fn copy(&self, value: &Entry) -> Entry {
///         value.clone()
///     }
/// }
/// ```
pub trait RankPolicy<K, V> {
    /// Total order over values. Lower values take lower (better) ranks.
    fn compare(&self, a: &V, b: &V) -> Ordering;

    /// Extracts the key a value is indexed under.
    fn key_of(&self, value: &V) -> K;

    /// Produces an independent copy of `value`.
    ///
    /// Applied to every value [`put`](crate::RankTree::put) stores, so the tree
    /// shares no state with the caller's value, and to every value handed
    /// back, so nothing returned aliases tree storage. Values holding shared
    /// handles such as `Arc` must copy what the handles point to.
    fn copy(&self, value: &V) -> V;
}

/// A [`RankPolicy`] assembled from three closures. Built by [`policy`].
pub struct FnPolicy<C, X, P> {
    compare: C,
    key_of: X,
    copy: P,
}

/// Builds a [`RankPolicy`] from a comparator, a key extractor and a copier.
///
/// # Examples
///
/// ```
/// use rank_tree::{policy, RankTree};
///
/// let tree = RankTree::new(policy(
///     |a: &(u32, i64), b: &(u32, i64)| a.1.cmp(&b.1).then(a.0.cmp(&b.0)),
///     |v: &(u32, i64)| v.0,
///     |v: &(u32, i64)| *v,
/// ));
///
/// tree.put(7, (7, 120)).unwrap();
/// assert_eq!(tree.get_rank(&7), Some(1));
/// ```
pub fn policy<K, V, C, X, P>(compare: C, key_of: X, copy: P) -> FnPolicy<C, X, P>
where
    C: Fn(&V, &V) -> Ordering,
    X: Fn(&V) -> K,
    P: Fn(&V) -> V,
{
    FnPolicy { compare, key_of, copy }
}

impl<K, V, C, X, P> RankPolicy<K, V> for FnPolicy<C, X, P>
where
    C: Fn(&V, &V) -> Ordering,
    X: Fn(&V) -> K,
    P: Fn(&V) -> V,
{
    #[inline]
    fn compare(&self, a: &V, b: &V) -> Ordering {
        (self.compare)(a, b)
    }

    #[inline]
    fn key_of(&self, value: &V) -> K {
        (self.key_of)(value)
    }

    #[inline]
    fn copy(&self, value: &V) -> V {
        (self.copy)(value)
    }
}

impl<C, X, P> fmt::Debug for FnPolicy<C, X, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}

/// A [`RankPolicy`] for values that are already `Ord + Clone`.
///
/// Ordering comes from [`Ord`], copies from [`Clone`]; only the key extractor
/// is supplied.
///
/// # Examples
///
/// ```
/// use rank_tree::{OrdPolicy, RankTree};
///
/// // (score, name): ties on score fall back to the name.
/// let tree = RankTree::new(OrdPolicy::new(|v: &(u32, &'static str)| v.1));
///
/// tree.put("carol", (92, "carol")).unwrap();
/// tree.put("alice", (100, "alice")).unwrap();
/// tree.put("bob", (85, "bob")).unwrap();
///
/// assert_eq!(tree.rank_in(1).unwrap(), Some("bob"));
/// ```
pub struct OrdPolicy<V, X> {
    key_of: X,
    _values: PhantomData<fn(&V)>,
}

impl<V, X> OrdPolicy<V, X> {
    /// Creates a policy that orders values by their [`Ord`] impl.
    pub const fn new(key_of: X) -> Self {
        Self {
            key_of,
            _values: PhantomData,
        }
    }
}

impl<K, V, X> RankPolicy<K, V> for OrdPolicy<V, X>
where
    V: Ord + Clone,
    X: Fn(&V) -> K,
{
    #[inline]
    fn compare(&self, a: &V, b: &V) -> Ordering {
        a.cmp(b)
    }

    #[inline]
    fn key_of(&self, value: &V) -> K {
        (self.key_of)(value)
    }

    #[inline]
    fn copy(&self, value: &V) -> V {
        value.clone()
    }
}

impl<V, X> fmt::Debug for OrdPolicy<V, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrdPolicy").finish_non_exhaustive()
    }
}
