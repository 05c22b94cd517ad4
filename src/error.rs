use thiserror::Error;

/// Result alias for fallible [`RankTree`](crate::RankTree) operations.
pub type Result<T> = core::result::Result<T, RankError>;

/// Errors returned by [`RankTree`](crate::RankTree).
///
/// None of these leave the tree modified: every check runs before the first
/// structural change.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq, Hash)]
pub enum RankError {
    /// A rank lookup was given `0`. Ranks start at 1.
    #[error("invalid rank {rank}: ranks start at 1")]
    InvalidRank { rank: usize },

    /// A rank range whose start is not below its end.
    #[error("invalid rank range: from {from} must be less than to {to}")]
    InvalidRange { from: usize, to: usize },

    /// The key extracted from a value did not match the key it was put under.
    #[error("key extracted from value does not match the supplied key")]
    KeyMismatch,

    /// The comparator reported two values of distinct keys as equal.
    ///
    /// The comparator must impose a strict order across keys, usually by
    /// breaking score ties with the key itself.
    #[error("comparator reported a tie between values of distinct keys")]
    TiedValues,
}
