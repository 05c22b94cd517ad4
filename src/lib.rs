//! Thread-safe order-statistic ranking for Rust.
//!
//! This crate provides [`RankTree`], a keyed ranking built for leaderboards:
//! entries are looked up by key, ordered by a caller-supplied comparator, and
//! answer rank queries in O(log n):
//!
//! - [`get_rank`](RankTree::get_rank) - The 1-based rank of a key
//! - [`rank_in`](RankTree::rank_in) - The key holding a given rank
//! - [`rank_range`](RankTree::rank_range) - Copies of the values in a range of ranks
//!
//! # Example
//!
//! ```
//! use rank_tree::{policy, RankTree};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Player {
//!     id: u32,
//!     score: u64,
//! }
//!
//! // Highest score first; equal scores fall back to the lower id.
//! let board = RankTree::new(policy(
//!     |a: &Player, b: &Player| b.score.cmp(&a.score).then(a.id.cmp(&b.id)),
//!     |p: &Player| p.id,
//!     Player::clone,
//! ));
//!
//! board.put(1, Player { id: 1, score: 100 })?;
//! board.put(2, Player { id: 2, score: 85 })?;
//! board.put(3, Player { id: 3, score: 92 })?;
//!
//! assert_eq!(board.rank_in(1)?, Some(1));
//! assert_eq!(board.get_rank(&2), Some(3));
//!
//! // Score updates reposition the entry in place.
//! board.put(2, Player { id: 2, score: 120 })?;
//! assert_eq!(board.get_rank(&2), Some(1));
//! # Ok::<(), rank_tree::RankError>(())
//! ```
//!
//! # Implementation
//!
//! A red-black tree augmented with subtree sizes, stored in an arena and
//! linked by indices. A hash index maps each key to the node currently
//! holding its value. One reader/writer lock guards tree and index together.
//!
//! Enable the `tracing` feature to emit `tracing` events for inserts,
//! repositions, removals and rebalancing steps.

#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

mod config;
mod error;
mod logging;
mod policy;
mod raw;

pub mod rank_tree;

pub use config::RankTreeConfig;
pub use error::{RankError, Result};
pub use policy::{FnPolicy, OrdPolicy, RankPolicy, policy};
pub use rank_tree::RankTree;
