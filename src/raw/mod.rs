mod arena;
mod balance;
mod handle;
mod node;
mod raw_rank_tree;

pub(crate) use node::Side;
pub(crate) use raw_rank_tree::RawRankTree;
