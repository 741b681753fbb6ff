//! Reply threading
//!
//! Rebuilds the conversation tree under one annotation from the flat reply
//! batch the API returns for it.

mod tree;
mod types;
mod wire;

pub use tree::{build_tree, build_tree_with_max_depth};
pub use types::{count_nodes, ReplyNode, ReplyRecord};
pub use wire::{normalize_replies, RawReply};
