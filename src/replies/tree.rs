//! Reply tree construction
//!
//! Replies arrive as a flat, chronologically ordered batch where each record
//! only names its parent. The tree is rebuilt in two passes over an
//! identity-keyed index: first every record is indexed, then every record is
//! linked to its parent. Nothing recurses on thread depth.

use std::collections::HashMap;

use super::types::{ReplyNode, ReplyRecord};

/// Nest a flat reply batch under `root_identity`
///
/// Top-level entries are direct replies to the root, plus any reply whose
/// parent is not part of the batch (deleted parent, stale data). Siblings keep
/// the order of the input; nothing is re-sorted. Every input record appears
/// exactly once in the result.
pub fn build_tree(replies: Vec<ReplyRecord>, root_identity: &str) -> Vec<ReplyNode> {
    build_tree_with_max_depth(replies, root_identity, usize::MAX)
}

/// Like [`build_tree`], but no node sits deeper than `max_depth` levels
///
/// Top-level replies are at depth 1. A reply that would land below the cap
/// is attached instead to its ancestor at depth `max_depth - 1`, where it
/// joins that ancestor's children in input order. A cap of 0 puts every reply
/// at the top level.
pub fn build_tree_with_max_depth(
    replies: Vec<ReplyRecord>,
    root_identity: &str,
    max_depth: usize,
) -> Vec<ReplyNode> {
    let mut parents = link_parents(&replies, root_identity.trim());
    break_cycles(&mut parents, &replies);
    cap_depth(&mut parents, max_depth);
    assemble(replies, &parents)
}

/// Resolve each record's parent to an index; `None` means top level
fn link_parents(replies: &[ReplyRecord], root_identity: &str) -> Vec<Option<usize>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(replies.len());
    for (i, reply) in replies.iter().enumerate() {
        // First occurrence of a duplicated key is the link target
        for key in reply.keys() {
            index.entry(key).or_insert(i);
        }
    }

    replies
        .iter()
        .enumerate()
        .map(|(i, reply)| {
            let parent = reply.parent_identity.as_str();
            if parent == root_identity {
                return None;
            }
            match index.get(parent) {
                Some(&p) if p != i => Some(p),
                Some(_) => {
                    tracing::debug!(reply = %reply.identity, "Reply names itself as parent, placing at top level");
                    None
                }
                None => {
                    tracing::debug!(
                        reply = %reply.identity,
                        parent = %parent,
                        "Parent not in batch, placing orphaned reply at top level"
                    );
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Cut parent links that form loops
///
/// A loop never reaches the top level, so its members would vanish. The
/// member that comes first in the input is promoted to the top level.
fn break_cycles(parents: &mut [Option<usize>], replies: &[ReplyRecord]) {
    let mut visits = vec![Visit::Unseen; parents.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..parents.len() {
        let mut current = Some(start);
        while let Some(node) = current {
            match visits[node] {
                Visit::Done => break,
                Visit::OnPath => {
                    if let Some(pos) = path.iter().position(|&n| n == node) {
                        if let Some(&oldest) = path[pos..].iter().min() {
                            tracing::debug!(
                                reply = %replies[oldest].identity,
                                members = path.len() - pos,
                                "Reply parents form a cycle, placing oldest member at top level"
                            );
                            parents[oldest] = None;
                        }
                    }
                    break;
                }
                Visit::Unseen => {
                    visits[node] = Visit::OnPath;
                    path.push(node);
                    current = parents[node];
                }
            }
        }
        for node in path.drain(..) {
            visits[node] = Visit::Done;
        }
    }
}

/// Child lists in input order, plus the top-level indexes
fn child_lists(parents: &[Option<usize>]) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    let mut top_level = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => top_level.push(i),
        }
    }
    (children, top_level)
}

/// Re-parent replies nested deeper than `max_depth`
///
/// Expects an acyclic parent list.
fn cap_depth(parents: &mut [Option<usize>], max_depth: usize) {
    if parents.len() <= max_depth {
        return;
    }
    let (children, top_level) = child_lists(parents);

    // Pre-order walk; `path[d]` is the ancestor at depth `d + 1`
    let mut path: Vec<usize> = Vec::new();
    let mut stack: Vec<(usize, usize)> = top_level.iter().rev().map(|&i| (i, 1)).collect();
    let mut moved = 0usize;
    while let Some((node, depth)) = stack.pop() {
        path.truncate(depth - 1);
        path.push(node);
        if depth > max_depth {
            parents[node] = max_depth.checked_sub(2).and_then(|d| path.get(d).copied());
            moved += 1;
        }
        stack.extend(children[node].iter().rev().map(|&c| (c, depth + 1)));
    }

    if moved > 0 {
        tracing::debug!(moved, max_depth, "Flattened replies nested past the depth limit");
    }
}

/// Materialize nodes bottom-up so no step recurses on depth
fn assemble(replies: Vec<ReplyRecord>, parents: &[Option<usize>]) -> Vec<ReplyNode> {
    let count = replies.len();
    let (children, top_level) = child_lists(parents);

    // Post-order: every child is finished before its parent
    let mut order = Vec::with_capacity(count);
    let mut stack: Vec<(usize, bool)> = top_level.iter().map(|&i| (i, false)).collect();
    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
        } else {
            stack.push((node, true));
            stack.extend(children[node].iter().map(|&c| (c, false)));
        }
    }

    let mut records: Vec<Option<ReplyRecord>> = replies.into_iter().map(Some).collect();
    let mut built: Vec<Option<ReplyNode>> = (0..count).map(|_| None).collect();
    for node in order {
        let kids = children[node]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        if let Some(record) = records[node].take() {
            built[node] = Some(ReplyNode {
                record,
                children: kids,
            });
        }
    }

    top_level
        .into_iter()
        .filter_map(|i| built[i].take())
        .collect()
}
