// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-way transition from an open trie to a match-ready automaton.
//!
//! Edges are sorted, failure links are computed breadth-first, accepted
//! patterns and the final flag are inherited along failure links, and each
//! node picks the pattern it would substitute during replacement.

use std::collections::VecDeque;

use super::node::Node;
use super::pool::{NodeId, NodePool};
use crate::pattern::{PatternIdx, PatternStore};

/// Summary of a finalize pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeStats {
    /// Nodes that ended up final (directly or inherited).
    pub final_nodes: usize,
    /// Nodes with a replacement candidate.
    pub replacement_nodes: usize,
    /// Depth of the deepest node.
    pub max_depth: usize,
}

pub(super) fn finalize(pool: &mut NodePool, patterns: &PatternStore) -> FinalizeStats {
    for node in pool.iter_mut() {
        node.sort_edges();
    }

    link_failures(pool);

    let mut stats = FinalizeStats::default();
    for node in pool.iter_mut() {
        let candidate = longest_replacement(node, patterns);
        node.set_replacement(candidate);

        stats.final_nodes += usize::from(node.is_final());
        stats.replacement_nodes += usize::from(candidate.is_some());
        stats.max_depth = stats.max_depth.max(node.depth());
    }
    stats
}

/// Breadth-first failure links with match inheritance.
///
/// A node's failure target is strictly shallower, so by the time a node is
/// dequeued its target already carries everything inherited from further
/// down the chain. Copying the target's list is then the same as walking the
/// whole chain.
fn link_failures(pool: &mut NodePool) {
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    let root_edges = pool[NodeId::ROOT].edges().to_vec();
    for (_, child) in root_edges {
        pool[child].set_failure(NodeId::ROOT);
        queue.push_back(child);
    }

    while let Some(id) = queue.pop_front() {
        let parent_failure = pool[id].failure();
        let edges = pool[id].edges().to_vec();

        for (byte, child) in edges {
            let failure = fallback(pool, parent_failure, byte);
            pool[child].set_failure(failure);
            inherit(pool, child, failure);
            queue.push_back(child);
        }
    }
}

/// Follow failure links from `node` until one has an edge on `byte`.
fn fallback(pool: &NodePool, mut node: NodeId, byte: u8) -> NodeId {
    loop {
        if let Some(next) = pool[node].goto(byte) {
            return next;
        }
        if node == NodeId::ROOT {
            return NodeId::ROOT;
        }
        node = pool[node].failure();
    }
}

fn inherit(pool: &mut NodePool, child: NodeId, failure: NodeId) {
    let source = &pool[failure];
    let inherited = source.matched().to_vec();
    let is_final = source.is_final();

    let node = &mut pool[child];
    for pattern in inherited {
        node.accept(pattern);
    }
    if is_final {
        node.mark_final();
    }
}

/// Longest accepted pattern that carries a replacement.
///
/// All patterns at a node are suffixes of its path, so lengths are distinct
/// and the strict comparison never has to break a tie.
fn longest_replacement(node: &Node, patterns: &PatternStore) -> Option<PatternIdx> {
    if !node.is_final() {
        return None;
    }

    let mut best: Option<(PatternIdx, usize)> = None;
    for &idx in node.matched() {
        let pattern = &patterns[idx];
        if pattern.replacement().is_none() {
            continue;
        }
        match best {
            Some((_, len)) if pattern.len() <= len => {}
            _ => best = Some((idx, pattern.len())),
        }
    }
    best.map(|(idx, _)| idx)
}
