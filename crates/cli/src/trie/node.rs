// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A single automaton state.

use super::pool::NodeId;
use crate::pattern::PatternIdx;

/// One trie node.
///
/// Edges are kept in insertion order while the trie is open and sorted by
/// byte at finalize time, after which lookups use binary search.
#[derive(Debug, Clone)]
pub struct Node {
    depth: usize,
    is_final: bool,
    failure: NodeId,
    outgoing: Vec<(u8, NodeId)>,
    matched: Vec<PatternIdx>,
    replacement: Option<PatternIdx>,
}

impl Node {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            depth,
            is_final: false,
            failure: NodeId::ROOT,
            outgoing: Vec::new(),
            matched: Vec::new(),
            replacement: None,
        }
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True if any pattern ends here, directly or through the failure chain.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Failure target; the root points at itself.
    pub fn failure(&self) -> NodeId {
        self.failure
    }

    /// Outgoing edges as `(byte, child)` pairs.
    pub fn edges(&self) -> &[(u8, NodeId)] {
        &self.outgoing
    }

    /// Patterns accepted at this node, longest first once finalized.
    pub fn matched(&self) -> &[PatternIdx] {
        &self.matched
    }

    /// The pattern to substitute when a match ends here.
    pub fn replacement(&self) -> Option<PatternIdx> {
        self.replacement
    }

    /// Linear edge lookup, valid in any state.
    pub(crate) fn find_edge(&self, byte: u8) -> Option<NodeId> {
        self.outgoing
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|(_, next)| *next)
    }

    /// Binary-search edge lookup; edges must be sorted.
    pub(crate) fn goto(&self, byte: u8) -> Option<NodeId> {
        self.outgoing
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|i| self.outgoing[i].1)
    }

    pub(crate) fn add_edge(&mut self, byte: u8, next: NodeId) {
        debug_assert!(self.find_edge(byte).is_none());
        self.outgoing.push((byte, next));
    }

    pub(crate) fn sort_edges(&mut self) {
        self.outgoing.sort_unstable_by_key(|(b, _)| *b);
    }

    /// Record a pattern unless it is already present.
    pub(crate) fn accept(&mut self, pattern: PatternIdx) {
        if !self.matched.contains(&pattern) {
            self.matched.push(pattern);
        }
    }

    pub(crate) fn mark_final(&mut self) {
        self.is_final = true;
    }

    pub(crate) fn set_failure(&mut self, failure: NodeId) {
        self.failure = failure;
    }

    pub(crate) fn set_replacement(&mut self, pattern: Option<PatternIdx>) {
        self.replacement = pattern;
    }
}
