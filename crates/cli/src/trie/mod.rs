// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Byte-keyed Aho-Corasick trie.
//!
//! A trie starts open: [`Trie::add`] inserts patterns one byte per edge.
//! [`Trie::finalize`] closes it for good and computes failure links; from
//! then on it is read-only and any number of [`Matcher`](crate::Matcher) or
//! [`Replacer`](crate::Replacer) sessions can share it.

mod display;
mod finalize;
pub mod node;
pub mod pool;

pub use display::TrieDisplay;
pub use finalize::FinalizeStats;
pub use node::Node;
pub use pool::{NodeId, NodePool};

use crate::error::AddError;
use crate::pattern::{MAX_PATTERN_LEN, Pattern, PatternIdx, PatternStore};

/// An Aho-Corasick automaton over bytes.
#[derive(Debug)]
pub struct Trie {
    pool: NodePool,
    patterns: PatternStore,
    is_open: bool,
    stats: FinalizeStats,
    root_skip: RootSkip,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create an empty, open trie.
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            patterns: PatternStore::new(),
            is_open: true,
            stats: FinalizeStats::default(),
            root_skip: RootSkip::Off,
        }
    }

    /// Build and finalize a trie from a sequence of patterns.
    ///
    /// Stops at the first rejected pattern.
    pub fn from_patterns<I>(patterns: I) -> Result<Self, AddError>
    where
        I: IntoIterator<Item = Pattern>,
    {
        let mut trie = Self::new();
        for pattern in patterns {
            trie.add(pattern)?;
        }
        trie.finalize();
        Ok(trie)
    }

    /// Insert a pattern.
    ///
    /// Fails without touching the trie if it is closed, if the search text is
    /// empty or longer than [`MAX_PATTERN_LEN`], or if the same search text
    /// was already added.
    pub fn add(&mut self, pattern: Pattern) -> Result<(), AddError> {
        if !self.is_open {
            return Err(AddError::TrieClosed);
        }
        if pattern.is_empty() {
            return Err(AddError::EmptyPattern);
        }
        if pattern.len() > MAX_PATTERN_LEN {
            return Err(AddError::PatternTooLong {
                len: pattern.len(),
                max: MAX_PATTERN_LEN,
            });
        }

        let mut node = NodeId::ROOT;
        for &byte in pattern.search() {
            node = match self.pool[node].find_edge(byte) {
                Some(next) => next,
                None => {
                    let depth = self.pool[node].depth() + 1;
                    let next = self.pool.alloc(depth);
                    self.pool[node].add_edge(byte, next);
                    next
                }
            };
        }

        // A final terminal means the whole path already existed, so nothing
        // was allocated above.
        if self.pool[node].is_final() {
            return Err(AddError::DuplicatePattern);
        }

        let idx = self.patterns.push(pattern);
        let terminal = &mut self.pool[node];
        terminal.mark_final();
        terminal.accept(idx);
        Ok(())
    }

    /// Close the trie and compute everything matching needs.
    ///
    /// Irreversible; calling it again does nothing.
    pub fn finalize(&mut self) {
        if !self.is_open {
            tracing::debug!("trie already finalized");
            return;
        }

        self.stats = finalize::finalize(&mut self.pool, &self.patterns);
        self.root_skip = RootSkip::for_root(&self.pool[NodeId::ROOT]);
        self.is_open = false;

        tracing::debug!(
            patterns = self.patterns.len(),
            nodes = self.pool.len(),
            final_nodes = self.stats.final_nodes,
            replacement_nodes = self.stats.replacement_nodes,
            max_depth = self.stats.max_depth,
            "trie finalized"
        );
    }

    /// True until [`finalize`](Self::finalize) is called.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn node_count(&self) -> usize {
        self.pool.len()
    }

    /// True if at least one node has a replacement candidate.
    ///
    /// Always false while the trie is open.
    pub fn has_replacements(&self) -> bool {
        self.stats.replacement_nodes > 0
    }

    /// Statistics from the finalize pass (all zero while open).
    pub fn stats(&self) -> FinalizeStats {
        self.stats
    }

    pub fn patterns(&self) -> &PatternStore {
        &self.patterns
    }

    pub fn pattern(&self, idx: PatternIdx) -> &Pattern {
        &self.patterns[idx]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.pool[id]
    }

    pub fn nodes(&self) -> &NodePool {
        &self.pool
    }

    /// Human-readable dump of every node.
    pub fn display(&self) -> TrieDisplay<'_> {
        TrieDisplay::new(self)
    }

    /// Consume one byte from state `node`.
    ///
    /// Returns the next state and whether it was reached by a goto edge.
    /// Failure fallbacks retry the same byte; a miss at the root stays at
    /// the root. Only valid on a finalized trie.
    #[inline]
    pub(crate) fn next_state(&self, mut node: NodeId, byte: u8) -> (NodeId, bool) {
        loop {
            if let Some(next) = self.pool[node].goto(byte) {
                return (next, true);
            }
            if node == NodeId::ROOT {
                return (node, false);
            }
            node = self.pool[node].failure();
        }
    }

    /// Offset of the first byte in `haystack` that leaves the root.
    ///
    /// Returns `haystack.len()` if no byte does.
    #[inline]
    pub(crate) fn skip_at_root(&self, haystack: &[u8]) -> usize {
        self.root_skip.find(haystack).unwrap_or(haystack.len())
    }
}

/// Fast scan for the next byte with a root edge, used while at the root.
#[derive(Debug, Clone, Copy)]
enum RootSkip {
    /// Too many root edges; step byte by byte.
    Off,
    /// No root edges at all; nothing can ever match.
    Never,
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
}

impl RootSkip {
    fn for_root(root: &Node) -> Self {
        match root.edges() {
            [] => RootSkip::Never,
            [(a, _)] => RootSkip::One(*a),
            [(a, _), (b, _)] => RootSkip::Two(*a, *b),
            [(a, _), (b, _), (c, _)] => RootSkip::Three(*a, *b, *c),
            _ => RootSkip::Off,
        }
    }

    fn find(self, haystack: &[u8]) -> Option<usize> {
        match self {
            RootSkip::Off => Some(0),
            RootSkip::Never => None,
            RootSkip::One(a) => memchr::memchr(a, haystack),
            RootSkip::Two(a, b) => memchr::memchr2(a, b, haystack),
            RootSkip::Three(a, b, c) => memchr::memchr3(a, b, c, haystack),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
