// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming search over a finalized trie.
//!
//! A [`StreamState`] carries the automaton state between chunks, so input
//! can arrive in pieces of any size and still produce the same events (with
//! absolute end offsets) as one contiguous call.

use std::fmt;
use std::ops::ControlFlow;

use crate::error::SearchError;
use crate::pattern::{Pattern, PatternIdx, PatternStore};
use crate::trie::{Node, NodeId, Trie};

/// Per-session traversal state.
///
/// Holds no borrow of the trie; a state must only ever be used with the trie
/// it was started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamState {
    node: NodeId,
    base_position: usize,
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamState {
    /// State positioned at the root, offset zero.
    pub fn new() -> Self {
        Self {
            node: NodeId::ROOT,
            base_position: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Node the traversal stopped at.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Absolute offset of the next byte to be consumed.
    pub fn base_position(&self) -> usize {
        self.base_position
    }
}

/// One or more patterns ending at the same input offset.
#[derive(Clone, Copy)]
pub struct MatchEvent<'t> {
    /// Absolute offset one past the last matched byte.
    pub end_position: usize,
    node: &'t Node,
    store: &'t PatternStore,
}

impl<'t> MatchEvent<'t> {
    /// Every pattern ending here, longest first.
    pub fn patterns(&self) -> impl Iterator<Item = &'t Pattern> + 't {
        let store = self.store;
        self.node.matched().iter().map(move |&idx| &store[idx])
    }

    pub fn pattern_indices(&self) -> &'t [PatternIdx] {
        self.node.matched()
    }

    /// Number of patterns ending here (never zero).
    pub fn len(&self) -> usize {
        self.node.matched().len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.matched().is_empty()
    }

    /// Start offset of a pattern reported by this event.
    pub fn start_of(&self, pattern: &Pattern) -> usize {
        self.end_position - pattern.len()
    }

    pub(crate) fn replacement(&self) -> Option<PatternIdx> {
        self.node.replacement()
    }
}

impl fmt::Debug for MatchEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let searches: Vec<String> = self
            .patterns()
            .map(|p| p.search().escape_ascii().to_string())
            .collect();
        f.debug_struct("MatchEvent")
            .field("end_position", &self.end_position)
            .field("patterns", &searches)
            .finish()
    }
}

/// How a callback-driven search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The whole chunk was consumed.
    Completed,
    /// The callback asked to stop after `consumed` bytes of the chunk; the
    /// state is positioned to resume at `&chunk[consumed..]`.
    Stopped { consumed: usize },
}

/// Searches chunks of input against a shared, finalized trie.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'t> {
    trie: &'t Trie,
}

impl<'t> Matcher<'t> {
    pub fn new(trie: &'t Trie) -> Self {
        Self { trie }
    }

    /// Collect every event in `chunk`.
    ///
    /// With `reset` the session starts over at offset zero; otherwise the
    /// chunk continues the bytes fed before.
    pub fn search(
        &self,
        state: &mut StreamState,
        chunk: &[u8],
        reset: bool,
    ) -> Result<Vec<MatchEvent<'t>>, SearchError> {
        Ok(self.find_iter(state, chunk, reset)?.collect())
    }

    /// Lazily yield events in `chunk`.
    ///
    /// After each event `state` describes exactly the consumed prefix of the
    /// chunk, so an iterator dropped early can be resumed by searching
    /// `&chunk[iter.consumed()..]` with `reset = false`.
    pub fn find_iter<'s, 'c>(
        &self,
        state: &'s mut StreamState,
        chunk: &'c [u8],
        reset: bool,
    ) -> Result<FindIter<'t, 's, 'c>, SearchError> {
        if self.trie.is_open() {
            return Err(SearchError::NotFinalized);
        }
        if reset {
            state.reset();
        }

        tracing::trace!(
            len = chunk.len(),
            base = state.base_position,
            "searching chunk"
        );

        Ok(FindIter {
            trie: self.trie,
            node: state.node,
            origin: state.base_position,
            state,
            chunk,
            pos: 0,
        })
    }

    /// Report events to `on_match` until it breaks or the chunk ends.
    pub fn search_with<F>(
        &self,
        state: &mut StreamState,
        chunk: &[u8],
        reset: bool,
        mut on_match: F,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: FnMut(&MatchEvent<'t>) -> ControlFlow<()>,
    {
        let mut iter = self.find_iter(state, chunk, reset)?;
        while let Some(event) = iter.next() {
            if on_match(&event).is_break() {
                return Ok(SearchOutcome::Stopped {
                    consumed: iter.consumed(),
                });
            }
        }
        Ok(SearchOutcome::Completed)
    }
}

/// Lazy event iterator over one chunk. See [`Matcher::find_iter`].
pub struct FindIter<'t, 's, 'c> {
    trie: &'t Trie,
    state: &'s mut StreamState,
    chunk: &'c [u8],
    /// Session offset of `chunk[0]`.
    origin: usize,
    pos: usize,
    node: NodeId,
}

impl FindIter<'_, '_, '_> {
    /// Bytes of the chunk consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn commit(&mut self) {
        self.state.node = self.node;
        self.state.base_position = self.origin + self.pos;
    }
}

impl<'t> Iterator for FindIter<'t, '_, '_> {
    type Item = MatchEvent<'t>;

    fn next(&mut self) -> Option<MatchEvent<'t>> {
        let len = self.chunk.len();
        while self.pos < len {
            if self.node == NodeId::ROOT {
                self.pos += self.trie.skip_at_root(&self.chunk[self.pos..]);
                if self.pos == len {
                    break;
                }
            }

            let (next, via_goto) = self.trie.next_state(self.node, self.chunk[self.pos]);
            self.node = next;
            self.pos += 1;

            // A failure fallback never reports: that state was already
            // reported when it was first entered.
            let node = self.trie.node(next);
            if via_goto && node.is_final() {
                self.commit();
                return Some(MatchEvent {
                    end_position: self.origin + self.pos,
                    node,
                    store: self.trie.patterns(),
                });
            }
        }
        self.commit();
        None
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
