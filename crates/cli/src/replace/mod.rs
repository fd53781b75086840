// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming search-and-replace.
//!
//! Input arrives in chunks. Matches are booked as [`Nominee`]s and only
//! committed once no longer pattern can still claim their bytes. The tail of
//! a chunk that may be the prefix of a match completed by the next chunk is
//! held back in a backlog. Output reaches the caller's sink through a bounded
//! buffer.
//!
//! ```ignore
//! let replacer = Replacer::new(&trie);
//! let mut state = ReplaceState::new();
//! let mut out = Vec::new();
//! for chunk in input.chunks(4096) {
//!     replacer.replace(&mut state, chunk, Mode::Normal, |b| out.extend_from_slice(b))?;
//! }
//! replacer.flush(&mut state, false, |b| out.extend_from_slice(b));
//! ```

mod nominee;
mod output;

pub use nominee::{Mode, Nominee};
pub use output::DEFAULT_BUFFER_CAPACITY;

use nominee::NomineeQueue;
use output::OutputBuffer;

use crate::error::ReplaceError;
use crate::matcher::{Matcher, StreamState};
use crate::trie::Trie;

/// Per-session replacement state.
#[derive(Debug, Default)]
pub struct ReplaceState {
    stream: StreamState,
    output: OutputBuffer,
    /// Input bytes ending at `stream.base_position()` that are not yet
    /// committed to output.
    backlog: Vec<u8>,
    nominees: NomineeQueue,
    /// Offset before which every input byte has been committed.
    cursor: usize,
}

impl ReplaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose sink receives at most `capacity` bytes per call.
    pub fn with_buffer_capacity(capacity: usize) -> Self {
        Self {
            output: OutputBuffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn stream(&self) -> &StreamState {
        &self.stream
    }

    /// Offset before which all output has been produced.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes held back across the last chunk boundary.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Candidates booked but not yet resolved.
    pub fn pending_nominees(&self) -> usize {
        self.nominees.len()
    }

    /// Output produced but not yet handed to a sink.
    pub fn buffered_len(&self) -> usize {
        self.output.len()
    }

    pub fn buffer_capacity(&self) -> usize {
        self.output.capacity()
    }

    /// Back to the initial state; the buffer capacity is kept.
    fn reset(&mut self) {
        self.stream.reset();
        self.output.clear();
        self.backlog.clear();
        self.nominees.clear();
        self.cursor = 0;
    }
}

/// Rewrites chunked input against a shared, finalized trie.
#[derive(Debug, Clone, Copy)]
pub struct Replacer<'t> {
    trie: &'t Trie,
}

impl<'t> Replacer<'t> {
    pub fn new(trie: &'t Trie) -> Self {
        Self { trie }
    }

    /// Feed the next chunk of input.
    ///
    /// Output that is certain is buffered and reaches `sink` whenever the
    /// buffer fills; call [`flush`](Self::flush) to drain it.
    pub fn replace<S>(
        &self,
        state: &mut ReplaceState,
        chunk: &[u8],
        mode: Mode,
        mut sink: S,
    ) -> Result<(), ReplaceError>
    where
        S: FnMut(&[u8]),
    {
        if self.trie.is_open() {
            return Err(ReplaceError::NotFinalized);
        }
        if !self.trie.has_replacements() {
            return Err(ReplaceError::NoReplacementsConfigured);
        }

        let base = state.stream.base_position();
        {
            let ReplaceState {
                stream,
                nominees,
                cursor,
                ..
            } = &mut *state;

            let events = Matcher::new(self.trie)
                .find_iter(stream, chunk, false)
                .map_err(|_| ReplaceError::NotFinalized)?;
            for event in events {
                let Some(pattern) = event.replacement() else {
                    continue;
                };
                let nominee = Nominee {
                    pattern,
                    end_position: event.end_position,
                    len: self.trie.pattern(pattern).len(),
                };
                if !nominees.book(nominee, mode, *cursor) {
                    tracing::trace!(end = nominee.end_position, "nominee dropped");
                }
            }
        }

        // The bytes under the current node may still grow into a match.
        let depth = self.trie.node(state.stream.node()).depth();
        let boundary = (base + chunk.len()).saturating_sub(depth);

        self.resolve(state, chunk, base, boundary, &mut sink);
        save_to_backlog(&mut state.backlog, chunk, base, boundary);

        tracing::trace!(
            len = chunk.len(),
            boundary,
            backlog = state.backlog.len(),
            pending = state.nominees.len(),
            "replaced chunk"
        );
        Ok(())
    }

    /// Drain buffered output into `sink`.
    ///
    /// With `keep = false` the input is treated as complete: every pending
    /// candidate and the backlog are resolved first, and the session returns
    /// to its initial state. A second terminal flush emits nothing.
    pub fn flush<S>(&self, state: &mut ReplaceState, keep: bool, mut sink: S)
    where
        S: FnMut(&[u8]),
    {
        if !keep {
            let end = state.stream.base_position();
            self.resolve(state, &[], end, end, &mut sink);
        }

        state.output.flush(&mut sink);

        if !keep {
            state.reset();
        }
    }

    /// Commit output up to `to_position`.
    ///
    /// `chunk` starts at offset `base`; everything before `base` that is
    /// still needed lives in the backlog.
    fn resolve<S>(
        &self,
        state: &mut ReplaceState,
        chunk: &[u8],
        base: usize,
        to_position: usize,
        sink: &mut S,
    ) where
        S: FnMut(&[u8]),
    {
        if to_position < base {
            return;
        }

        while let Some(&nominee) = state.nominees.front() {
            let start = nominee.start_position();
            if to_position <= start {
                break;
            }

            let source = Source::new(chunk, base, &state.backlog);
            source.copy(state.cursor, start, &mut state.output, sink);

            let replacement = self.trie.pattern(nominee.pattern).replacement();
            state.output.push(replacement.unwrap_or_default(), sink);
            state.cursor = nominee.end_position;
            state.nominees.pop_front();
        }

        if to_position > state.cursor {
            let source = Source::new(chunk, base, &state.backlog);
            source.copy(state.cursor, to_position, &mut state.output, sink);
            state.cursor = to_position;
        }

        // The backlog precedes `base`; it is consumed entirely or not at all.
        if base <= state.cursor {
            state.backlog.clear();
        }
    }
}

/// Input bytes addressable by absolute offset: the backlog followed by the
/// current chunk.
struct Source<'a> {
    chunk: &'a [u8],
    base: usize,
    backlog: &'a [u8],
}

impl<'a> Source<'a> {
    fn new(chunk: &'a [u8], base: usize, backlog: &'a [u8]) -> Self {
        Self {
            chunk,
            base,
            backlog,
        }
    }

    /// Append input bytes `from..to` to `output`.
    fn copy<S>(&self, from: usize, to: usize, output: &mut OutputBuffer, sink: &mut S)
    where
        S: FnMut(&[u8]),
    {
        if to <= from {
            return;
        }

        if self.base <= from {
            output.push(&self.chunk[from - self.base..to - self.base], sink);
            return;
        }

        let backlog_base = self.base - self.backlog.len();
        if from < backlog_base {
            tracing::warn!(from, backlog_base, "range starts before backlog");
            return;
        }

        if to <= self.base {
            output.push(
                &self.backlog[from - backlog_base..to - backlog_base],
                sink,
            );
        } else {
            output.push(&self.backlog[from - backlog_base..], sink);
            output.push(&self.chunk[..to - self.base], sink);
        }
    }
}

/// Keep the part of `chunk` at or after `boundary` for the next call.
fn save_to_backlog(backlog: &mut Vec<u8>, chunk: &[u8], base: usize, boundary: usize) {
    let relative = boundary.saturating_sub(base);
    if relative < chunk.len() {
        backlog.extend_from_slice(&chunk[relative..]);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
