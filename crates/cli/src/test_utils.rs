// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Builders for finalized tries and drivers that push input through a
//! replace session the way a streaming caller would.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::pattern::Pattern;
use crate::replace::{Mode, ReplaceState, Replacer};
use crate::trie::Trie;

/// Finalized trie of search-only patterns.
pub fn trie_of(searches: &[&str]) -> Trie {
    Trie::from_patterns(searches.iter().map(|s| Pattern::new(*s))).unwrap()
}

/// Finalized trie of `(search, replacement)` pairs.
pub fn replace_trie(pairs: &[(&str, &str)]) -> Trie {
    Trie::from_patterns(
        pairs
            .iter()
            .map(|(search, replace)| Pattern::new(*search).with_replacement(*replace)),
    )
    .unwrap()
}

/// Feed `chunks` through a fresh session, flush, and return everything the
/// sink received.
pub fn replace_chunks(trie: &Trie, chunks: &[&[u8]], mode: Mode) -> Vec<u8> {
    let replacer = Replacer::new(trie);
    let mut state = ReplaceState::new();
    let mut out = Vec::new();

    for chunk in chunks {
        replacer
            .replace(&mut state, chunk, mode, |bytes| out.extend_from_slice(bytes))
            .unwrap();
    }
    replacer.flush(&mut state, false, |bytes| out.extend_from_slice(bytes));
    out
}

/// Single-chunk replacement as a string.
pub fn replace_str(trie: &Trie, input: &str, mode: Mode) -> String {
    String::from_utf8(replace_chunks(trie, &[input.as_bytes()], mode)).unwrap()
}
