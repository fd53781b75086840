// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern records and the append-only store that owns them.
//!
//! A pattern is a byte string to search for, an optional replacement and an
//! optional identifier. Once handed to the trie it never changes; nodes refer
//! to it through a [`PatternIdx`].

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Maximum accepted length of a search string, in bytes.
pub const MAX_PATTERN_LEN: usize = 4096;

/// Caller-supplied identifier carried alongside a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternId::Number(n) => write!(f, "{}", n),
            PatternId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PatternId {
    fn from(n: i64) -> Self {
        PatternId::Number(n)
    }
}

impl From<&str> for PatternId {
    fn from(s: &str) -> Self {
        PatternId::Text(s.to_string())
    }
}

impl From<String> for PatternId {
    fn from(s: String) -> Self {
        PatternId::Text(s)
    }
}

/// A search string with its optional replacement and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    search: Vec<u8>,
    replacement: Option<Vec<u8>>,
    id: Option<PatternId>,
}

impl Pattern {
    /// Create a search-only pattern.
    pub fn new(search: impl Into<Vec<u8>>) -> Self {
        Self {
            search: search.into(),
            replacement: None,
            id: None,
        }
    }

    /// Attach replacement text.
    ///
    /// An empty replacement is still a replacement: the match is deleted.
    pub fn with_replacement(mut self, replacement: impl Into<Vec<u8>>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }

    /// Attach an identifier.
    pub fn with_id(mut self, id: impl Into<PatternId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn search(&self) -> &[u8] {
        &self.search
    }

    pub fn replacement(&self) -> Option<&[u8]> {
        self.replacement.as_deref()
    }

    pub fn id(&self) -> Option<&PatternId> {
        self.id.as_ref()
    }

    /// Length of the search string.
    pub fn len(&self) -> usize {
        self.search.len()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
    }
}

/// Stable handle to a pattern inside a [`PatternStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternIdx(u32);

impl PatternIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only owner of every pattern accepted by a trie.
#[derive(Debug, Default)]
pub struct PatternStore {
    patterns: Vec<Pattern>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a pattern and return its handle.
    pub fn push(&mut self, pattern: Pattern) -> PatternIdx {
        let idx = PatternIdx(self.patterns.len() as u32);
        self.patterns.push(pattern);
        idx
    }

    pub fn get(&self, idx: PatternIdx) -> Option<&Pattern> {
        self.patterns.get(idx.index())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

impl Index<PatternIdx> for PatternStore {
    type Output = Pattern;

    fn index(&self, idx: PatternIdx) -> &Pattern {
        &self.patterns[idx.index()]
    }
}

/// Split a delimited word list such as `"foo|bar||baz"` into search strings.
///
/// Empty entries are skipped, so repeated or trailing delimiters are harmless.
/// An empty delimiter yields the whole list as a single entry.
pub fn parse_pattern_list<'a>(list: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return if list.is_empty() { Vec::new() } else { vec![list] };
    }
    list.split(delimiter).filter(|word| !word.is_empty()).collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
