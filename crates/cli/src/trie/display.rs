// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Debug rendering of a trie, one block per node.
//!
//! ```text
//! node 2 depth=2 final fail=4
//!   edges: 'c'->3
//!   matched: "ab" "b"
//!   replace: "ab" -> "X"
//! ```

use std::fmt;

use super::Trie;
use super::pool::NodeId;

/// Borrowed view that formats a [`Trie`].
pub struct TrieDisplay<'a> {
    trie: &'a Trie,
}

impl<'a> TrieDisplay<'a> {
    pub(super) fn new(trie: &'a Trie) -> Self {
        Self { trie }
    }
}

impl fmt::Display for TrieDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Depth-first from the root so children follow their parent.
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.trie.node(id);

            write!(f, "node {} depth={}", id.index(), node.depth())?;
            if node.is_final() {
                f.write_str(" final")?;
            }
            if id != NodeId::ROOT {
                write!(f, " fail={}", node.failure().index())?;
            }
            writeln!(f)?;

            if !node.edges().is_empty() {
                f.write_str("  edges:")?;
                for (byte, next) in node.edges() {
                    write!(f, " '{}'->{}", byte.escape_ascii(), next.index())?;
                }
                writeln!(f)?;
            }

            if !node.matched().is_empty() {
                f.write_str("  matched:")?;
                for &idx in node.matched() {
                    let pattern = self.trie.pattern(idx);
                    write!(f, " \"{}\"", pattern.search().escape_ascii())?;
                    if let Some(id) = pattern.id() {
                        write!(f, "#{}", id)?;
                    }
                }
                writeln!(f)?;
            }

            if let Some(idx) = node.replacement() {
                let pattern = self.trie.pattern(idx);
                writeln!(
                    f,
                    "  replace: \"{}\" -> \"{}\"",
                    pattern.search().escape_ascii(),
                    pattern.replacement().unwrap_or_default().escape_ascii()
                )?;
            }

            stack.extend(node.edges().iter().rev().map(|(_, next)| *next));
        }
        Ok(())
    }
}
