// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for search results.

pub mod json;
pub mod text;

use serde::Serialize;

use crate::matcher::MatchEvent;
use crate::pattern::PatternId;

/// One pattern occurrence, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Input name; `-` for standard input.
    pub path: String,
    /// Offset of the first matched byte.
    pub start: usize,
    /// Offset one past the last matched byte.
    pub end: usize,
    /// Search text, lossily decoded as UTF-8.
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PatternId>,
}

impl MatchRecord {
    /// One record per pattern reported by `event`, longest first.
    pub fn from_event(path: &str, event: &MatchEvent<'_>) -> Vec<MatchRecord> {
        event
            .patterns()
            .map(|pattern| MatchRecord {
                path: path.to_string(),
                start: event.start_of(pattern),
                end: event.end_position,
                pattern: String::from_utf8_lossy(pattern.search()).into_owned(),
                id: pattern.id().cloned(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
