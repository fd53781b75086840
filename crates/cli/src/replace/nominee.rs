// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replacement candidates waiting for resolution.
//!
//! A match is not replaced as soon as it is seen: a longer pattern may still
//! swallow it. Candidates are queued in end-position order and the booking
//! policy decides which of them survive an overlap.

use std::collections::VecDeque;

use serde::Deserialize;

use crate::pattern::PatternIdx;

/// Overlap policy for replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A new candidate removes queued candidates that start at or after its
    /// own start. Remaining overlaps are all replaced.
    #[default]
    Normal,
    /// The first candidate wins; later ones overlapping it are dropped.
    Lazy,
}

/// A booked candidate match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nominee {
    pub pattern: PatternIdx,
    /// Absolute offset one past the match.
    pub end_position: usize,
    /// Length of the matched search text.
    pub len: usize,
}

impl Nominee {
    pub fn start_position(&self) -> usize {
        self.end_position - self.len
    }
}

#[derive(Debug, Default)]
pub(crate) struct NomineeQueue {
    queue: VecDeque<Nominee>,
}

impl NomineeQueue {
    /// Offer a candidate to the queue under `mode`.
    ///
    /// `cursor` is the offset before which output is already committed.
    /// Returns false if the candidate was rejected.
    pub fn book(&mut self, nominee: Nominee, mode: Mode, cursor: usize) -> bool {
        let start = nominee.start_position();

        match mode {
            Mode::Lazy => {
                if start < cursor {
                    return false;
                }
                if self.queue.back().is_some_and(|prev| start < prev.end_position) {
                    return false;
                }
            }
            Mode::Normal => {
                while self
                    .queue
                    .back()
                    .is_some_and(|prev| start <= prev.start_position())
                {
                    self.queue.pop_back();
                }
            }
        }

        self.queue.push_back(nominee);
        true
    }

    pub fn front(&self) -> Option<&Nominee> {
        self.queue.front()
    }

    pub fn pop_front(&mut self) -> Option<Nominee> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Nominee> {
        self.queue.iter()
    }
}

#[cfg(test)]
#[path = "nominee_tests.rs"]
mod tests;
