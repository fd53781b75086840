// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming multi-pattern search and replace.
//!
//! A [`Trie`] is built from [`Pattern`]s and finalized into an Aho-Corasick
//! automaton. [`Matcher`] reports every occurrence of every pattern over
//! input delivered in chunks; [`Replacer`] rewrites the input, resolving
//! overlapping candidates by [`Mode`].

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod matcher;
pub mod output;
pub mod pattern;
pub mod reader;
pub mod replace;
pub mod runner;
pub mod trie;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{AddError, Error, ExitCode, ReplaceError, Result, SearchError};
pub use matcher::{MatchEvent, Matcher, SearchOutcome, StreamState};
pub use pattern::{MAX_PATTERN_LEN, Pattern, PatternId};
pub use reader::{ChunkReader, Input};
pub use replace::{Mode, ReplaceState, Replacer};
pub use runner::{ReplaceRunner, SearchRunner};
pub use trie::Trie;

#[cfg(test)]
pub mod test_utils;
