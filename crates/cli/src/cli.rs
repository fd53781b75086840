// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_DELIMITER;
use crate::pattern::{Pattern, parse_pattern_list};

/// Streaming multi-pattern search and replace
#[derive(Parser)]
#[command(name = "acstream")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific rules file
    #[arg(short = 'C', long = "config", global = true, env = "ACSTREAM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report every pattern occurrence
    Search(SearchArgs),
    /// Rewrite input, replacing matches
    Replace(ReplaceArgs),
    /// Print the finalized automaton
    Dump(DumpArgs),
}

/// Patterns given on the command line, added after the rules file's.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Add a pattern, with optional replacement text.
    /// Write `\=` for a literal `=` in the search text
    #[arg(short = 'e', long = "pattern", value_name = "SEARCH[=REPLACE]")]
    pub patterns: Vec<String>,

    /// Add `|`-delimited search words
    #[arg(long = "list", value_name = "WORDS")]
    pub lists: Vec<String>,
}

impl PatternArgs {
    /// `-e` patterns first, then `--list` words.
    pub fn to_patterns(&self) -> Vec<Pattern> {
        self.patterns
            .iter()
            .map(|arg| parse_pattern_arg(arg))
            .chain(self.lists.iter().flat_map(|list| {
                parse_pattern_list(list, DEFAULT_DELIMITER)
                    .into_iter()
                    .map(Pattern::new)
            }))
            .collect()
    }
}

/// Split `SEARCH[=REPLACE]` at the first unescaped `=`.
///
/// `cat=dog` replaces, `cat=` deletes, `cat` only searches. `\=` in the
/// search text stands for `=`; the replacement is taken verbatim.
pub fn parse_pattern_arg(arg: &str) -> Pattern {
    let mut search = String::with_capacity(arg.len());
    let mut chars = arg.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some((_, '='))) => {
                search.push('=');
                chars.next();
            }
            '=' => return Pattern::new(search).with_replacement(&arg[i + 1..]),
            _ => search.push(c),
        }
    }
    Pattern::new(search)
}

#[derive(clap::Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub patterns: PatternArgs,

    /// Files to search (`-` for stdin; stdin if none)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Bytes read per chunk
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,
}

#[derive(clap::Args)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub patterns: PatternArgs,

    /// File to rewrite (`-` or omitted for stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Keep the first of overlapping matches instead of the longest
    #[arg(long)]
    pub lazy: bool,

    /// Bytes read per chunk
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Largest write to stdout, in bytes
    #[arg(long, value_name = "N")]
    pub buffer_size: Option<usize>,
}

#[derive(clap::Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub patterns: PatternArgs,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
