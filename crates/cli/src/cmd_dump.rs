// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dump command implementation.

use std::io::Write;

use acstream::cli::{Cli, DumpArgs};
use acstream::config;

/// Print the finalized trie and its statistics.
pub fn run(cli: &Cli, args: &DumpArgs) -> anyhow::Result<()> {
    let (_, trie) = config::load_rules(cli.config.as_deref(), args.patterns.to_patterns())?;
    let stats = trie.stats();

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", trie.display())?;
    writeln!(
        stdout,
        "{} patterns, {} nodes, {} final, {} replacing, max depth {}",
        trie.pattern_count(),
        trie.node_count(),
        stats.final_nodes,
        stats.replacement_nodes,
        stats.max_depth
    )?;
    stdout.flush()?;
    Ok(())
}
