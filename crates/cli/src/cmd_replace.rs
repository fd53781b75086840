// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replace command implementation.

use std::path::Path;

use acstream::cli::{Cli, ReplaceArgs};
use acstream::config;
use acstream::reader::{ChunkReader, Input};
use acstream::replace::Mode;
use acstream::runner::ReplaceRunner;

/// Run the replace command. Flags override the rules file.
pub fn run(cli: &Cli, args: &ReplaceArgs) -> anyhow::Result<()> {
    let (config, trie) =
        config::load_rules(cli.config.as_deref(), args.patterns.to_patterns())?;

    let mode = if args.lazy {
        Mode::Lazy
    } else {
        config.replace.mode
    };
    let chunk_size = args.chunk_size.unwrap_or(config.input.chunk_size);
    let buffer_size = args.buffer_size.unwrap_or(config.replace.buffer_size);

    let input = match &args.file {
        Some(path) => Input::from_arg(path),
        None => Input::from_arg(Path::new("-")),
    };

    tracing::debug!(?mode, chunk_size, buffer_size, "replace starting");

    let runner = ReplaceRunner::new(&trie, ChunkReader::new(chunk_size), mode, buffer_size);
    let read = runner.run(&input, std::io::stdout().lock())?;

    tracing::debug!(bytes = read, "replace finished");
    Ok(())
}
