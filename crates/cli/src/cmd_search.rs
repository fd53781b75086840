// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Search command implementation.

use acstream::cli::{Cli, OutputFormat, SearchArgs};
use acstream::color::resolve_color;
use acstream::config;
use acstream::error::{ExitCode, Result};
use acstream::output::MatchRecord;
use acstream::output::json::JsonFormatter;
use acstream::output::text::TextFormatter;
use acstream::reader::{ChunkReader, Input};
use acstream::runner::SearchRunner;

/// Run the search command.
pub fn run(cli: &Cli, args: &SearchArgs) -> anyhow::Result<ExitCode> {
    let (config, trie) =
        config::load_rules(cli.config.as_deref(), args.patterns.to_patterns())?;
    let chunk_size = args.chunk_size.unwrap_or(config.input.chunk_size);

    let inputs: Vec<Input> = if args.files.is_empty() {
        vec![Input::Stdin]
    } else {
        args.files.iter().map(|path| Input::from_arg(path)).collect()
    };

    tracing::debug!(
        inputs = inputs.len(),
        patterns = trie.pattern_count(),
        chunk_size,
        "search starting"
    );

    let runner = SearchRunner::new(&trie, ChunkReader::new(chunk_size));

    let (matched, failed) = match args.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::stdout(resolve_color(args.color, args.no_color));
            let failed = emit(&runner, &inputs, |record| formatter.write_match(record))?;
            formatter.flush()?;
            (formatter.matches_written(), failed)
        }
        OutputFormat::Json => {
            let mut formatter = JsonFormatter::new(std::io::stdout().lock());
            let failed = emit(&runner, &inputs, |record| formatter.write_match(record))?;
            formatter.flush()?;
            (formatter.matches_written(), failed)
        }
    };

    if failed {
        Ok(ExitCode::InternalError)
    } else if matched == 0 {
        Ok(ExitCode::NoMatch)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Write records in input order. Unreadable inputs are reported and
/// skipped; returns whether any input failed.
///
/// A single input is streamed, so lines appear while it is still being
/// read. Several inputs are scanned in parallel and written afterwards.
fn emit<F>(runner: &SearchRunner<'_>, inputs: &[Input], mut write: F) -> std::io::Result<bool>
where
    F: FnMut(&MatchRecord) -> std::io::Result<()>,
{
    if let [input] = inputs {
        return Ok(report(runner.scan_with(input, write)).is_none());
    }

    let mut failed = false;
    for result in runner.scan_all(inputs) {
        match report(result) {
            Some(records) => {
                for record in &records {
                    write(record)?;
                }
            }
            None => failed = true,
        }
    }
    Ok(failed)
}

fn report<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("acstream: {}", err);
            None
        }
    }
}
