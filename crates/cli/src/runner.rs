// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drivers that push inputs through the automaton.
//!
//! [`SearchRunner`] streams records of one input to a callback as they are
//! found, or scans several inputs in parallel using rayon, one session per
//! input against the shared trie, and isolates errors so one unreadable
//! input doesn't prevent the others from being scanned.
//! [`ReplaceRunner`] streams one input through a replace session.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, ReplaceError, Result};
use crate::matcher::{Matcher, StreamState};
use crate::output::MatchRecord;
use crate::reader::{ChunkReader, Input};
use crate::replace::{Mode, ReplaceState, Replacer};
use crate::trie::Trie;

/// Scans inputs for every pattern occurrence.
pub struct SearchRunner<'t> {
    trie: &'t Trie,
    reader: ChunkReader,
}

impl<'t> SearchRunner<'t> {
    pub fn new(trie: &'t Trie, reader: ChunkReader) -> Self {
        Self { trie, reader }
    }

    /// Scan one input from offset zero, collecting every record.
    pub fn scan(&self, input: &Input) -> Result<Vec<MatchRecord>> {
        let mut records = Vec::new();
        self.scan_with(input, |record| {
            records.push(record.clone());
            Ok(())
        })?;
        Ok(records)
    }

    /// Scan one input from offset zero, handing each record to `on_record`
    /// as soon as its chunk is searched. Returns the number of records.
    ///
    /// Errors from `on_record` are reported against `<stdout>`.
    pub fn scan_with<F>(&self, input: &Input, on_record: F) -> Result<usize>
    where
        F: FnMut(&MatchRecord) -> std::io::Result<()>,
    {
        let mut session = ScanSession::new(self.trie, input.display_name(), on_record);
        self.reader.for_each_chunk(input, |chunk| session.feed(chunk))?;
        Ok(session.finish())
    }

    /// Like [`scan_with`](Self::scan_with) over any reader. `name` labels
    /// records and read errors.
    pub fn scan_reader_with<R, F>(&self, reader: R, name: &str, on_record: F) -> Result<usize>
    where
        R: Read,
        F: FnMut(&MatchRecord) -> std::io::Result<()>,
    {
        let mut session = ScanSession::new(self.trie, name.to_string(), on_record);
        self.reader
            .for_each_chunk_from(reader, Path::new(name), |chunk| session.feed(chunk))?;
        Ok(session.finish())
    }

    /// Scan every input in parallel. Results keep input order.
    pub fn scan_all(&self, inputs: &[Input]) -> Vec<Result<Vec<MatchRecord>>> {
        inputs.par_iter().map(|input| self.scan(input)).collect()
    }
}

/// Search state for one input.
struct ScanSession<'t, F> {
    matcher: Matcher<'t>,
    state: StreamState,
    name: String,
    on_record: F,
    found: usize,
}

impl<'t, F> ScanSession<'t, F>
where
    F: FnMut(&MatchRecord) -> std::io::Result<()>,
{
    fn new(trie: &'t Trie, name: String, on_record: F) -> Self {
        Self {
            matcher: Matcher::new(trie),
            state: StreamState::new(),
            name,
            on_record,
            found: 0,
        }
    }

    fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        for event in self.matcher.find_iter(&mut self.state, chunk, false)? {
            for record in MatchRecord::from_event(&self.name, &event) {
                (self.on_record)(&record).map_err(output_error)?;
                self.found += 1;
            }
        }
        Ok(())
    }

    fn finish(self) -> usize {
        tracing::debug!(input = %self.name, matches = self.found, "scanned input");
        self.found
    }
}

/// Streams one input through a replace session into a writer.
pub struct ReplaceRunner<'t> {
    trie: &'t Trie,
    reader: ChunkReader,
    mode: Mode,
    buffer_size: usize,
}

impl<'t> ReplaceRunner<'t> {
    pub fn new(trie: &'t Trie, reader: ChunkReader, mode: Mode, buffer_size: usize) -> Self {
        Self {
            trie,
            reader,
            mode,
            buffer_size,
        }
    }

    /// Rewrite `input` into `out`. Returns the number of input bytes read.
    ///
    /// A trie without replacement text is rejected before any input is
    /// read, so empty input fails the same way as any other.
    pub fn run<W: Write>(&self, input: &Input, out: W) -> Result<u64> {
        if !self.trie.has_replacements() {
            return Err(ReplaceError::NoReplacementsConfigured.into());
        }
        let replacer = Replacer::new(self.trie);
        let mut state = ReplaceState::with_buffer_capacity(self.buffer_size);
        let mut sink = WriteSink::new(out);

        let total = self.reader.for_each_chunk(input, |chunk| {
            replacer.replace(&mut state, chunk, self.mode, |bytes| sink.push(bytes))?;
            sink.check()
        })?;

        replacer.flush(&mut state, false, |bytes| sink.push(bytes));
        sink.check()?;
        sink.finish()?;
        Ok(total)
    }
}

/// Adapts a fallible writer to the replacer's infallible sink, keeping the
/// first write error for later.
struct WriteSink<W: Write> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> WriteSink<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn push(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(bytes) {
            self.error = Some(e);
        }
    }

    fn check(&mut self) -> Result<()> {
        match self.error.take() {
            Some(source) => Err(output_error(source)),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Result<()> {
        self.out.flush().map_err(output_error)
    }
}

fn output_error(source: std::io::Error) -> Error {
    Error::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
