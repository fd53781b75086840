// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON lines output formatter.
//!
//! Each match is written as one compact JSON object per line, as soon as it
//! is known:
//! ```text
//! {"path":"a.txt","start":3,"end":6,"pattern":"cat","id":7}
//! ```

use std::io::Write;

use super::MatchRecord;

/// JSON lines output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
    matches_written: usize,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            matches_written: 0,
        }
    }

    /// Write a single match as one line.
    pub fn write_match(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        let json = serde_json::to_string(record).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)?;
        self.matches_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn matches_written(&self) -> usize {
        self.matches_written
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
