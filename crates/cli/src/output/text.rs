// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! One line per match:
//! ```text
//! <path>:<end-offset>:<pattern>
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::MatchRecord;
use crate::color::scheme;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    writer: W,
    matches_written: usize,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            matches_written: 0,
        }
    }

    /// Write a single match line.
    pub fn write_match(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        self.writer.set_color(&scheme::path())?;
        write!(self.writer, "{}", record.path)?;
        self.writer.reset()?;
        write!(self.writer, ":")?;

        self.writer.set_color(&scheme::offset())?;
        write!(self.writer, "{}", record.end)?;
        self.writer.reset()?;
        write!(self.writer, ":")?;

        self.writer.set_color(&scheme::matched())?;
        write!(self.writer, "{}", record.pattern)?;
        self.writer.reset()?;

        if let Some(id) = &record.id {
            write!(self.writer, " [")?;
            self.writer.set_color(&scheme::id())?;
            write!(self.writer, "{}", id)?;
            self.writer.reset()?;
            write!(self.writer, "]")?;
        }
        writeln!(self.writer)?;

        self.matches_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Number of match lines written so far.
    pub fn matches_written(&self) -> usize {
        self.matches_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
