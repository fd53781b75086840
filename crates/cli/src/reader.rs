// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chunked input reading.
//!
//! Input is never loaded whole: it is handed to the caller in pieces of at
//! most `chunk_size` bytes, in order, the way the automaton expects it.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::{Error, Result};

/// Path argument that selects standard input.
pub const STDIN_ARG: &str = "-";

/// Where input bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// `-` selects standard input; anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == STDIN_ARG {
            Input::Stdin
        } else {
            Input::File(arg.to_path_buf())
        }
    }

    /// Name used in output lines.
    pub fn display_name(&self) -> String {
        match self {
            Input::Stdin => STDIN_ARG.to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    /// Path used in error reports.
    fn error_path(&self) -> PathBuf {
        match self {
            Input::Stdin => PathBuf::from("<stdin>"),
            Input::File(path) => path.clone(),
        }
    }
}

/// Reads input in fixed-size chunks.
#[derive(Debug, Clone, Copy)]
pub struct ChunkReader {
    chunk_size: usize,
}

impl Default for ChunkReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkReader {
    /// A zero chunk size is raised to one byte.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hand `input` to `on_chunk` piece by piece.
    ///
    /// Stops at the first error, whether from reading or from `on_chunk`.
    /// Returns the total number of bytes read.
    pub fn for_each_chunk<F>(&self, input: &Input, on_chunk: F) -> Result<u64>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        let path = input.error_path();
        match input {
            Input::Stdin => {
                self.for_each_chunk_from(std::io::stdin().lock(), &path, on_chunk)
            }
            Input::File(file) => {
                let file = File::open(file).map_err(|e| Error::Io {
                    path: path.clone(),
                    source: e,
                })?;
                self.for_each_chunk_from(file, &path, on_chunk)
            }
        }
    }

    /// Like [`for_each_chunk`](Self::for_each_chunk) over any reader.
    /// `path` only labels errors.
    pub fn for_each_chunk_from<R, F>(
        &self,
        mut reader: R,
        path: &Path,
        mut on_chunk: F,
    ) -> Result<u64>
    where
        R: Read,
        F: FnMut(&[u8]) -> Result<()>,
    {
        let mut buffer = vec![0u8; self.chunk_size];
        let mut total = 0u64;
        let mut chunks = 0usize;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(Error::Io {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            };
            on_chunk(&buffer[..n])?;
            total += n as u64;
            chunks += 1;
        }

        tracing::debug!(path = %path.display(), bytes = total, chunks, "read input");
        Ok(total)
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
