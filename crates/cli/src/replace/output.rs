// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded output buffer in front of the caller's sink.

/// Default replacement buffer size (1 MiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 20;

/// Accumulates output and hands it to a sink in pieces of at most
/// `capacity` bytes. Filling the buffer flushes it immediately.
#[derive(Debug)]
pub(crate) struct OutputBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }
}

impl OutputBuffer {
    /// A zero capacity is raised to one byte.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn push<S>(&mut self, mut bytes: &[u8], sink: &mut S)
    where
        S: FnMut(&[u8]),
    {
        while !bytes.is_empty() {
            let room = self.capacity - self.buf.len();
            let (head, tail) = bytes.split_at(room.min(bytes.len()));
            self.buf.extend_from_slice(head);
            bytes = tail;

            if self.buf.len() == self.capacity {
                self.flush(sink);
            }
        }
    }

    /// Hand everything buffered to `sink`. Never calls it with nothing.
    pub fn flush<S>(&mut self, sink: &mut S)
    where
        S: FnMut(&[u8]),
    {
        if !self.buf.is_empty() {
            sink(&self.buf);
            self.buf.clear();
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
