//! A byte source fed by a queue of separately delivered chunks.

use std::collections::VecDeque;

use crate::{BufferError, ByteSource};

/// A source that reads across chunk boundaries without merging chunks.
///
/// Useful when input arrives in pieces (network frames, file blocks) but is
/// complete before decoding starts. Empty chunks are accepted and skipped.
///
/// # Example
///
/// ```
/// use ubjson_buffers::{ByteSource, ChunkedSource};
///
/// let mut source = ChunkedSource::new();
/// source.push(vec![1]);
/// source.push(vec![2, 3]);
/// assert_eq!(source.size(), 3);
/// assert_eq!(source.next_byte().unwrap(), Some(1));
/// assert_eq!(source.next_byte().unwrap(), Some(2));
/// ```
#[derive(Debug, Default)]
pub struct ChunkedSource {
    chunks: VecDeque<Vec<u8>>,
    /// Current position within the front chunk.
    x: usize,
    /// Total size of all queued chunks, including consumed bytes of the front one.
    chunk_size: usize,
}

impl ChunkedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes remaining to be read.
    pub fn size(&self) -> usize {
        self.chunk_size - self.x
    }

    /// Appends a chunk to the end of the input.
    pub fn push(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        self.chunk_size += chunk.len();
        self.chunks.push_back(chunk);
    }
}

impl ByteSource for ChunkedSource {
    fn next_byte(&mut self) -> Result<Option<u8>, BufferError> {
        let Some(chunk) = self.chunks.front() else {
            return Ok(None);
        };
        let octet = chunk[self.x];
        self.x += 1;
        if self.x >= chunk.len() {
            self.chunk_size -= chunk.len();
            self.chunks.pop_front();
            self.x = 0;
        }
        Ok(Some(octet))
    }
}

impl From<Vec<Vec<u8>>> for ChunkedSource {
    fn from(chunks: Vec<Vec<u8>>) -> Self {
        let mut source = Self::new();
        for chunk in chunks {
            source.push(chunk);
        }
        source
    }
}
