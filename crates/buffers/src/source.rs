//! Pull sources: produce one byte at a time or signal end of input.

use std::io::{ErrorKind, Read};

use crate::BufferError;

/// A forward-only byte producer.
///
/// `Ok(None)` means end of input. Implementations never rewind, so a caller
/// that reads a byte it cannot use yet must carry it forward itself.
pub trait ByteSource {
    /// Returns the next byte, or `None` once the input is exhausted.
    fn next_byte(&mut self) -> Result<Option<u8>, BufferError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, BufferError> {
        (**self).next_byte()
    }
}

/// A byte source over an in-memory slice.
///
/// # Example
///
/// ```
/// use ubjson_buffers::{ByteSource, SliceSource};
///
/// let mut source = SliceSource::new(&[0x01, 0x02]);
/// assert_eq!(source.next_byte().unwrap(), Some(0x01));
/// assert_eq!(source.next_byte().unwrap(), Some(0x02));
/// assert_eq!(source.next_byte().unwrap(), None);
/// ```
pub struct SliceSource<'a> {
    /// The underlying byte slice.
    uint8: &'a [u8],
    /// Current cursor position.
    x: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source reading `uint8` from the start.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.uint8.len() - self.x
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, BufferError> {
        match self.uint8.get(self.x) {
            Some(&octet) => {
                self.x += 1;
                Ok(Some(octet))
            }
            None => Ok(None),
        }
    }
}

/// A byte source pulling from any [`Read`] implementation.
///
/// Reads are issued one byte at a time; wrap unbuffered handles in a
/// [`std::io::BufReader`] first.
pub struct IoSource<R> {
    inner: R,
}

impl<R: Read> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>, BufferError> {
        let mut octet = [0u8; 1];
        loop {
            match self.inner.read(&mut octet) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(octet[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(BufferError::Io(e)),
            }
        }
    }
}
