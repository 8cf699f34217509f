//! Push sinks: consume byte spans, possibly failing.

use std::io::Write;

use crate::BufferError;

/// A byte consumer fed with small spans.
///
/// The concatenation of every span written is the complete output.
pub trait ByteSink {
    /// Consumes `bytes`. A failure aborts whatever is producing the output.
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        (**self).write(bytes)
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// An unbounded, growable sink.
///
/// # Example
///
/// ```
/// use ubjson_buffers::{ByteSink, VecSink};
///
/// let mut sink = VecSink::new();
/// sink.write(&[0x01]).unwrap();
/// sink.write(&[0x02, 0x03]).unwrap();
/// assert_eq!(sink.len(), 3);
/// assert_eq!(sink.into_inner(), [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    uint8: Vec<u8>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink with room for `capacity` bytes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes produced so far.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    /// Returns the accumulated bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.uint8
    }
}

impl ByteSink for VecSink {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.uint8.extend_from_slice(bytes);
        Ok(())
    }
}

/// A sink over a caller-supplied buffer of fixed capacity.
///
/// Bytes beyond the capacity are dropped, but still counted, so
/// [`total`](BoundedSink::total) reports the full output length. Callers can
/// size a buffer with a first pass and encode again into it.
///
/// # Example
///
/// ```
/// use ubjson_buffers::{BoundedSink, ByteSink};
///
/// let mut buf = [0u8; 2];
/// let mut sink = BoundedSink::new(&mut buf);
/// sink.write(b"abc").unwrap();
/// assert_eq!(sink.written(), 2);
/// assert_eq!(sink.total(), 3);
/// assert!(sink.is_truncated());
/// assert_eq!(&buf, b"ab");
/// ```
pub struct BoundedSink<'a> {
    dst: &'a mut [u8],
    /// Bytes actually copied into `dst`.
    x: usize,
    /// Bytes offered, copied or not.
    total: usize,
}

impl<'a> BoundedSink<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, x: 0, total: 0 }
    }

    /// Number of bytes copied into the buffer.
    pub fn written(&self) -> usize {
        self.x
    }

    /// Number of bytes the producer emitted, including dropped ones.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether some output did not fit.
    pub fn is_truncated(&self) -> bool {
        self.total > self.x
    }
}

impl ByteSink for BoundedSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let rem = self.dst.len() - self.x;
        if rem > 0 {
            let copy = rem.min(bytes.len());
            self.dst[self.x..self.x + copy].copy_from_slice(&bytes[..copy]);
            self.x += copy;
        }
        self.total += bytes.len();
        Ok(())
    }
}

/// A sink forwarding every span to a closure.
///
/// # Example
///
/// ```
/// use ubjson_buffers::{BufferError, ByteSink, CallbackSink};
///
/// let mut spans = 0;
/// let mut sink = CallbackSink::new(|_bytes: &[u8]| -> Result<(), BufferError> {
///     spans += 1;
///     Ok(())
/// });
/// sink.write(b"x").unwrap();
/// sink.write(b"yz").unwrap();
/// drop(sink);
/// assert_eq!(spans, 2);
/// ```
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(&[u8]) -> Result<(), BufferError>,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ByteSink for CallbackSink<F>
where
    F: FnMut(&[u8]) -> Result<(), BufferError>,
{
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        (self.callback)(bytes)
    }
}

/// A sink writing through to any [`Write`] implementation.
pub struct IoSink<W> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flushes and returns the wrapped writer.
    pub fn into_inner(mut self) -> Result<W, BufferError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.inner.write_all(bytes)?;
        Ok(())
    }
}
