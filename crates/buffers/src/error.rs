//! Errors raised by byte sources and sinks.

use thiserror::Error;

/// Failure of a [`ByteSource`](crate::ByteSource) or [`ByteSink`](crate::ByteSink).
///
/// End of input is not an error for a source: it is reported as `Ok(None)`.
/// These variants describe transport problems.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The underlying reader or writer failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A callback sink refused the span it was given.
    #[error("sink rejected write: {0}")]
    Rejected(String),
}
