//! Byte stream plumbing for the UBJSON codec.
//!
//! Decoding pulls one byte at a time from a [`ByteSource`]; encoding pushes
//! small spans into a [`ByteSink`]. Neither side ever rewinds.

mod chunked;
mod error;
mod sink;
mod source;

pub use chunked::ChunkedSource;
pub use error::BufferError;
pub use sink::{BoundedSink, ByteSink, CallbackSink, IoSink, VecSink};
pub use source::{ByteSource, IoSource, SliceSource};
