//! Universal Binary JSON codec over a generic JSON value tree.
//!
//! [`UbjsonDecoder`] accepts every UBJSON framing (delimited, counted and
//! strongly-typed containers, all integer widths, `d`/`D` floats, `H`
//! high-precision numbers). [`UbjsonEncoder`] produces a conservative subset:
//! full-width `L` integers, `H` for negative integers and reals, and counted
//! containers.
//!
//! ```
//! use ubjson_pack::{ubjson, Value};
//!
//! let value = Value::from(vec![Value::from(5), Value::from("x")]);
//! let bytes = ubjson::encode(&value).unwrap();
//! assert_eq!(ubjson::decode(&bytes).unwrap(), value);
//! ```

pub mod json;
pub mod ubjson;
mod value;

pub use ubjson::{DecodeOptions, EncodeOptions, UbjsonDecoder, UbjsonEncoder, UbjsonError};
pub use ubjson_buffers::{
    BoundedSink, BufferError, ByteSink, ByteSource, CallbackSink, ChunkedSource, IoSink, IoSource,
    SliceSource, VecSink,
};
pub use value::{Map, Value};
