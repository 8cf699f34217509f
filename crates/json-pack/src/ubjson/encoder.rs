//! `UbjsonEncoder`: Universal Binary JSON writer.
//!
//! The writer emits a deliberately small subset of the format:
//! - `Z`, `T`, `F` for null and booleans
//! - `L` + 8 big-endian bytes for every non-negative integer, whatever its size
//! - `H` + size + JSON text for negative integers and all reals
//! - `S` + size + raw bytes for strings
//! - `[#` count items and `{#` count (key, item) pairs for containers
//!
//! Sizes are themselves written as `L` integers. Nothing is buffered: each
//! node goes straight to the sink as the tree is walked.

use log::debug;
use ubjson_buffers::{BoundedSink, BufferError, ByteSink, CallbackSink, IoSink, VecSink};

use super::constants::UbjsonMarker;
use super::error::UbjsonError;
use super::number::encode_u64;
use super::options::EncodeOptions;
use crate::{json, Map, Value};

/// Stateless UBJSON encoder.
#[derive(Debug, Clone, Default)]
pub struct UbjsonEncoder {
    options: EncodeOptions,
}

impl UbjsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Writes `value` into `sink`.
    ///
    /// On failure some prefix of the output may already have reached the sink.
    pub fn encode<S: ByteSink + ?Sized>(&self, value: &Value, sink: &mut S) -> Result<(), UbjsonError> {
        if !self.options.accept_any_top_level && !value.is_container() {
            debug!("refusing to encode top-level {}", value.kind());
            return Err(UbjsonError::TopLevelTypeRejected);
        }
        debug!("encoding UBJSON {}", value.kind());
        let result = ValueWriter { sink }.write_any(value);
        if let Err(e) = &result {
            debug!("UBJSON encode failed: {e}");
        }
        result
    }

    /// Encodes into a fresh growable buffer.
    pub fn encode_to_vec(&self, value: &Value) -> Result<Vec<u8>, UbjsonError> {
        let mut sink = VecSink::new();
        self.encode(value, &mut sink)?;
        Ok(sink.into_inner())
    }

    /// Encodes into `buf`, copying only what fits.
    ///
    /// Returns the full encoded length, which exceeds `buf.len()` when the
    /// output was truncated.
    pub fn encode_into(&self, value: &Value, buf: &mut [u8]) -> Result<usize, UbjsonError> {
        let mut sink = BoundedSink::new(buf);
        self.encode(value, &mut sink)?;
        Ok(sink.total())
    }

    /// Exact number of bytes `value` encodes to.
    pub fn encoded_len(&self, value: &Value) -> Result<usize, UbjsonError> {
        self.encode_into(value, &mut [])
    }

    /// Encodes by handing every span to `callback`.
    pub fn encode_with<F>(&self, value: &Value, callback: F) -> Result<(), UbjsonError>
    where
        F: FnMut(&[u8]) -> Result<(), BufferError>,
    {
        let mut sink = CallbackSink::new(callback);
        self.encode(value, &mut sink)
    }

    /// Encodes into a [`std::io::Write`] stream, flushes it and hands it back.
    pub fn encode_to_writer<W: std::io::Write>(&self, value: &Value, writer: W) -> Result<W, UbjsonError> {
        let mut sink = IoSink::new(writer);
        self.encode(value, &mut sink)?;
        sink.into_inner().map_err(UbjsonError::Sink)
    }
}

/// Depth-first walk of one value tree into a sink.
struct ValueWriter<'s, S: ?Sized> {
    sink: &'s mut S,
}

impl<S: ByteSink + ?Sized> ValueWriter<'_, S> {
    #[inline]
    fn emit(&mut self, bytes: &[u8]) -> Result<(), UbjsonError> {
        self.sink.write(bytes).map_err(UbjsonError::Sink)
    }

    #[inline]
    fn emit_marker(&mut self, marker: UbjsonMarker) -> Result<(), UbjsonError> {
        self.emit(&[marker.byte()])
    }

    fn write_any(&mut self, value: &Value) -> Result<(), UbjsonError> {
        match value {
            Value::Null => self.emit_marker(UbjsonMarker::Null),
            Value::Bool(true) => self.emit_marker(UbjsonMarker::True),
            Value::Bool(false) => self.emit_marker(UbjsonMarker::False),
            Value::Integer(i) => self.write_integer(*i),
            Value::Real(_) => self.write_high_precision(value),
            Value::String(s) => {
                self.emit_marker(UbjsonMarker::String)?;
                self.write_buf(s)
            }
            Value::Array(arr) => self.write_arr(arr),
            Value::Object(obj) => self.write_obj(obj),
        }
    }

    /// Non-negative integers go out as `L`; negative ones take the `H` path.
    fn write_integer(&mut self, int: i64) -> Result<(), UbjsonError> {
        match u64::try_from(int) {
            Ok(num) => self.emit(&encode_u64(num)),
            Err(_) => self.write_high_precision(&Value::Integer(int)),
        }
    }

    fn write_size(&mut self, len: usize) -> Result<(), UbjsonError> {
        self.emit(&encode_u64(len as u64))
    }

    /// Size followed by the bytes verbatim.
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), UbjsonError> {
        self.write_size(buf.len())?;
        self.emit(buf)
    }

    fn write_high_precision(&mut self, num: &Value) -> Result<(), UbjsonError> {
        let text = json::encode_any(num).map_err(UbjsonError::HighPrecisionEncode)?;
        self.emit_marker(UbjsonMarker::HighPrecision)?;
        self.write_buf(&text)
    }

    fn write_arr(&mut self, arr: &[Value]) -> Result<(), UbjsonError> {
        self.emit(&[UbjsonMarker::ArrayStart.byte(), UbjsonMarker::Count.byte()])?;
        self.write_size(arr.len())?;
        for item in arr {
            self.write_any(item)?;
        }
        Ok(())
    }

    fn write_obj(&mut self, obj: &Map) -> Result<(), UbjsonError> {
        self.emit(&[UbjsonMarker::ObjectStart.byte(), UbjsonMarker::Count.byte()])?;
        self.write_size(obj.len())?;
        for (key, val) in obj {
            self.write_buf(key)?;
            self.write_any(val)?;
        }
        Ok(())
    }
}
