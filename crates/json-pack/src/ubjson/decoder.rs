//! `UbjsonDecoder`: Universal Binary JSON reader.
//!
//! Reads from a forward-only [`ByteSource`]. The only lookahead is the single
//! byte read after a container opener to detect `$`/`#` framing; when that byte
//! turns out to belong to the first entry it is handed on as an explicit
//! `Option<u8>` instead of being pushed back.
//!
//! Containers come in three framings:
//! - delimited: `[` entries `]`
//! - counted: `[#` count entries
//! - typed-counted: `[$` type `#` count payloads, one marker for every entry
//!
//! Objects frame the same way with `{`/`}` and a length-prefixed key before
//! every entry. A no-op (`N`) entry adds nothing but still uses up a counted
//! slot.

use std::io::Read;

use log::{debug, trace};
use ubjson_buffers::{ByteSource, IoSource, SliceSource};

use super::constants::UbjsonMarker;
use super::error::UbjsonError;
use super::number::{decode_f32, decode_f64, decode_int, IntKind};
use super::options::DecodeOptions;
use crate::{json, Value};

/// Upper bound on capacity reserved up front for a length-prefixed string;
/// longer payloads grow as bytes actually arrive.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Stateless UBJSON decoder; every call owns its own cursor.
#[derive(Debug, Clone, Default)]
pub struct UbjsonDecoder {
    options: DecodeOptions,
}

impl UbjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes one value from a complete in-memory buffer.
    pub fn decode(&self, input: &[u8]) -> Result<Value, UbjsonError> {
        let mut source = SliceSource::new(input);
        self.decode_source(&mut source)
    }

    /// Decodes one value from a [`Read`] stream.
    ///
    /// Bytes are pulled one at a time, so pass a buffered reader. Unless
    /// trailing data is ignored, one more byte is read after the value and
    /// the call fails if the stream produces it.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Value, UbjsonError> {
        let mut source = IoSource::new(reader);
        self.decode_source(&mut source)
    }

    /// Decodes one value from any byte source.
    pub fn decode_source<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<Value, UbjsonError> {
        debug!(
            "decoding UBJSON value (any top level: {}, ignore trailing: {}, max depth: {}, max container len: {})",
            self.options.accept_any_top_level,
            self.options.ignore_trailing_data,
            self.options.max_depth,
            self.options.max_container_len
        );
        let mut reader = ValueReader {
            source,
            depth: 0,
            max_depth: self.options.max_depth,
            max_container_len: self.options.max_container_len,
        };
        let result = reader.read_document(&self.options);
        match &result {
            Ok(value) => debug!("decoded UBJSON {}", value.kind()),
            Err(e) => debug!("UBJSON decode failed: {e}"),
        }
        result
    }
}

/// Per-call decoding state.
struct ValueReader<'s, S: ?Sized> {
    source: &'s mut S,
    depth: usize,
    max_depth: usize,
    max_container_len: usize,
}

impl<S: ByteSource + ?Sized> ValueReader<'_, S> {
    fn read_document(&mut self, options: &DecodeOptions) -> Result<Value, UbjsonError> {
        let first = if options.accept_any_top_level {
            None
        } else {
            let byte = self.byte()?;
            if byte != UbjsonMarker::ArrayStart.byte() && byte != UbjsonMarker::ObjectStart.byte() {
                return Err(UbjsonError::TopLevelTypeRejected);
            }
            Some(byte)
        };

        let value = self.read_value(first)?;

        if !options.ignore_trailing_data && self.next()?.is_some() {
            return Err(UbjsonError::TrailingData);
        }
        Ok(value)
    }

    #[inline]
    fn next(&mut self) -> Result<Option<u8>, UbjsonError> {
        self.source.next_byte().map_err(UbjsonError::Source)
    }

    #[inline]
    fn byte(&mut self) -> Result<u8, UbjsonError> {
        self.next()?.ok_or(UbjsonError::PrematureEndOfInput)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], UbjsonError> {
        let mut buf = [0u8; N];
        for slot in &mut buf {
            *slot = self.byte()?;
        }
        Ok(buf)
    }

    fn enter(&mut self) -> Result<(), UbjsonError> {
        if self.depth >= self.max_depth {
            return Err(UbjsonError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reads one value. `marker` is a type byte the caller already consumed.
    fn read_value(&mut self, marker: Option<u8>) -> Result<Value, UbjsonError> {
        let mut byte = match marker {
            Some(b) => b,
            None => self.byte()?,
        };
        while byte == UbjsonMarker::NoOp.byte() {
            byte = self.byte()?;
        }
        let marker = UbjsonMarker::try_from(byte).map_err(|marker| UbjsonError::UnrecognizedMarker { marker })?;

        match marker {
            UbjsonMarker::Null => Ok(Value::Null),
            UbjsonMarker::True => Ok(Value::Bool(true)),
            UbjsonMarker::False => Ok(Value::Bool(false)),
            UbjsonMarker::Int8 => self.read_int::<1>(IntKind::Signed),
            UbjsonMarker::Uint8 => self.read_int::<1>(IntKind::Unsigned),
            UbjsonMarker::Int16 => self.read_int::<2>(IntKind::Signed),
            UbjsonMarker::Int32 => self.read_int::<4>(IntKind::Signed),
            UbjsonMarker::Int64 => self.read_int::<8>(IntKind::Signed),
            UbjsonMarker::Char => self.read_int::<1>(IntKind::Char),
            UbjsonMarker::Float32 => Ok(Value::Real(decode_f32(self.read_array()?))),
            UbjsonMarker::Float64 => Ok(Value::Real(decode_f64(self.read_array()?))),
            UbjsonMarker::HighPrecision => {
                // sizes may themselves be `H` values, so this recursion is bounded too
                self.enter()?;
                let result = self.read_high_precision();
                self.leave();
                result
            }
            UbjsonMarker::String => Ok(Value::String(self.read_bytes(None)?)),
            UbjsonMarker::ArrayStart | UbjsonMarker::ObjectStart => {
                self.enter()?;
                let result = self.read_container(marker);
                self.leave();
                result
            }
            UbjsonMarker::NoOp
            | UbjsonMarker::ArrayEnd
            | UbjsonMarker::ObjectEnd
            | UbjsonMarker::Type
            | UbjsonMarker::Count => Err(UbjsonError::UnrecognizedMarker { marker: byte }),
        }
    }

    fn read_int<const N: usize>(&mut self, kind: IntKind) -> Result<Value, UbjsonError> {
        let bytes: [u8; N] = self.read_array()?;
        Ok(decode_int(&bytes, kind))
    }

    fn read_high_precision(&mut self) -> Result<Value, UbjsonError> {
        let text = self.read_bytes(None)?;
        let value = json::decode_any(&text)
            .map_err(|e| UbjsonError::InvalidHighPrecisionPayload(e.to_string()))?;
        if !value.is_number() {
            return Err(UbjsonError::InvalidHighPrecisionPayload(format!(
                "expected a number, found {}",
                value.kind()
            )));
        }
        Ok(value)
    }

    /// Reads a size: any value that decodes to a non-negative integer.
    fn read_size(&mut self, marker: Option<u8>) -> Result<usize, UbjsonError> {
        match self.read_value(marker)? {
            Value::Integer(i) if i < 0 => Err(UbjsonError::InvalidSizeValue("negative size")),
            Value::Integer(i) => {
                usize::try_from(i).map_err(|_| UbjsonError::InvalidSizeValue("size exceeds address space"))
            }
            _ => Err(UbjsonError::InvalidSizeValue("non-integer size")),
        }
    }

    /// Reads a size followed by that many raw bytes.
    fn read_bytes(&mut self, marker: Option<u8>) -> Result<Vec<u8>, UbjsonError> {
        let len = self.read_size(marker)?;
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            buf.push(self.byte()?);
        }
        Ok(buf)
    }

    fn read_container(&mut self, open: UbjsonMarker) -> Result<Value, UbjsonError> {
        let is_object = open == UbjsonMarker::ObjectStart;
        let close = if is_object {
            UbjsonMarker::ObjectEnd.byte()
        } else {
            UbjsonMarker::ArrayEnd.byte()
        };

        let mut held = Some(self.byte()?);
        let mut contained_type = None;
        if held == Some(UbjsonMarker::Type.byte()) {
            contained_type = Some(self.byte()?);
            if self.next()? != Some(UbjsonMarker::Count.byte()) {
                return Err(UbjsonError::MalformedContainerFraming);
            }
            held = Some(UbjsonMarker::Count.byte());
        }
        let count = if held == Some(UbjsonMarker::Count.byte()) {
            held = None;
            Some(self.read_size(None)?)
        } else {
            None
        };
        trace!(
            "{} framing: type {:?}, count {:?}",
            if is_object { "object" } else { "array" },
            contained_type.map(char::from),
            count
        );

        let mut container = if is_object { Value::object() } else { Value::array() };

        // Entries of a typed no-op array neither consume input nor add anything.
        if !is_object && contained_type == Some(UbjsonMarker::NoOp.byte()) {
            return Ok(container);
        }

        // A declared count over the limit fails before any entry is read.
        if count.is_some_and(|n| n > self.max_container_len) {
            return Err(UbjsonError::ContainerLengthExceeded(self.max_container_len));
        }

        let mut slots = 0usize;
        loop {
            match count {
                Some(n) => {
                    if slots == n {
                        break;
                    }
                }
                None => {
                    let byte = match held {
                        Some(b) => b,
                        None => self.byte()?,
                    };
                    if byte == close {
                        break;
                    }
                    held = Some(byte);
                    if slots == self.max_container_len {
                        return Err(UbjsonError::ContainerLengthExceeded(self.max_container_len));
                    }
                }
            }
            slots += 1;

            let key = if is_object {
                Some(self.read_bytes(held.take())?)
            } else {
                None
            };

            let elem_type = match contained_type {
                Some(t) => t,
                None => match held.take() {
                    Some(b) => b,
                    None => self.byte()?,
                },
            };
            if elem_type == UbjsonMarker::NoOp.byte() {
                continue;
            }

            let value = self.read_value(Some(elem_type))?;
            match key {
                Some(key) => container.insert(key, value),
                None => container.push(value),
            };
        }
        Ok(container)
    }
}
