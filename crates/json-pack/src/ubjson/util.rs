//! Convenience UBJSON helpers.

use crate::Value;

use super::{DecodeOptions, EncodeOptions, UbjsonDecoder, UbjsonEncoder, UbjsonError};

/// Decodes a buffer holding exactly one top-level array or object.
pub fn decode(input: &[u8]) -> Result<Value, UbjsonError> {
    UbjsonDecoder::new().decode(input)
}

/// Decodes a buffer holding exactly one value of any type.
pub fn decode_any(input: &[u8]) -> Result<Value, UbjsonError> {
    UbjsonDecoder::with_options(DecodeOptions::any()).decode(input)
}

/// Encodes a top-level array or object.
pub fn encode(value: &Value) -> Result<Vec<u8>, UbjsonError> {
    UbjsonEncoder::new().encode_to_vec(value)
}

/// Encodes a value of any type.
pub fn encode_any(value: &Value) -> Result<Vec<u8>, UbjsonError> {
    UbjsonEncoder::with_options(EncodeOptions::any()).encode_to_vec(value)
}
