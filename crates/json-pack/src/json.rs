//! Textual JSON in "any value" mode, used for UBJSON high-precision numbers.
//!
//! Unlike document-level JSON, a bare scalar such as `-12` or `1.5e300` is a
//! complete input or output here.

use thiserror::Error;

use crate::Value;

#[derive(Debug, Error)]
pub enum JsonTextError {
    #[error("invalid JSON text: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("string is not valid UTF-8")]
    NonUtf8String,
    #[error("number is not finite")]
    NonFiniteNumber,
}

/// Renders any value as compact JSON text.
pub fn encode_any(value: &Value) -> Result<Vec<u8>, JsonTextError> {
    // Scalars skip the tree conversion; they are the hot path for `H`.
    let json = match value {
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or(JsonTextError::NonFiniteNumber)?,
        other => serde_json::Value::try_from(other.clone())?,
    };
    Ok(serde_json::to_vec(&json)?)
}

/// Parses JSON text holding exactly one value of any type.
pub fn decode_any(text: &[u8]) -> Result<Value, JsonTextError> {
    let json: serde_json::Value = serde_json::from_slice(text)?;
    Ok(Value::from(json))
}
