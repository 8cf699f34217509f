//! UBJSON error type.

use thiserror::Error;
use ubjson_buffers::BufferError;

use crate::json::JsonTextError;

/// Terminal failure of a single decode or encode call.
#[derive(Debug, Error)]
pub enum UbjsonError {
    #[error("premature end of input")]
    PrematureEndOfInput,
    #[error("unrecognized type marker 0x{marker:02x}")]
    UnrecognizedMarker { marker: u8 },
    #[error("invalid size: {0}")]
    InvalidSizeValue(&'static str),
    #[error("container has type without count")]
    MalformedContainerFraming,
    #[error("failed parsing high-precision number: {0}")]
    InvalidHighPrecisionPayload(String),
    #[error("end of input expected, found trailing data")]
    TrailingData,
    #[error("'[' or '{{' expected at top level")]
    TopLevelTypeRejected,
    #[error("maximum nesting depth of {0} exceeded")]
    DepthLimitExceeded(usize),
    #[error("container holds more than {0} entries")]
    ContainerLengthExceeded(usize),
    #[error("byte source failed")]
    Source(#[source] BufferError),
    #[error("byte sink failed")]
    Sink(#[source] BufferError),
    #[error("cannot render high-precision number")]
    HighPrecisionEncode(#[source] JsonTextError),
}
