//! Universal Binary JSON (UBJSON) encoding and decoding.
//!
//! Format reference: <https://ubjson.org/>

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod number;
pub mod options;
pub mod util;

pub use constants::UbjsonMarker;
pub use decoder::UbjsonDecoder;
pub use encoder::UbjsonEncoder;
pub use error::UbjsonError;
pub use options::{DecodeOptions, EncodeOptions, DEFAULT_MAX_CONTAINER_LEN, DEFAULT_MAX_DEPTH};
pub use util::{decode, decode_any, encode, encode_any};
