//! Fixed-width numeric payloads.
//!
//! Integers are big-endian two's complement of 1, 2, 4 or 8 bytes. Floats are
//! rebuilt from their IEEE-754 fields arithmetically instead of reinterpreting
//! bits, so the result does not depend on the host float layout.

use crate::Value;

use super::constants::UbjsonMarker;

/// How the bytes of an integer payload are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
    Signed,
    Unsigned,
    /// Unsigned byte returned as a one-character string.
    Char,
}

/// Widest magnitude, in bits, that fits a non-negative `i64`.
const MAX_SIGNIFICANT_BITS: u32 = i64::BITS - 1;

/// Decodes a big-endian integer payload.
///
/// A negative signed value is complemented byte by byte while reading and
/// restored as `-magnitude - 1`. Magnitudes wider than 63 bits come back as
/// [`Value::Real`] rather than wrapping.
pub fn decode_int(bytes: &[u8], kind: IntKind) -> Value {
    let negative = kind == IntKind::Signed && bytes.first().is_some_and(|b| b & 0x80 != 0);
    let mask = if negative { 0xff } else { 0x00 };

    let mut significant_bits = 0u32;
    for &raw in bytes {
        let octet = raw ^ mask;
        if significant_bits > 0 {
            significant_bits += 8;
        } else if octet != 0 {
            significant_bits = if octet & 0x80 != 0 { 8 } else { 7 };
        }
    }

    if significant_bits > MAX_SIGNIFICANT_BITS {
        let mut f = 0f64;
        for &raw in bytes {
            f = f * 256.0 + f64::from(raw ^ mask);
        }
        if negative {
            f = -f - 1.0;
        }
        return Value::Real(f);
    }

    let mut val = 0i64;
    for &raw in bytes {
        val = (val << 8) | i64::from(raw ^ mask);
    }
    if negative {
        val = -val - 1;
    }

    match kind {
        IntKind::Char => Value::String(vec![val as u8]),
        _ => Value::Integer(val),
    }
}

/// Decodes an IEEE-754 single precision payload.
pub fn decode_f32(bytes: [u8; 4]) -> f64 {
    let biased = (i32::from(bytes[0] & 0x7f) << 1) | i32::from(bytes[1] >> 7);
    let mut mantissa = bytes;
    mantissa[1] &= 0x7f;
    let exponent = match biased {
        0 => 1 - 127 - 23,
        0xff => return non_finite(&mantissa[1..], bytes[0]),
        _ => {
            mantissa[1] |= 0x80;
            biased - 127 - 23
        }
    };
    assemble(&mantissa[1..], exponent, bytes[0])
}

/// Decodes an IEEE-754 double precision payload.
pub fn decode_f64(bytes: [u8; 8]) -> f64 {
    let biased = (i32::from(bytes[0] & 0x7f) << 4) | i32::from(bytes[1] >> 4);
    let mut mantissa = bytes;
    mantissa[1] &= 0x0f;
    let exponent = match biased {
        0 => 1 - 1023 - 52,
        0x7ff => return non_finite(&mantissa[1..], bytes[0]),
        _ => {
            mantissa[1] |= 0x10;
            biased - 1023 - 52
        }
    };
    assemble(&mantissa[1..], exponent, bytes[0])
}

/// `mantissa * 2^exponent`, negated when the sign bit of `head` is set.
fn assemble(mantissa: &[u8], exponent: i32, head: u8) -> f64 {
    let mut f = 0f64;
    for &octet in mantissa {
        f = f * 256.0 + f64::from(octet);
    }
    f = scale_pow2(f, exponent);
    if head & 0x80 != 0 {
        -f
    } else {
        f
    }
}

fn non_finite(mantissa: &[u8], head: u8) -> f64 {
    if mantissa.iter().any(|&b| b != 0) {
        f64::NAN
    } else if head & 0x80 != 0 {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// Multiplies by a power of two in steps that stay inside the normal range,
/// so subnormal results are rounded once.
fn scale_pow2(mut f: f64, mut exponent: i32) -> f64 {
    while exponent > 1023 {
        f *= pow2(1023);
        exponent -= 1023;
    }
    while exponent < -1022 {
        f *= pow2(-1022);
        exponent += 1022;
    }
    f * pow2(exponent)
}

/// Exact `2^exponent` for `-1022..=1023`.
#[inline]
fn pow2(exponent: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exponent));
    f64::from_bits(((exponent + 1023) as u64) << 52)
}

/// `L` marker followed by the 8-byte big-endian payload.
pub fn encode_u64(num: u64) -> [u8; 9] {
    let mut s = [0u8; 9];
    s[0] = UbjsonMarker::Int64.byte();
    s[1..].copy_from_slice(&num.to_be_bytes());
    s
}
