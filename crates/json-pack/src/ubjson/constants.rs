//! UBJSON marker bytes.

/// Every one-byte marker the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum UbjsonMarker {
    Null = b'Z',
    True = b'T',
    False = b'F',
    NoOp = b'N',
    Int8 = b'i',
    Uint8 = b'U',
    Int16 = b'I',
    Int32 = b'l',
    Int64 = b'L',
    Char = b'C',
    Float32 = b'd',
    Float64 = b'D',
    HighPrecision = b'H',
    String = b'S',
    ArrayStart = b'[',
    ArrayEnd = b']',
    ObjectStart = b'{',
    ObjectEnd = b'}',
    /// Container element type prefix.
    Type = b'$',
    /// Container element count prefix.
    Count = b'#',
}

impl UbjsonMarker {
    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }
}

impl From<UbjsonMarker> for u8 {
    fn from(marker: UbjsonMarker) -> u8 {
        marker as u8
    }
}

impl TryFrom<u8> for UbjsonMarker {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        use UbjsonMarker::*;
        Ok(match byte {
            b'Z' => Null,
            b'T' => True,
            b'F' => False,
            b'N' => NoOp,
            b'i' => Int8,
            b'U' => Uint8,
            b'I' => Int16,
            b'l' => Int32,
            b'L' => Int64,
            b'C' => Char,
            b'd' => Float32,
            b'D' => Float64,
            b'H' => HighPrecision,
            b'S' => String,
            b'[' => ArrayStart,
            b']' => ArrayEnd,
            b'{' => ObjectStart,
            b'}' => ObjectEnd,
            b'$' => Type,
            b'#' => Count,
            other => return Err(other),
        })
    }
}
