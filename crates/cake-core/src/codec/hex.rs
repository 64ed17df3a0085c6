//! Message hex codec.
//!
//! Every character is written as its code point in two lowercase hex digits,
//! which keeps arbitrary text URL-safe. Only code points up to 255 survive a
//! round trip; higher code points are truncated to their low byte.

use std::fmt::Write;

use crate::error::CodecError;

/// Hex-encode a message, two digits per character.
pub fn encode(message: &str) -> String {
    let mut out = String::with_capacity(message.len() * 2);
    for c in message.chars() {
        let byte = c as u32 as u8;
        // Writing into a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decode a hex token back into a message, mapping each byte to the
/// character with that code point.
pub fn decode(token: &str) -> Result<String, CodecError> {
    let bytes = token.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(CodecError::OddLength(bytes.len()));
    }

    let mut out = String::with_capacity(bytes.len() / 2);
    for (i, pair) in bytes.chunks_exact(2).enumerate() {
        let (Some(hi), Some(lo)) = (hex_value(pair[0]), hex_value(pair[1])) else {
            return Err(CodecError::InvalidHexPair {
                offset: i * 2,
                pair: String::from_utf8_lossy(pair).into_owned(),
            });
        };
        out.push(char::from((hi << 4) | lo));
    }
    Ok(out)
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}
