//! Hexadecimal encoding and decoding for keys, engine IDs and KeyChange
//! values.

use std::fmt;

/// Encode bytes as lowercase hex string.
///
/// # Examples
///
/// ```
/// use snmp_usm_keys::format::hex::encode;
///
/// assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// assert_eq!(encode(&[0x00, 0xff]), "00ff");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    Bytes(bytes).to_string()
}

/// Decode a hex string to bytes.
///
/// An optional `0x` prefix is accepted, matching how engine IDs are
/// usually written in agent configuration.
///
/// # Examples
///
/// ```
/// use snmp_usm_keys::format::hex::decode;
///
/// assert_eq!(decode("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(decode("0x800007e580").unwrap(), vec![0x80, 0x00, 0x07, 0xe5, 0x80]);
/// assert!(decode("xyz").is_err());
/// assert!(decode("abc").is_err()); // odd length
/// ```
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
        .as_bytes();
    if !digits.len().is_multiple_of(2) {
        return Err(DecodeError::OddLength);
    }
    digits
        .chunks_exact(2)
        .map(|pair| Ok((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(c: u8) -> Result<u8, DecodeError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(DecodeError::InvalidChar),
    }
}

/// Error type for hex decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Input has odd length (must be pairs of hex digits)
    #[error("hex string has an odd number of digits")]
    OddLength,
    /// Invalid hexadecimal character
    #[error("invalid hex digit")]
    InvalidChar,
}

/// Lazy hex formatter - only formats when actually displayed.
///
/// Used for logging engine IDs, never key material.
///
/// # Examples
///
/// ```
/// use snmp_usm_keys::format::hex::Bytes;
///
/// let engine_id = [0x80, 0x00, 0x1f, 0x88];
/// assert_eq!(format!("{}", Bytes(&engine_id)), "80001f88");
/// ```
pub struct Bytes<'a>(pub &'a [u8]);

impl fmt::Debug for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_display() {
        assert_eq!(format!("{}", Bytes(&[0xde, 0xad, 0xbe, 0xef])), "deadbeef");
        assert_eq!(format!("{:?}", Bytes(&[0x00, 0xff, 0x42])), "00ff42");
        assert_eq!(format!("{}", Bytes(&[])), "");
    }

    #[test]
    fn test_decode_mixed_case() {
        assert_eq!(decode("DeAdBeEf").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_prefix() {
        assert_eq!(decode("0X0102").unwrap(), vec![1, 2]);
        assert_eq!(decode("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_odd_length_error() {
        assert_eq!(decode("1"), Err(DecodeError::OddLength));
        assert_eq!(decode("0x123"), Err(DecodeError::OddLength));
    }

    #[test]
    fn test_decode_invalid_char_error() {
        assert_eq!(decode("gg"), Err(DecodeError::InvalidChar));
        assert_eq!(decode("0g"), Err(DecodeError::InvalidChar));
        assert_eq!(decode("  "), Err(DecodeError::InvalidChar));
        // multi-byte characters must not split
        assert_eq!(decode("a\u{e9}b"), Err(DecodeError::InvalidChar));
    }

    #[test]
    fn test_roundtrip() {
        let original: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode(&encode(&original)).unwrap(), original);
    }
}
