//! Text codepage identifiers and encode/decode functions.
//!
//! The stream layer consumes codepages by identifier only; the actual
//! transcoding lives here. UTF-8 is the default for multi-byte text, and
//! the UTF-16 variants pair with a stream's byte order via
//! [`Codepage::utf16_for`].

use bytes::Bytes;

use crate::error::{CodecError, Result};
use crate::order::ByteOrder;

/// Identifier selecting a text encoding/decoding scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Codepage {
    /// UTF-8 (default for multi-byte text).
    #[default]
    Utf8,
    /// UTF-16, little-endian code units.
    Utf16Le,
    /// UTF-16, big-endian code units.
    Utf16Be,
}

impl Codepage {
    /// The UTF-16 codepage matching a byte order.
    pub fn utf16_for(order: ByteOrder) -> Codepage {
        match order {
            ByteOrder::Little => Codepage::Utf16Le,
            ByteOrder::Big => Codepage::Utf16Be,
        }
    }
}

impl std::fmt::Display for Codepage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Codepage::Utf8 => "utf-8",
            Codepage::Utf16Le => "utf-16le",
            Codepage::Utf16Be => "utf-16be",
        };
        f.write_str(name)
    }
}

/// Encode text into bytes under the given codepage.
pub fn encode(text: &str, codepage: Codepage) -> Bytes {
    match codepage {
        Codepage::Utf8 => Bytes::copy_from_slice(text.as_bytes()),
        Codepage::Utf16Le => text
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect::<Vec<u8>>()
            .into(),
        Codepage::Utf16Be => text
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect::<Vec<u8>>()
            .into(),
    }
}

/// Decode bytes into text under the given codepage.
pub fn decode(bytes: &[u8], codepage: Codepage) -> Result<String> {
    match codepage {
        Codepage::Utf8 => String::from_utf8(bytes.to_vec())
            .map_err(|_| CodecError::InvalidText { codepage }),
        Codepage::Utf16Le => decode_utf16(bytes, codepage, u16::from_le_bytes),
        Codepage::Utf16Be => decode_utf16(bytes, codepage, u16::from_be_bytes),
    }
}

fn decode_utf16(
    bytes: &[u8],
    codepage: Codepage,
    unpack: fn([u8; 2]) -> u16,
) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(CodecError::InvalidText { codepage });
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unpack([pair[0], pair[1]]))
        .collect();

    String::from_utf16(&units).map_err(|_| CodecError::InvalidText { codepage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_roundtrip() {
        let encoded = encode("héllo, wörld", Codepage::Utf8);
        assert_eq!(decode(&encoded, Codepage::Utf8).unwrap(), "héllo, wörld");
    }

    #[test]
    fn utf16_roundtrip_both_orders() {
        for codepage in [Codepage::Utf16Le, Codepage::Utf16Be] {
            let encoded = encode("snow☃man", codepage);
            assert_eq!(decode(&encoded, codepage).unwrap(), "snow☃man");
        }
    }

    #[test]
    fn utf16_unit_layout() {
        // 'A' is unit 0x0041.
        assert_eq!(encode("A", Codepage::Utf16Le).as_ref(), [0x41, 0x00]);
        assert_eq!(encode("A", Codepage::Utf16Be).as_ref(), [0x00, 0x41]);
    }

    #[test]
    fn utf16_for_matches_order() {
        assert_eq!(Codepage::utf16_for(ByteOrder::Little), Codepage::Utf16Le);
        assert_eq!(Codepage::utf16_for(ByteOrder::Big), Codepage::Utf16Be);
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = decode(&[0xFF, 0xFE, 0xFD], Codepage::Utf8).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidText {
                codepage: Codepage::Utf8
            }
        ));
    }

    #[test]
    fn odd_length_utf16_rejected() {
        let err = decode(&[0x41, 0x00, 0x42], Codepage::Utf16Le).unwrap_err();
        assert!(matches!(err, CodecError::InvalidText { .. }));
    }

    #[test]
    fn unpaired_surrogate_rejected() {
        // 0xD800 is a lone high surrogate.
        let err = decode(&[0x00, 0xD8], Codepage::Utf16Le).unwrap_err();
        assert!(matches!(err, CodecError::InvalidText { .. }));
    }
}
