//! Fixed length text payload and its bit representation.
//!
//! The payload is always exactly [`PAYLOAD_CHARS`] characters. Shorter text is padded with spaces
//! on the right, longer text is truncated. Every character is stored as a single byte, most
//! significant bit first, so only characters up to U+00FF can be carried; anything else is
//! replaced with `?`.

use log::warn;
use std::fmt;

/// Number of characters in a payload.
pub const PAYLOAD_CHARS: usize = 4;

/// Number of bits in a payload.
pub const PAYLOAD_BITS: usize = PAYLOAD_CHARS * 8;

/// The bits of a payload, in embedding order.
pub type Bits = [bool; PAYLOAD_BITS];

const PADDING: u8 = b' ';
const REPLACEMENT: u8 = b'?';

/// A normalized payload of exactly [`PAYLOAD_CHARS`] characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Payload {
    bytes: [u8; PAYLOAD_CHARS],
}

impl Payload {
    /// Normalize the text into a payload.
    pub fn new(text: &str) -> Self {
        let mut bytes = [PADDING; PAYLOAD_CHARS];
        for (slot, c) in bytes.iter_mut().zip(text.chars()) {
            *slot = u8::try_from(u32::from(c)).unwrap_or_else(|_| {
                warn!("character {c:?} does not fit in a byte, replaced with '?'");
                REPLACEMENT
            });
        }
        Payload { bytes }
    }

    /// Reassemble a payload from its bits.
    pub fn from_bits(bits: &Bits) -> Self {
        let mut bytes = [0u8; PAYLOAD_CHARS];
        for (byte, chunk) in bytes.iter_mut().zip(bits.chunks(8)) {
            *byte = chunk
                .iter()
                .fold(0u8, |acc, bit| (acc << 1) | u8::from(*bit));
        }
        Payload { bytes }
    }

    /// The bits of this payload, most significant bit of the first character first.
    pub fn to_bits(&self) -> Bits {
        let mut bits = [false; PAYLOAD_BITS];
        for (i, bit) in bits.iter_mut().enumerate() {
            let byte = self.bytes[i / 8];
            *bit = (byte >> (7 - i % 8)) & 1 == 1;
        }
        bits
    }

    pub fn bytes(&self) -> &[u8; PAYLOAD_CHARS] {
        &self.bytes
    }

    /// The full payload, always [`PAYLOAD_CHARS`] characters including padding.
    pub fn as_string(&self) -> String {
        self.bytes.iter().map(|b| char::from(*b)).collect()
    }

    /// The payload with trailing whitespace removed.
    pub fn text(&self) -> String {
        self.as_string().trim_end().to_owned()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Convert text into the bits to embed.
pub fn encode(text: &str) -> Bits {
    Payload::new(text).to_bits()
}

/// Convert recovered bits back into text, trailing whitespace is trimmed.
pub fn decode(bits: &Bits) -> String {
    Payload::from_bits(bits).text()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from_str(s: &str) -> Bits {
        let mut bits = [false; PAYLOAD_BITS];
        for (bit, c) in bits.iter_mut().zip(s.chars().filter(|c| *c != ' ')) {
            *bit = c == '1';
        }
        bits
    }

    #[test]
    fn test_encode_msb_first() {
        // 'H' = 0x48, 'i' = 0x69, ' ' = 0x20.
        let expected = bits_from_str("01001000 01101001 00100000 00100000");
        assert_eq!(encode("Hi"), expected);
    }

    #[test]
    fn test_padding_and_truncation() {
        assert_eq!(Payload::new("Hi").as_string(), "Hi  ");
        assert_eq!(Payload::new("").as_string(), "    ");
        assert_eq!(Payload::new("Hello").as_string(), "Hell");
    }

    #[test]
    fn test_decode_trims_right_only() {
        assert_eq!(decode(&encode("Hi")), "Hi");
        assert_eq!(decode(&encode(" ab")), " ab");
        assert_eq!(decode(&encode("    ")), "");
    }

    #[test]
    fn test_from_bits_inverts_to_bits() {
        let payload = Payload::new("W4t!");
        assert_eq!(Payload::from_bits(&payload.to_bits()), payload);
    }

    #[test]
    fn test_latin1_and_replacement() {
        assert_eq!(Payload::new("é").bytes(), &[0xE9, b' ', b' ', b' ']);
        assert_eq!(Payload::new("a€b").as_string(), "a?b ");
        // Truncation counts characters, not bytes.
        assert_eq!(Payload::new("ééééé").as_string(), "éééé");
    }

    #[test]
    fn test_arbitrary_bits_give_four_chars() {
        let bits = [true; PAYLOAD_BITS];
        let payload = Payload::from_bits(&bits);
        assert_eq!(payload.as_string().chars().count(), PAYLOAD_CHARS);
        assert_eq!(payload.bytes(), &[0xFF; PAYLOAD_CHARS]);
    }
}
