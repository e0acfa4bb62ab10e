//! Base-62 positional encoding used for short codes.
//!
//! Digits come first, then lowercase, then uppercase letters. The most
//! significant character is written first, so `encode(62) == "10"`.

use thiserror::Error;

/// The base-62 alphabet, in digit order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// `u64::MAX` needs 11 base-62 digits.
pub const MAX_ENCODED_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("encoded value is empty")]
    Empty,
    #[error("invalid base62 character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("encoded value overflows u64")]
    Overflow,
}

/// Returns `true` if `c` belongs to the base-62 alphabet.
pub fn is_base62_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Encodes `value` as a base-62 string. Zero encodes to `"0"`.
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut buf = [0u8; MAX_ENCODED_LEN];
    let mut start = buf.len();
    while value > 0 {
        start -= 1;
        buf[start] = ALPHABET[(value % BASE) as usize];
        value /= BASE;
    }

    // every byte comes from the ASCII alphabet
    buf[start..].iter().map(|&b| char::from(b)).collect()
}

/// Encodes `value` and left-pads the result with the zero digit up to `width`.
///
/// The output is never truncated: values that need more than `width`
/// digits come back at their natural length.
pub fn encode_padded(value: u64, width: usize) -> String {
    let encoded = encode(value);
    if encoded.len() >= width {
        return encoded;
    }

    let mut padded = String::with_capacity(width);
    padded.extend(std::iter::repeat(char::from(ALPHABET[0])).take(width - encoded.len()));
    padded.push_str(&encoded);
    padded
}

/// Decodes a base-62 string produced by [`encode`] or [`encode_padded`].
pub fn decode(encoded: &str) -> Result<u64, DecodeError> {
    if encoded.is_empty() {
        return Err(DecodeError::Empty);
    }

    encoded
        .chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, character)| {
            let digit = digit_value(character)
                .ok_or(DecodeError::InvalidCharacter { character, position })?;
            acc.checked_mul(BASE)
                .and_then(|v| v.checked_add(digit))
                .ok_or(DecodeError::Overflow)
        })
}

fn digit_value(c: char) -> Option<u64> {
    let value = match c {
        '0'..='9' => c as u64 - '0' as u64,
        'a'..='z' => c as u64 - 'a' as u64 + 10,
        'A'..='Z' => c as u64 - 'A' as u64 + 36,
        _ => return None,
    };
    Some(value)
}

/// Number of distinct codes of exactly `width` characters, or `None` if it
/// does not fit in a `u64`.
pub fn code_space(width: u32) -> Option<u64> {
    BASE.checked_pow(width)
}
