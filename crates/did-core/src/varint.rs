//! Unsigned LEB128 integers, as used by multicodec prefixes.

use thiserror::Error;
use unsigned_varint::{decode, encode};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    #[error("varint is truncated")]
    Truncated,
    #[error("varint overflows 64 bits")]
    Overflow,
    #[error("varint is not minimally encoded")]
    NotMinimal,
}

impl From<decode::Error> for VarintError {
    fn from(value: decode::Error) -> Self {
        match value {
            decode::Error::Insufficient => Self::Truncated,
            decode::Error::NotMinimal => Self::NotMinimal,
            _ => Self::Overflow,
        }
    }
}

pub fn encode_uvarint(value: u64) -> Vec<u8> {
    let mut buffer = encode::u64_buffer();
    encode::u64(value, &mut buffer).to_vec()
}

/// Decodes a varint from the start of `bytes`, returning the value and the
/// number of bytes it occupied.
pub fn decode_uvarint(bytes: &[u8]) -> Result<(u64, usize), VarintError> {
    let (value, rest) = decode::u64(bytes)?;
    let consumed = bytes.len() - rest.len();

    // The tenth byte may only carry the 64th bit.
    if consumed == MAX_LEN && bytes[MAX_LEN - 1] > 1 {
        return Err(VarintError::Overflow);
    }

    Ok((value, consumed))
}

const MAX_LEN: usize = 10;
