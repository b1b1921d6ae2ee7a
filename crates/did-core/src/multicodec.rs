//! [Multicodec](https://github.com/multiformats/multicodec) prefixes for
//! public key bytes.

use thiserror::Error;

use crate::{
    material::KnownVerificationMaterialType,
    varint::{VarintError, decode_uvarint, encode_uvarint},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// `x25519-pub`
    X25519,
    /// `ed25519-pub`
    Ed25519,
}

impl Codec {
    pub const fn code(self) -> u64 {
        match self {
            Self::X25519 => 0xec,
            Self::Ed25519 => 0xed,
        }
    }

    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            0xec => Some(Self::X25519),
            0xed => Some(Self::Ed25519),
            _ => None,
        }
    }

    /// The varint-encoded code.
    pub fn prefix(self) -> Vec<u8> {
        encode_uvarint(self.code())
    }
}

impl From<KnownVerificationMaterialType> for Codec {
    fn from(value: KnownVerificationMaterialType) -> Self {
        match value {
            KnownVerificationMaterialType::Authentication(_) => Self::Ed25519,
            KnownVerificationMaterialType::Agreement(_) => Self::X25519,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulticodecError {
    #[error("unknown multicodec: {0:#x}")]
    UnknownCodec(u64),
    #[error("invalid multicodec prefix: {0}")]
    Varint(#[from] VarintError),
}

/// Prepends the codec prefix to `key`.
pub fn wrap(key: &[u8], codec: Codec) -> Vec<u8> {
    let code = codec.prefix();

    let mut inner = Vec::with_capacity(code.len() + key.len());
    inner.extend(code);
    inner.extend_from_slice(key);
    inner
}

/// Splits a prefixed buffer into its codec and the remaining key bytes.
pub fn unwrap(bytes: &[u8]) -> Result<(Codec, &[u8]), MulticodecError> {
    let (code, read) = decode_uvarint(bytes)?;
    let codec = Codec::from_code(code).ok_or(MulticodecError::UnknownCodec(code))?;
    Ok((codec, &bytes[read..]))
}
