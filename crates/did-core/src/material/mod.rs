//! Public key material attached to a verification method, and conversion
//! between its interchange encodings.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use multibase::Base;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    jwk::{Jwk, JwkError},
    multicodec::{self, Codec, MulticodecError},
};

mod key_type;

pub use key_type::*;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMaterialFormat {
    Jwk,
    Base58,
    Multibase,
}

impl VerificationMaterialFormat {
    pub const ALL: [Self; 3] = [Self::Jwk, Self::Base58, Self::Multibase];

    /// The verification method member that carries this format.
    pub fn key_name(self) -> &'static str {
        match self {
            Self::Jwk => "publicKeyJwk",
            Self::Base58 => "publicKeyBase58",
            Self::Multibase => "publicKeyMultibase",
        }
    }

    pub fn from_key_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key_name() == name)
    }
}

#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("JWK has no decodable \"x\" member")]
    UnsupportedJwkKeyDecoding,
    #[error("invalid encoded key text: {0}")]
    InvalidEncodedText(String),
    #[error("invalid JWK JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Jwk(#[from] JwkError),
    #[error(transparent)]
    Multicodec(#[from] MulticodecError),
    #[error("unknown verification material type: {0}")]
    UnknownKeyType(String),
}

/// Encoded key material.
///
/// `value` holds the JSON text of a JWK for [`VerificationMaterialFormat::Jwk`],
/// and the encoded key string otherwise. Raw key bytes are only reachable
/// through [`VerificationMaterial::decoded_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerificationMaterial {
    format: VerificationMaterialFormat,
    value: Vec<u8>,
}

impl VerificationMaterial {
    pub fn new(format: VerificationMaterialFormat, value: impl Into<Vec<u8>>) -> Self {
        Self {
            format,
            value: value.into(),
        }
    }

    pub fn format(&self) -> VerificationMaterialFormat {
        self.format
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn from_jwk(jwk: &Jwk) -> Result<Self, MaterialError> {
        Ok(Self::new(
            VerificationMaterialFormat::Jwk,
            serde_json::to_vec(jwk)?,
        ))
    }

    pub fn from_key_to_base58(key: &[u8]) -> Self {
        Self::new(
            VerificationMaterialFormat::Base58,
            bs58::encode(key).into_string(),
        )
    }

    /// Multicodec-prefixes `key` and encodes it as base58btc multibase.
    pub fn from_key_to_multibase(key: &[u8], codec: Codec) -> Self {
        let inner = multicodec::wrap(key, codec);
        Self::new(
            VerificationMaterialFormat::Multibase,
            multibase::encode(Base::Base58Btc, inner),
        )
    }

    /// Encodes raw key bytes in `format`. `typ` picks the JWK curve or the
    /// multicodec prefix; it is unused for base58.
    pub fn from_key(
        format: VerificationMaterialFormat,
        key: &[u8],
        typ: KnownVerificationMaterialType,
    ) -> Result<Self, MaterialError> {
        match format {
            VerificationMaterialFormat::Jwk => Self::from_jwk(&Jwk::from_okp_key(key, typ)?),
            VerificationMaterialFormat::Base58 => Ok(Self::from_key_to_base58(key)),
            VerificationMaterialFormat::Multibase => {
                Ok(Self::from_key_to_multibase(key, Codec::from(typ)))
            }
        }
    }

    /// Parses the stored JWK. `None` if the material is not a JWK.
    pub fn jwk(&self) -> Result<Option<Jwk>, MaterialError> {
        match self.format {
            VerificationMaterialFormat::Jwk => Ok(Some(serde_json::from_slice(&self.value)?)),
            _ => Ok(None),
        }
    }

    /// The stored encoding as text. Fails for JWK material that is not UTF-8 too.
    pub fn text(&self) -> Result<&str, MaterialError> {
        std::str::from_utf8(&self.value)
            .map_err(|e| MaterialError::InvalidEncodedText(e.to_string()))
    }

    /// Raw public key bytes.
    ///
    /// Only the `x` member of a JWK is read.
    pub fn decoded_key(&self) -> Result<Vec<u8>, MaterialError> {
        match self.format {
            VerificationMaterialFormat::Jwk => {
                let jwk: Jwk = serde_json::from_slice(&self.value)?;
                let x = jwk.x.ok_or(MaterialError::UnsupportedJwkKeyDecoding)?;
                URL_SAFE_NO_PAD
                    .decode(x)
                    .map_err(|_| MaterialError::UnsupportedJwkKeyDecoding)
            }
            VerificationMaterialFormat::Base58 => bs58::decode(self.text()?)
                .into_vec()
                .map_err(|e| MaterialError::InvalidEncodedText(e.to_string())),
            VerificationMaterialFormat::Multibase => {
                let (base, inner) = multibase::decode(self.text()?)
                    .map_err(|e| MaterialError::InvalidEncodedText(e.to_string()))?;

                if base != Base::Base58Btc {
                    debug!("Decoding multibase key with non-base58btc base {:?}", base);
                }

                let (_, key) = multicodec::unwrap(&inner)?;
                Ok(key.to_vec())
            }
        }
    }

    /// Re-encodes the key in `target`.
    ///
    /// The key type is normalized to the name conventionally paired with
    /// `target` before encoding, so e.g. an `Ed25519VerificationKey2018`
    /// becomes a `JsonWebKey2020` with curve `Ed25519`.
    pub fn convert_to(
        &self,
        target: VerificationMaterialFormat,
        typ: KnownVerificationMaterialType,
    ) -> Result<Self, MaterialError> {
        if self.format == target {
            return Ok(self.clone());
        }

        debug!("Converting verification material {:?} -> {:?}", self.format, target);

        let key = self.decoded_key()?;
        Self::from_key(target, &key, typ.canonical_for(target))
    }

    pub fn convert_to_jwk(
        &self,
        typ: KnownVerificationMaterialType,
    ) -> Result<Self, MaterialError> {
        self.convert_to(VerificationMaterialFormat::Jwk, typ)
    }

    pub fn convert_to_base58(
        &self,
        typ: KnownVerificationMaterialType,
    ) -> Result<Self, MaterialError> {
        self.convert_to(VerificationMaterialFormat::Base58, typ)
    }

    pub fn convert_to_multibase(
        &self,
        typ: KnownVerificationMaterialType,
    ) -> Result<Self, MaterialError> {
        self.convert_to(VerificationMaterialFormat::Multibase, typ)
    }
}
