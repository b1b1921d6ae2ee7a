//! [JSON Web Key](https://www.rfc-editor.org/rfc/rfc7517).

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::material::{AgreementType, AuthenticationType, KnownVerificationMaterialType};

/// A JWK as a flat record. Members absent from the input are omitted
/// when serialized.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    pub key_ops: Option<Vec<String>>,
    pub alg: Option<String>,
    pub kid: Option<String>,
    pub x5u: Option<String>,
    pub x5c: Option<Vec<String>>,
    pub x5t: Option<String>,
    #[serde(rename = "x5t#S256")]
    pub x5t_s256: Option<String>,

    /// RSA modulus.
    pub n: Option<String>,
    /// RSA exponent.
    pub e: Option<String>,

    pub crv: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    /// Private key. Never produced by this crate.
    pub d: Option<String>,

    /// Symmetric key value.
    pub k: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwkError {
    #[error("key type {0} has no OKP JWK representation")]
    UnsupportedKeyType(String),
}

impl Jwk {
    /// Builds an OKP key from raw public key bytes.
    ///
    /// Only `JsonWebKey2020` is accepted: as an agreement key it becomes an
    /// `X25519` key, as an authentication key an `Ed25519` key.
    pub fn from_okp_key(key: &[u8], typ: KnownVerificationMaterialType) -> Result<Self, JwkError> {
        let crv = match typ {
            KnownVerificationMaterialType::Agreement(AgreementType::JsonWebKey2020) => "X25519",
            KnownVerificationMaterialType::Authentication(AuthenticationType::JsonWebKey2020) => {
                "Ed25519"
            }
            other => return Err(JwkError::UnsupportedKeyType(other.to_string())),
        };

        Ok(Self {
            kty: "OKP".to_string(),
            crv: Some(crv.to_string()),
            x: Some(URL_SAFE_NO_PAD.encode(key)),
            ..Default::default()
        })
    }
}
