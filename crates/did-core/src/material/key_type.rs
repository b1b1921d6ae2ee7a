use std::{fmt::Display, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::{MaterialError, VerificationMaterialFormat};

/// Key types usable for key agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgreementType {
    JsonWebKey2020,
    X25519KeyAgreementKey2019,
    X25519KeyAgreementKey2020,
}

impl AgreementType {
    const ALL: [Self; 3] = [
        Self::JsonWebKey2020,
        Self::X25519KeyAgreementKey2019,
        Self::X25519KeyAgreementKey2020,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsonWebKey2020 => "JsonWebKey2020",
            Self::X25519KeyAgreementKey2019 => "X25519KeyAgreementKey2019",
            Self::X25519KeyAgreementKey2020 => "X25519KeyAgreementKey2020",
        }
    }
}

/// Key types usable for authentication and assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthenticationType {
    JsonWebKey2020,
    Ed25519VerificationKey2018,
    Ed25519VerificationKey2020,
    EcdsaSecp256k1VerificationKey2019,
    Bls12381G1Key2020,
    Bls12381G2Key2020,
    PgpVerificationKey2021,
    EcdsaSecp256k1RecoveryMethod2020,
    VerifiableCondition2021,
}

impl AuthenticationType {
    const ALL: [Self; 9] = [
        Self::JsonWebKey2020,
        Self::Ed25519VerificationKey2018,
        Self::Ed25519VerificationKey2020,
        Self::EcdsaSecp256k1VerificationKey2019,
        Self::Bls12381G1Key2020,
        Self::Bls12381G2Key2020,
        Self::PgpVerificationKey2021,
        Self::EcdsaSecp256k1RecoveryMethod2020,
        Self::VerifiableCondition2021,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsonWebKey2020 => "JsonWebKey2020",
            Self::Ed25519VerificationKey2018 => "Ed25519VerificationKey2018",
            Self::Ed25519VerificationKey2020 => "Ed25519VerificationKey2020",
            Self::EcdsaSecp256k1VerificationKey2019 => "EcdsaSecp256k1VerificationKey2019",
            Self::Bls12381G1Key2020 => "Bls12381G1Key2020",
            Self::Bls12381G2Key2020 => "Bls12381G2Key2020",
            Self::PgpVerificationKey2021 => "PgpVerificationKey2021",
            Self::EcdsaSecp256k1RecoveryMethod2020 => "EcdsaSecp256k1RecoveryMethod2020",
            Self::VerifiableCondition2021 => "VerifiableCondition2021",
        }
    }
}

/// A verification method `type` this crate knows how to convert, split by
/// the relationship the key serves.
///
/// `JsonWebKey2020` appears on both sides; parsing resolves it to
/// [`KnownVerificationMaterialType::Agreement`].
#[derive(SerializeDisplay, DeserializeFromStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownVerificationMaterialType {
    Agreement(AgreementType),
    Authentication(AuthenticationType),
}

impl KnownVerificationMaterialType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agreement(t) => t.as_str(),
            Self::Authentication(t) => t.as_str(),
        }
    }

    pub fn is_agreement(self) -> bool {
        matches!(self, Self::Agreement(_))
    }

    pub fn is_authentication(self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// The key type name conventionally paired with `format`, keeping the
    /// agreement/authentication axis of `self`.
    pub fn canonical_for(self, format: VerificationMaterialFormat) -> Self {
        match (format, self.is_agreement()) {
            (VerificationMaterialFormat::Jwk, true) => {
                Self::Agreement(AgreementType::JsonWebKey2020)
            }
            (VerificationMaterialFormat::Jwk, false) => {
                Self::Authentication(AuthenticationType::JsonWebKey2020)
            }
            (VerificationMaterialFormat::Base58, true) => {
                Self::Agreement(AgreementType::X25519KeyAgreementKey2019)
            }
            (VerificationMaterialFormat::Base58, false) => {
                Self::Authentication(AuthenticationType::Ed25519VerificationKey2018)
            }
            (VerificationMaterialFormat::Multibase, true) => {
                Self::Agreement(AgreementType::X25519KeyAgreementKey2020)
            }
            (VerificationMaterialFormat::Multibase, false) => {
                Self::Authentication(AuthenticationType::Ed25519VerificationKey2020)
            }
        }
    }
}

impl Display for KnownVerificationMaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownVerificationMaterialType {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = AgreementType::ALL.into_iter().find(|t| t.as_str() == s) {
            return Ok(Self::Agreement(t));
        }

        AuthenticationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .map(Self::Authentication)
            .ok_or_else(|| MaterialError::UnknownKeyType(s.to_string()))
    }
}
