use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::Value;
use serde_with::skip_serializing_none;
use tracing::debug;

use crate::material::{
    KnownVerificationMaterialType, MaterialError, VerificationMaterial, VerificationMaterialFormat,
};

use super::DocumentError;

/// [Verification method](https://www.w3.org/TR/did-core/#verification-methods).
///
/// On the wire the material is carried by exactly one of `publicKeyBase58`,
/// `publicKeyJwk` or `publicKeyMultibase`.
///
/// Decoding does not check that `typ` names a key type paired with the
/// material's format; a method read from JSON keeps its `type` as given.
/// [`VerificationMethod::convert_to`] rewrites `typ` to the name that
/// goes with the target format whenever the format changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationMethod {
    pub id: String,
    pub controller: String,
    pub typ: String,
    pub material: VerificationMaterial,
}

/// Members are probed in this order when decoding; the first decodable one wins.
const DECODE_ORDER: [VerificationMaterialFormat; 3] = [
    VerificationMaterialFormat::Base58,
    VerificationMaterialFormat::Jwk,
    VerificationMaterialFormat::Multibase,
];

impl VerificationMethod {
    pub fn known_type(&self) -> Result<KnownVerificationMaterialType, MaterialError> {
        self.typ.parse()
    }

    pub fn decoded_key(&self) -> Result<Vec<u8>, MaterialError> {
        self.material.decoded_key()
    }

    /// Re-encodes the material in `target`, rewriting `typ` to the key type
    /// name that goes with that format.
    pub fn convert_to(&self, target: VerificationMaterialFormat) -> Result<Self, MaterialError> {
        if self.material.format() == target {
            return Ok(self.clone());
        }

        let typ = self.known_type()?;

        Ok(Self {
            id: self.id.clone(),
            controller: self.controller.clone(),
            typ: typ.canonical_for(target).to_string(),
            material: self.material.convert_to(target, typ)?,
        })
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerificationMethodRepr {
    id: String,
    controller: String,
    #[serde(rename = "type")]
    typ: String,
    public_key_base58: Option<Value>,
    public_key_jwk: Option<Value>,
    public_key_multibase: Option<Value>,
}

impl VerificationMethodRepr {
    fn slot(&mut self, format: VerificationMaterialFormat) -> &mut Option<Value> {
        match format {
            VerificationMaterialFormat::Base58 => &mut self.public_key_base58,
            VerificationMaterialFormat::Jwk => &mut self.public_key_jwk,
            VerificationMaterialFormat::Multibase => &mut self.public_key_multibase,
        }
    }
}

fn decode_material(
    format: VerificationMaterialFormat,
    value: Value,
) -> Result<VerificationMaterial, MaterialError> {
    let candidate = match (format, value) {
        (VerificationMaterialFormat::Jwk, value) => {
            VerificationMaterial::from_jwk(&serde_json::from_value(value)?)?
        }
        (_, Value::String(text)) => VerificationMaterial::new(format, text),
        _ => {
            return Err(MaterialError::InvalidEncodedText(
                "expected a string".to_string(),
            ));
        }
    };

    // A member only counts if its raw key can be extracted.
    candidate.decoded_key()?;

    Ok(candidate)
}

/// The JSON value written under the material's key member: the JWK
/// object, or the encoded key string.
fn encode_material(material: &VerificationMaterial) -> Result<Value, MaterialError> {
    match material.jwk()? {
        Some(jwk) => Ok(serde_json::to_value(jwk)?),
        None => Ok(Value::String(material.text()?.to_string())),
    }
}

impl<'de> Deserialize<'de> for VerificationMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut repr = VerificationMethodRepr::deserialize(deserializer)?;

        let mut material = None;

        for format in DECODE_ORDER {
            let Some(value) = repr.slot(format).take() else {
                continue;
            };

            match decode_material(format, value) {
                Ok(m) => {
                    material = Some(m);
                    break;
                }
                Err(e) => debug!("Skipping {} of {}: {}", format.key_name(), repr.id, e),
            }
        }

        let Some(material) = material else {
            return Err(de::Error::custom(DocumentError::NoValidKeyMaterial));
        };

        Ok(Self {
            id: repr.id,
            controller: repr.controller,
            typ: repr.typ,
            material,
        })
    }
}

impl Serialize for VerificationMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut repr = VerificationMethodRepr {
            id: self.id.clone(),
            controller: self.controller.clone(),
            typ: self.typ.clone(),
            public_key_base58: None,
            public_key_jwk: None,
            public_key_multibase: None,
        };

        let format = self.material.format();

        let value = match encode_material(&self.material) {
            Ok(value) => value,
            Err(e) => return Err(ser::Error::custom(e)),
        };

        *repr.slot(format) = Some(value);

        repr.serialize(serializer)
    }
}

/// An entry of a verification relationship: either a reference to a
/// verification method by id, or the method itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationMethodMapping {
    Reference(String),
    Embedded(Box<VerificationMethod>),
}

impl VerificationMethodMapping {
    /// The referenced or embedded method id.
    pub fn id(&self) -> &str {
        match self {
            Self::Reference(id) => id,
            Self::Embedded(method) => &method.id,
        }
    }
}

impl From<VerificationMethod> for VerificationMethodMapping {
    fn from(value: VerificationMethod) -> Self {
        Self::Embedded(Box::new(value))
    }
}

impl From<String> for VerificationMethodMapping {
    fn from(value: String) -> Self {
        Self::Reference(value)
    }
}

impl<'de> Deserialize<'de> for VerificationMethodMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(Self::Reference(id)),
            other => serde_json::from_value::<VerificationMethod>(other)
                .map(Self::from)
                .map_err(de::Error::custom),
        }
    }
}

impl Serialize for VerificationMethodMapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Reference(id) => serializer.serialize_str(id),
            Self::Embedded(method) => method.serialize(serializer),
        }
    }
}
