use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use serde_with::skip_serializing_none;
use tracing::debug;

use super::DocumentError;

/// [Service](https://www.w3.org/TR/did-core/#services).
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub service_endpoint: ServiceEndpoint,
    /// DIDComm routing keys.
    pub routing_keys: Option<Vec<String>>,
    /// DIDComm accepted media types.
    pub accept: Option<Vec<String>>,
}

/// The value of `serviceEndpoint`, whose shape DID Core leaves open.
///
/// Decoding tries, in order: string, list of strings, string map, then a
/// list mixing strings and string maps.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ServiceEndpoint {
    String(String),
    Set(Vec<String>),
    Map(BTreeMap<String, String>),
    Combo(Vec<EndpointElement>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EndpointElement {
    String(String),
    Map(BTreeMap<String, String>),
}

impl ServiceEndpoint {
    fn probe(value: &Value) -> Option<Self> {
        if let Ok(s) = String::deserialize(value) {
            return Some(Self::String(s));
        }
        debug!("Service endpoint is not a string");

        if let Ok(set) = Vec::<String>::deserialize(value) {
            return Some(Self::Set(set));
        }
        debug!("Service endpoint is not a set of strings");

        if let Ok(map) = BTreeMap::<String, String>::deserialize(value) {
            return Some(Self::Map(map));
        }
        debug!("Service endpoint is not a string map");

        Vec::<EndpointElement>::deserialize(value)
            .ok()
            .map(Self::Combo)
    }
}

impl From<String> for ServiceEndpoint {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<'de> Deserialize<'de> for ServiceEndpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::probe(&value)
            .ok_or_else(|| de::Error::custom(DocumentError::AmbiguousServiceEndpointShape))
    }
}
