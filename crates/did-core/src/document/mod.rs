use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, formats::PreferOne, serde_as, skip_serializing_none};
use thiserror::Error;
use tracing::debug;

use crate::did::Did;

mod service;
mod verification_method;

pub use service::*;
pub use verification_method::*;

/// [DID document](https://www.w3.org/TR/did-core/#core-properties).
#[serde_as]
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    pub id: Did,
    #[serde_as(as = "Option<OneOrMany<_, PreferOne>>")]
    pub also_known_as: Option<Vec<String>>,
    #[serde_as(as = "Option<OneOrMany<_, PreferOne>>")]
    pub controller: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verification_method: Vec<VerificationMethod>,
    pub authentication: Option<Vec<VerificationMethodMapping>>,
    pub assertion_method: Option<Vec<VerificationMethodMapping>>,
    pub capability_delegation: Option<Vec<VerificationMethodMapping>>,
    pub key_agreement: Option<Vec<VerificationMethodMapping>>,
    pub service: Option<Vec<Service>>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    #[error("no valid key material in publicKeyBase58, publicKeyJwk or publicKeyMultibase")]
    NoValidKeyMaterial,
    #[error("service endpoint is not a string, a set, a map, or a list of strings and maps")]
    AmbiguousServiceEndpointShape,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VerificationRelationship {
    Authentication,
    AssertionMethod,
    CapabilityDelegation,
    KeyAgreement,
}

impl DidDocument {
    pub fn builder(id: Did) -> DidDocumentBuilder {
        DidDocumentBuilder::new(id)
    }

    /// Entries of a verification relationship, empty if absent.
    pub fn relationship(
        &self,
        relationship: VerificationRelationship,
    ) -> &[VerificationMethodMapping] {
        let entries = match relationship {
            VerificationRelationship::Authentication => &self.authentication,
            VerificationRelationship::AssertionMethod => &self.assertion_method,
            VerificationRelationship::CapabilityDelegation => &self.capability_delegation,
            VerificationRelationship::KeyAgreement => &self.key_agreement,
        };
        entries.as_deref().unwrap_or_default()
    }

    /// Finds a method in `verificationMethod`. Ids match either exactly or
    /// after expanding a document-relative `#fragment` against the document id.
    pub fn verification_method_by_id(&self, id: &str) -> Option<&VerificationMethod> {
        let id = self.absolute_id(id);
        self.verification_method
            .iter()
            .find(|m| self.absolute_id(&m.id) == id)
    }

    /// The methods a verification relationship grants, with references
    /// resolved against `verificationMethod`. Dangling references are skipped.
    pub fn resolve_verification_methods(
        &self,
        relationship: VerificationRelationship,
    ) -> Vec<&VerificationMethod> {
        self.relationship(relationship)
            .iter()
            .filter_map(|mapping| match mapping {
                VerificationMethodMapping::Embedded(method) => Some(method.as_ref()),
                VerificationMethodMapping::Reference(id) => {
                    let method = self.verification_method_by_id(id);
                    if method.is_none() {
                        debug!("Unresolved {:?} reference {}", relationship, id);
                    }
                    method
                }
            })
            .collect()
    }

    pub fn service_by_id(&self, id: &str) -> Option<&Service> {
        let id = self.absolute_id(id);
        self.service
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|s| self.absolute_id(&s.id) == id)
    }

    fn absolute_id(&self, id: &str) -> String {
        if id.starts_with('#') {
            format!("{}{}", self.id, id)
        } else {
            id.to_string()
        }
    }
}

/// Assembles a [DidDocument] without going through JSON.
pub struct DidDocumentBuilder {
    document: DidDocument,
}

impl DidDocumentBuilder {
    pub fn new(id: Did) -> Self {
        Self {
            document: DidDocument {
                id,
                also_known_as: None,
                controller: None,
                verification_method: Vec::new(),
                authentication: None,
                assertion_method: None,
                capability_delegation: None,
                key_agreement: None,
                service: None,
            },
        }
    }

    pub fn also_known_as(mut self, value: String) -> Self {
        self.document
            .also_known_as
            .get_or_insert_with(Vec::new)
            .push(value);
        self
    }

    pub fn controller(mut self, value: String) -> Self {
        self.document
            .controller
            .get_or_insert_with(Vec::new)
            .push(value);
        self
    }

    pub fn verification_method(mut self, value: VerificationMethod) -> Self {
        self.document.verification_method.push(value);
        self
    }

    pub fn relationship(
        mut self,
        relationship: VerificationRelationship,
        value: impl Into<VerificationMethodMapping>,
    ) -> Self {
        let entries = match relationship {
            VerificationRelationship::Authentication => &mut self.document.authentication,
            VerificationRelationship::AssertionMethod => &mut self.document.assertion_method,
            VerificationRelationship::CapabilityDelegation => {
                &mut self.document.capability_delegation
            }
            VerificationRelationship::KeyAgreement => &mut self.document.key_agreement,
        };
        entries.get_or_insert_with(Vec::new).push(value.into());
        self
    }

    pub fn authentication(self, value: impl Into<VerificationMethodMapping>) -> Self {
        self.relationship(VerificationRelationship::Authentication, value)
    }

    pub fn assertion_method(self, value: impl Into<VerificationMethodMapping>) -> Self {
        self.relationship(VerificationRelationship::AssertionMethod, value)
    }

    pub fn capability_delegation(self, value: impl Into<VerificationMethodMapping>) -> Self {
        self.relationship(VerificationRelationship::CapabilityDelegation, value)
    }

    pub fn key_agreement(self, value: impl Into<VerificationMethodMapping>) -> Self {
        self.relationship(VerificationRelationship::KeyAgreement, value)
    }

    pub fn service(mut self, value: Service) -> Self {
        self.document
            .service
            .get_or_insert_with(Vec::new)
            .push(value);
        self
    }

    pub fn build(self) -> DidDocument {
        self.document
    }
}
