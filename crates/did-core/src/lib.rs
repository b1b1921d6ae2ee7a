//! Core [DID](https://www.w3.org/TR/did-core/) types.
//!
//! - [did::Did] and [did_url::DidUrl] parse and render identifiers.
//! - [document::DidDocument] models a DID document, including the fields
//!   DID Core allows in more than one shape.
//! - [material::VerificationMaterial] converts public keys between JWK,
//!   base58 and multibase encodings.
//!
//! ```
//! use did_core::{
//!     did_url::DidUrl,
//!     material::{
//!         AuthenticationType, KnownVerificationMaterialType, VerificationMaterial,
//!         VerificationMaterialFormat,
//!     },
//! };
//!
//! let url: DidUrl = "did:example:123?service=agent#degree".parse().unwrap();
//! assert_eq!(url.query("service"), Some("agent"));
//!
//! let material = VerificationMaterial::new(
//!     VerificationMaterialFormat::Multibase,
//!     "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK",
//! );
//! let jwk = material
//!     .convert_to_jwk(KnownVerificationMaterialType::Authentication(
//!         AuthenticationType::Ed25519VerificationKey2020,
//!     ))
//!     .unwrap();
//! assert_eq!(jwk.decoded_key().unwrap(), material.decoded_key().unwrap());
//! ```

pub mod did;
pub mod did_url;
pub mod document;
pub mod jwk;
pub mod material;
pub mod multicodec;
mod uri;
pub mod varint;
