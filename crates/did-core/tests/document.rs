use std::str::FromStr;

use did_core::{
    did::Did,
    document::{
        DidDocument, Service, ServiceEndpoint, VerificationMethod, VerificationMethodMapping,
        VerificationRelationship,
    },
    material::{VerificationMaterial, VerificationMaterialFormat},
};
use serde_json::{Value, json};
use tracing_test::traced_test;

const EXPECTED_RAW: &[u8] = include_bytes!("./document-expected.json");

const ED25519_MULTIBASE: &str = "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";
const X25519_MULTIBASE: &str = "z6LSj72tK8brWgZja8NLRwPigth2T9QRiG1uH9oKZuKjdh9p";
const X25519_BASE58: &str = "8RrinpnzRDqzUjzZuHsmNJUYbzsK1eqkQB5e5SgCvKP4";

fn expected_document() -> DidDocument {
    let did = Did::from_str("did:web:localhost%3A4000").unwrap();
    let controller = did.to_string();

    let jwk = json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "x": "Lm_M42cB3HkUiODQsXRcweM6TByfzEHGO9ND274JcOY",
    });

    DidDocument::builder(did)
        .controller(controller.clone())
        .verification_method(VerificationMethod {
            id: format!("{controller}#owner"),
            controller: controller.clone(),
            typ: "Ed25519VerificationKey2020".to_string(),
            material: VerificationMaterial::new(
                VerificationMaterialFormat::Multibase,
                ED25519_MULTIBASE,
            ),
        })
        .verification_method(VerificationMethod {
            id: "#agreement".to_string(),
            controller: controller.clone(),
            typ: "X25519KeyAgreementKey2019".to_string(),
            material: VerificationMaterial::new(VerificationMaterialFormat::Base58, X25519_BASE58),
        })
        .authentication(format!("{controller}#owner"))
        .assertion_method("#owner".to_string())
        .assertion_method(VerificationMethod {
            id: format!("{controller}#jwk"),
            controller: controller.clone(),
            typ: "JsonWebKey2020".to_string(),
            material: VerificationMaterial::from_jwk(&serde_json::from_value(jwk).unwrap())
                .unwrap(),
        })
        .key_agreement("#agreement".to_string())
        .service(Service {
            id: "#dwn".to_string(),
            typ: "DecentralizedWebNode".to_string(),
            service_endpoint: ServiceEndpoint::Set(vec!["https://dwn.example.com".to_string()]),
            routing_keys: None,
            accept: None,
        })
        .build()
}

#[test]
fn test_document_serde() {
    let doc = expected_document();

    let doc_val = serde_json::to_value(&doc).unwrap();
    println!("{}", serde_json::to_string_pretty(&doc).unwrap());

    let expected_val: Value = serde_json::from_slice(EXPECTED_RAW).unwrap();
    assert_eq!(doc_val, expected_val);

    let expected_doc: DidDocument = serde_json::from_slice(EXPECTED_RAW).unwrap();
    assert_eq!(doc, expected_doc);
}

#[test]
fn test_resolve_relationships() {
    let doc: DidDocument = serde_json::from_slice(EXPECTED_RAW).unwrap();

    let authentication = doc.resolve_verification_methods(VerificationRelationship::Authentication);
    assert_eq!(authentication.len(), 1);
    assert_eq!(authentication[0].id, "did:web:localhost%3A4000#owner");

    let assertion = doc.resolve_verification_methods(VerificationRelationship::AssertionMethod);
    let ids = assertion.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "did:web:localhost%3A4000#owner",
            "did:web:localhost%3A4000#jwk"
        ]
    );

    // Same key, two encodings.
    assert_eq!(
        assertion[0].decoded_key().unwrap(),
        assertion[1].decoded_key().unwrap()
    );

    let agreement = doc.resolve_verification_methods(VerificationRelationship::KeyAgreement);
    assert_eq!(agreement[0].id, "#agreement");
    assert!(
        doc.resolve_verification_methods(VerificationRelationship::CapabilityDelegation)
            .is_empty()
    );

    assert!(doc.verification_method_by_id("did:web:localhost%3A4000#agreement").is_some());
    assert!(doc.service_by_id("did:web:localhost%3A4000#dwn").is_some());
    assert!(doc.service_by_id("#missing").is_none());
}

#[traced_test]
#[test]
fn test_dangling_reference_skipped() {
    let doc = DidDocument::builder(Did::from_str("did:example:123").unwrap())
        .authentication("#missing".to_string())
        .build();

    assert_eq!(doc.relationship(VerificationRelationship::Authentication).len(), 1);
    assert!(
        doc.resolve_verification_methods(VerificationRelationship::Authentication)
            .is_empty()
    );
    assert!(logs_contain("Unresolved Authentication reference #missing"));
}

#[test]
fn test_convert_methods_to_multibase() {
    let doc: DidDocument = serde_json::from_slice(EXPECTED_RAW).unwrap();

    let converted = doc
        .verification_method
        .iter()
        .map(|m| m.convert_to(VerificationMaterialFormat::Multibase).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(converted[0], doc.verification_method[0]);

    assert_eq!(converted[1].typ, "X25519KeyAgreementKey2020");
    assert_eq!(converted[1].material.text().unwrap(), X25519_MULTIBASE);
    assert_eq!(
        serde_json::to_value(&converted[1]).unwrap()["publicKeyMultibase"],
        json!(X25519_MULTIBASE)
    );
}

#[test]
fn test_prism_document() {
    let raw = json!({
        "@context": [
            "https://www.w3.org/ns/did/v1",
            "https://w3id.org/security/suites/jws-2020/v1"
        ],
        "id": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445",
        "controller": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445",
        "verificationMethod": [
            {
                "id": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445#ed25519-assertionMethod",
                "type": "JsonWebKey2020",
                "controller": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445",
                "publicKeyJwk": {
                    "crv": "Ed25519",
                    "x": "oUPBTdXeX7Hecyvpb2ny4NGpR5xhuqBIY_xlW0en7eM",
                    "kty": "OKP"
                }
            },
            {
                "id": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445#my-key-authentication",
                "type": "JsonWebKey2020",
                "controller": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445",
                "publicKeyJwk": {
                    "crv": "Ed25519",
                    "x": "pLF3PBcpcGwNbHZysEkshheRewv5qMIklYxRyOp3F84",
                    "kty": "OKP"
                }
            },
            {
                "id": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445#secp256k1-assertionMethod",
                "type": "JsonWebKey2020",
                "controller": "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445",
                "publicKeyJwk": {
                    "crv": "secp256k1",
                    "x": "kcsecQ0ODsHGe275oy4tFS2uQcyOG2kmTHf833Q0kjU",
                    "y": "vvgm5JjVzV3qgrjMgUZZmif478ANz-WoeVXIDI-xr5Q",
                    "kty": "EC"
                }
            }
        ],
        "authentication": [
            "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445#my-key-authentication"
        ],
        "assertionMethod": [
            "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445#ed25519-assertionMethod",
            "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445#secp256k1-assertionMethod"
        ],
        "keyAgreement": [],
        "capabilityInvocation": [],
        "capabilityDelegation": [],
        "service": []
    });

    let doc: DidDocument = serde_json::from_value(raw).unwrap();
    let did = "did:prism:9e2377fd10ff9a90fe69b2af195512179b23e7b23a4a860ebb9bd51e04f59445";

    assert_eq!(
        doc.relationship(VerificationRelationship::Authentication)
            .first()
            .map(VerificationMethodMapping::id),
        Some(format!("{did}#my-key-authentication").as_str())
    );
    assert_eq!(
        doc.relationship(VerificationRelationship::AssertionMethod)
            .first()
            .map(VerificationMethodMapping::id),
        Some(format!("{did}#ed25519-assertionMethod").as_str())
    );
    assert_eq!(doc.verification_method.len(), 3);
    assert_eq!(doc.controller, Some(vec![did.to_string()]));
    assert_eq!(doc.key_agreement, Some(Vec::new()));
    assert_eq!(doc.service, Some(Vec::new()));

    let secp = &doc.verification_method[2];
    let jwk = secp.material.jwk().unwrap().unwrap();
    assert_eq!(jwk.kty, "EC");
    assert!(jwk.y.is_some());
    assert_eq!(secp.decoded_key().unwrap().len(), 32);

    // A single controller is written back as a plain string.
    let reencoded = serde_json::to_value(&doc).unwrap();
    assert_eq!(reencoded["controller"], json!(did));
    assert!(reencoded.get("@context").is_none());
    assert!(reencoded.get("capabilityInvocation").is_none());
}

#[test]
fn test_invalid_documents() {
    assert!(serde_json::from_value::<DidDocument>(json!({})).is_err());
    assert!(serde_json::from_value::<DidDocument>(json!({"id": "not-a-did"})).is_err());

    let bad_endpoint = json!({
        "id": "did:example:123",
        "service": [{"id": "#s", "type": "Example", "serviceEndpoint": 7}],
    });
    assert!(serde_json::from_value::<DidDocument>(bad_endpoint).is_err());

    let minimal: DidDocument = serde_json::from_value(json!({"id": "did:example:123"})).unwrap();
    assert_eq!(
        serde_json::to_value(&minimal).unwrap(),
        json!({"id": "did:example:123"})
    );
}

#[test]
fn test_document_shared_across_threads() {
    let doc = std::sync::Arc::new(expected_document());

    let handles = (0..4)
        .map(|_| {
            let doc = doc.clone();
            std::thread::spawn(move || {
                doc.resolve_verification_methods(VerificationRelationship::AssertionMethod)
                    .iter()
                    .map(|m| m.decoded_key().unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let keys = handle.join().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], keys[1]);
    }
}
