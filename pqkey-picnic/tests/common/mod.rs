//! Shared fixtures for integration tests.

#![allow(dead_code)]

use der::asn1::OctetString;
use der::Encode;
use pqkey_core::testing::{self, InsecureTestPrimitive};
use pqkey_picnic::{
    decode_private, picnic_l1_fs, AlgorithmEntry, KeyMaterial, ObjectIdentifier, PrimitiveParams,
    Registry,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use spki::AlgorithmIdentifierRef;

/// Auxiliary profile with small sizes.
pub const COMPACT_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.55555.1");

/// Picnic bound to the SchemeX sizes, plus the compact profile.
pub fn registry() -> Registry {
    Registry::new()
        .with(picnic_l1_fs(testing::scheme_x))
        .with(AlgorithmEntry::new(
            COMPACT_OID,
            "compact",
            "compact test profile",
            128,
            testing::compact,
        ))
}

/// `private || public` for a private key drawn from `seed`.
pub fn payload_from_seed(params: &PrimitiveParams, seed: [u8; 32]) -> Vec<u8> {
    let mut rng = StdRng::from_seed(seed);
    let mut payload = vec![0u8; params.private_key_len + params.public_key_len];
    let (private_key, public_key) = payload.split_at_mut(params.private_key_len);
    rng.fill_bytes(private_key);
    InsecureTestPrimitive::derive_public(private_key, public_key);
    payload
}

/// A private container whose key bytes are reproducible from `seed`.
pub fn key_from_seed(
    registry: &Registry,
    oid: ObjectIdentifier,
    params: &PrimitiveParams,
    seed: [u8; 32],
) -> KeyMaterial {
    let octets = OctetString::new(payload_from_seed(params, seed))
        .unwrap()
        .to_der()
        .unwrap();
    let algorithm = AlgorithmIdentifierRef {
        oid,
        parameters: None,
    };
    decode_private(registry, &algorithm, &octets).unwrap()
}
