//! Property-based tests for the key adapter using proptest.
//!
//! These tests verify the adapter's structural properties:
//! - Encoding: public and private round-trips preserve key bytes
//! - Comparison: a single flipped public byte makes keys unequal
//! - Length checks: any payload of the wrong size is rejected
//! - Signing: sign/verify round-trip, tampered message, wrong key, buffer negotiation

mod common;

use proptest::prelude::*;

/// Generate arbitrary 32-byte seeds for testing
fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Generate arbitrary messages (0-256 bytes)
fn arb_message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

macro_rules! adapter_proptest {
    ($mod_name:ident, $oid:expr, $params:expr, $cases:expr) => {
        mod $mod_name {
            use super::*;
            use crate::common::{key_from_seed, registry};
            use der::asn1::OctetString;
            use der::Encode;
            use pqkey_picnic::{
                compare_public, decode_private, decode_private_der, decode_public,
                decode_public_der, encode_private, encode_public_der, signing, Error,
                KeyComparison,
            };
            use spki::AlgorithmIdentifierRef;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                /// Public and private encodings round-trip byte-exactly.
                #[test]
                fn encoding_roundtrip(seed in arb_seed()) {
                    let registry = registry();
                    let key = key_from_seed(&registry, $oid, &$params, seed);

                    let public = decode_public_der(&registry, &encode_public_der(&key).unwrap()).unwrap();
                    prop_assert_eq!(public.public_key(), key.public_key());
                    prop_assert!(!public.has_private_key());
                    prop_assert_eq!(compare_public(Some(&key), Some(&public)), KeyComparison::Equal);

                    let doc = encode_private(&key).unwrap();
                    let private = decode_private_der(&registry, doc.as_bytes()).unwrap();
                    prop_assert_eq!(private.private_key(), key.private_key());
                    prop_assert_eq!(private.public_key(), key.public_key());
                }

                /// Flipping any one public byte breaks equality.
                #[test]
                fn compare_detects_flip(seed in arb_seed(), pos in any::<prop::sample::Index>()) {
                    let registry = registry();
                    let key = key_from_seed(&registry, $oid, &$params, seed);

                    let mut flipped = key.public_key().to_vec();
                    let pos = pos.index(flipped.len());
                    flipped[pos] ^= 0x01;

                    let algorithm = AlgorithmIdentifierRef { oid: $oid, parameters: None };
                    let other = decode_public(&registry, &algorithm, Some(flipped.as_slice())).unwrap();
                    prop_assert_eq!(compare_public(Some(&key), Some(&other)), KeyComparison::NotEqual);
                    prop_assert_eq!(compare_public(None, Some(&other)), KeyComparison::Incomparable);
                }

                /// Public payloads of the wrong length are rejected.
                #[test]
                fn public_length_mismatch(len in 0usize..($params.public_key_len * 2)) {
                    prop_assume!(len != $params.public_key_len);
                    let registry = registry();
                    let algorithm = AlgorithmIdentifierRef { oid: $oid, parameters: None };

                    let raw = vec![0x5a; len];
                    let result = decode_public(&registry, &algorithm, Some(raw.as_slice()));
                    prop_assert_eq!(
                        result.err(),
                        Some(Error::LengthMismatch { expected: $params.public_key_len, actual: len })
                    );
                }

                /// Private payloads of the wrong length are rejected.
                #[test]
                fn private_length_mismatch(len in 0usize..($params.private_key_len + $params.public_key_len + 64)) {
                    let expected = $params.private_key_len + $params.public_key_len;
                    prop_assume!(len != expected);
                    let registry = registry();
                    let algorithm = AlgorithmIdentifierRef { oid: $oid, parameters: None };

                    let field = OctetString::new(vec![0x5a; len]).unwrap().to_der().unwrap();
                    let result = decode_private(&registry, &algorithm, &field);
                    prop_assert_eq!(result.err(), Some(Error::LengthMismatch { expected, actual: len }));
                }

                /// Sign/verify round-trip; tampering with the message is detected.
                #[test]
                fn sign_verify(seed in arb_seed(), message in arb_message(), flip_pos in 0usize..256) {
                    let registry = registry();
                    let key = key_from_seed(&registry, $oid, &$params, seed);

                    let mut signature = vec![0u8; $params.max_signature_len];
                    let written = signing::sign(&key, &message, Some(signature.as_mut_slice())).unwrap();
                    prop_assert!(written <= $params.max_signature_len);
                    let signature = &signature[..written];
                    prop_assert!(signing::verify(&key, Some(message.as_slice()), Some(signature)).is_ok());

                    let mut tampered = message.clone();
                    if tampered.is_empty() {
                        tampered.push(0);
                    } else {
                        let pos = flip_pos % tampered.len();
                        tampered[pos] ^= 0xFF;
                    }
                    prop_assert_eq!(
                        signing::verify(&key, Some(tampered.as_slice()), Some(signature)),
                        Err(Error::VerificationFailed)
                    );
                }

                /// Verification with the wrong public key fails.
                #[test]
                fn wrong_key_fails(seed1 in arb_seed(), seed2 in arb_seed(), message in arb_message()) {
                    prop_assume!(seed1 != seed2);
                    let registry = registry();
                    let signer = key_from_seed(&registry, $oid, &$params, seed1);
                    let other = key_from_seed(&registry, $oid, &$params, seed2);

                    let mut signature = vec![0u8; $params.max_signature_len];
                    let written = signing::sign(&signer, &message, Some(signature.as_mut_slice())).unwrap();
                    prop_assert!(signing::verify(&other, Some(message.as_slice()), Some(&signature[..written])).is_err());
                }

                /// Length query returns the maximum; any shorter buffer is refused.
                #[test]
                fn sign_length_negotiation(seed in arb_seed(), short in any::<prop::sample::Index>()) {
                    let registry = registry();
                    let key = key_from_seed(&registry, $oid, &$params, seed);
                    let max = $params.max_signature_len;

                    prop_assert_eq!(signing::sign(&key, b"m", None), Ok(max));

                    let len = short.index(max);
                    let mut buf = vec![0u8; len];
                    prop_assert_eq!(
                        signing::sign(&key, b"m", Some(buf.as_mut_slice())),
                        Err(Error::BufferTooSmall { required: max, actual: len })
                    );
                }
            }
        }
    };
}

adapter_proptest!(
    picnic_l1_fs,
    pqkey_picnic::PICNIC_L1_FS_OID,
    pqkey_core::testing::SCHEME_X,
    16
);
adapter_proptest!(
    compact,
    common::COMPACT_OID,
    pqkey_core::testing::COMPACT,
    64
);
