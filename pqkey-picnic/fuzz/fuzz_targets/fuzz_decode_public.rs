//! Fuzz target for SubjectPublicKeyInfo decoding.
//!
//! This fuzzer tests that public key decoding:
//! 1. Does not panic on arbitrary DER
//! 2. Only accepts payloads of exactly the declared public key length
//! 3. Re-encodes accepted keys to the same bytes

#![no_main]

use libfuzzer_sys::fuzz_target;

use pqkey_core::testing;
use pqkey_picnic::{decode_public_der, encode_public_der, picnic_l1_fs, Registry};

fuzz_target!(|data: &[u8]| {
    let registry = Registry::new().with(picnic_l1_fs(testing::scheme_x));

    if let Ok(key) = decode_public_der(&registry, data) {
        assert_eq!(key.public_key().len(), testing::SCHEME_X.public_key_len);
        assert!(!key.has_private_key());

        let der = encode_public_der(&key).expect("accepted key should re-encode");
        let again = decode_public_der(&registry, &der).expect("re-encoded key should decode");
        assert_eq!(again.public_key(), key.public_key());
    }
});
