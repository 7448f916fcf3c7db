//! Fuzz target for PrivateKeyInfo decoding.
//!
//! Feeds arbitrary bytes both as a whole PrivateKeyInfo and as the inner
//! `privateKey` field. Decoding must never panic, and anything accepted must
//! survive an encode/decode cycle with the same split.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pqkey_core::testing;
use pqkey_picnic::{
    decode_private, decode_private_der, encode_private, picnic_l1_fs, KeyMaterial, Registry,
    PICNIC_L1_FS_OID,
};
use spki::AlgorithmIdentifierRef;

#[derive(Debug, Arbitrary)]
enum PrivateInput {
    // A complete PrivateKeyInfo document
    Document(Vec<u8>),
    // Only the privateKey field, under a well-formed algorithm identifier
    Field(Vec<u8>),
}

fn check_roundtrip(registry: &Registry, key: &KeyMaterial) {
    let expected = testing::SCHEME_X;
    assert_eq!(key.private_key().map(<[u8]>::len), Some(expected.private_key_len));
    assert_eq!(key.public_key().len(), expected.public_key_len);

    let doc = encode_private(key).expect("accepted key should re-encode");
    let again = decode_private_der(registry, doc.as_bytes()).expect("re-encoded key should decode");
    assert_eq!(again.private_key(), key.private_key());
    assert_eq!(again.public_key(), key.public_key());
}

fuzz_target!(|input: PrivateInput| {
    let registry = Registry::new().with(picnic_l1_fs(testing::scheme_x));

    let decoded = match &input {
        PrivateInput::Document(der) => decode_private_der(&registry, der),
        PrivateInput::Field(field) => {
            let algorithm = AlgorithmIdentifierRef {
                oid: PICNIC_L1_FS_OID,
                parameters: None,
            };
            decode_private(&registry, &algorithm, field)
        }
    };

    if let Ok(key) = decoded {
        check_roundtrip(&registry, &key);
    }
});
