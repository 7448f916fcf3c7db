//! Fuzz target for the sign/verify adapter.
//!
//! This fuzzer tests that verification:
//! 1. Accepts signatures produced over the same message
//! 2. Rejects modified messages
//! 3. Does not panic on corrupted or arbitrary signatures

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pqkey_core::testing;
use pqkey_picnic::{picnic_l1_fs, signing, Error, Registry, PICNIC_L1_FS_OID};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    message: Vec<u8>,
    corruption: Option<CorruptionType>,
}

#[derive(Debug, Arbitrary)]
enum CorruptionType {
    // Corrupt a single byte at the given position
    CorruptSignature { position: usize, xor_value: u8 },
    // Corrupt the message
    CorruptMessage { position: usize, xor_value: u8 },
    // Use a random signature
    RandomSignature { random_sig: Vec<u8> },
}

fuzz_target!(|input: VerifyInput| {
    // Limit message size
    if input.message.len() > 10000 {
        return;
    }

    let registry = Registry::new().with(picnic_l1_fs(testing::compact));
    let Ok(key) = signing::keygen(&registry, &PICNIC_L1_FS_OID) else {
        return;
    };

    let mut sig = vec![0u8; testing::COMPACT.max_signature_len];
    let written = signing::sign(&key, &input.message, Some(sig.as_mut_slice()))
        .expect("sign with a full-size buffer should succeed");
    sig.truncate(written);
    let mut msg = input.message.clone();

    match &input.corruption {
        None => {
            let result = signing::verify(&key, Some(msg.as_slice()), Some(sig.as_slice()));
            assert!(result.is_ok(), "Valid signature should verify");
        }
        Some(CorruptionType::CorruptSignature { position, xor_value }) => {
            if *position < sig.len() && *xor_value != 0 {
                sig[*position] ^= xor_value;
                let result = signing::verify(&key, Some(msg.as_slice()), Some(sig.as_slice()));
                assert_eq!(result, Err(Error::VerificationFailed));
            }
        }
        Some(CorruptionType::CorruptMessage { position, xor_value }) => {
            if *position < msg.len() && *xor_value != 0 {
                msg[*position] ^= xor_value;
                let result = signing::verify(&key, Some(msg.as_slice()), Some(sig.as_slice()));
                assert!(result.is_err(), "Modified message should fail verification");
            }
        }
        Some(CorruptionType::RandomSignature { random_sig }) => {
            let _ = signing::verify(&key, Some(msg.as_slice()), Some(random_sig.as_slice()));
        }
    }
});
