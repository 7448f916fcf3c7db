//! Constant-time verification for public key comparison.
//!
//! Tests that comparison timing does not leak where two public keys first
//! differ.
//!
//! Run with: `cargo run --release -p pqkey-timing --bin compare_public`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use once_cell::sync::Lazy;
use pqkey_core::testing;
use pqkey_picnic::{
    compare_public, decode_public, picnic_l1_fs, signing, KeyMaterial, Registry, PICNIC_L1_FS_OID,
};
use spki::AlgorithmIdentifierRef;

/// Reference key and two candidates differing at opposite ends.
struct TestData {
    reference: KeyMaterial,
    early_diff: KeyMaterial,
    late_diff: KeyMaterial,
}

fn with_flipped_byte(registry: &Registry, key: &KeyMaterial, index: usize) -> KeyMaterial {
    let mut public_key = key.public_key().to_vec();
    public_key[index] ^= 0x01;
    let algorithm = AlgorithmIdentifierRef {
        oid: PICNIC_L1_FS_OID,
        parameters: None,
    };
    decode_public(registry, &algorithm, Some(public_key.as_slice())).expect("decode failed")
}

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let registry = Registry::new().with(picnic_l1_fs(testing::scheme_x));
    let reference = signing::keygen(&registry, &PICNIC_L1_FS_OID).expect("keygen failed");
    let last = reference.public_key().len() - 1;

    TestData {
        early_diff: with_flipped_byte(&registry, &reference, 0),
        late_diff: with_flipped_byte(&registry, &reference, last),
        reference,
    }
});

/// Number of iterations per batch.
const ITERATIONS: usize = 100_000;

/// Compares timing between a mismatch in the first byte and one in the last.
fn bench_compare_public(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    // Pre-generate class assignments
    let mut classes = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        if rng.gen::<bool>() {
            classes.push(Class::Left);
        } else {
            classes.push(Class::Right);
        }
    }

    for class in classes {
        let other = match class {
            Class::Left => &data.early_diff,
            Class::Right => &data.late_diff,
        };

        runner.run_one(class, || {
            let _ = compare_public(Some(&data.reference), Some(other));
        });
    }
}

ctbench_main!(bench_compare_public);
