//! Private key bytes are wiped before their memory is returned.
//!
//! A scanning global allocator inspects every block freed while armed and
//! counts those still holding the secret pattern. Keep this file to a single
//! test: the allocator state is process-wide.

mod common;

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use der::asn1::OctetStringRef;
use der::Encode;
use pqkey_core::testing::SCHEME_X;
use pqkey_picnic::{decode_private, KeyMaterial, PICNIC_L1_FS_OID};
use spki::AlgorithmIdentifierRef;
use zeroize::Zeroizing;

const MARKER: &[u8; 16] = b"pqkey secret key";

static ARMED: AtomicBool = AtomicBool::new(false);
static DIRTY_BLOCKS: AtomicUsize = AtomicUsize::new(0);
static SECRET_SIZED_BLOCKS: AtomicUsize = AtomicUsize::new(0);

struct ScanningAllocator;

#[allow(unsafe_code)]
unsafe impl GlobalAlloc for ScanningAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if ARMED.load(Ordering::SeqCst) {
            let block = std::slice::from_raw_parts(ptr, layout.size());
            if block.windows(MARKER.len()).any(|w| w == MARKER) {
                DIRTY_BLOCKS.fetch_add(1, Ordering::SeqCst);
            }
            if layout.size() == SCHEME_X.private_key_len {
                SECRET_SIZED_BLOCKS.fetch_add(1, Ordering::SeqCst);
            }
        }
        System.dealloc(ptr, layout);
    }
}

#[global_allocator]
static GLOBAL: ScanningAllocator = ScanningAllocator;

fn scanned<F: FnOnce()>(f: F) -> usize {
    DIRTY_BLOCKS.store(0, Ordering::SeqCst);
    ARMED.store(true, Ordering::SeqCst);
    f();
    ARMED.store(false, Ordering::SeqCst);
    DIRTY_BLOCKS.load(Ordering::SeqCst)
}

fn secret_key() -> KeyMaterial {
    let registry = common::registry();
    let mut payload = Zeroizing::new(vec![
        0u8;
        SCHEME_X.private_key_len + SCHEME_X.public_key_len
    ]);
    for (byte, pattern) in payload[..SCHEME_X.private_key_len]
        .iter_mut()
        .zip(MARKER.iter().cycle())
    {
        *byte = *pattern;
    }
    // Staging copies are wiped too, so only the container holds the pattern.
    let field = Zeroizing::new(OctetStringRef::new(&payload).unwrap().to_der().unwrap());
    let algorithm = AlgorithmIdentifierRef {
        oid: PICNIC_L1_FS_OID,
        parameters: None,
    };
    decode_private(&registry, &algorithm, &field).unwrap()
}

#[test]
fn test_private_key_wiped_on_destroy() {
    // The instrumentation sees an unwiped secret.
    let control = MARKER.repeat(4);
    assert_eq!(scanned(move || drop(control)), 1);

    let key = secret_key();
    assert!(key
        .private_key()
        .unwrap()
        .windows(MARKER.len())
        .any(|w| w == MARKER));

    SECRET_SIZED_BLOCKS.store(0, Ordering::SeqCst);
    assert_eq!(scanned(move || key.destroy()), 0);
    assert!(SECRET_SIZED_BLOCKS.load(Ordering::SeqCst) >= 1);
}
