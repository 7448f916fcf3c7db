//! Picnic L1 FS algorithm profile.
//!
//! The profile fixes the identifier, names and classical security estimate.
//! Key and signature sizes are declared by whichever primitive backend the
//! host binds to it with [`picnic_l1_fs`].

use pqkey_core::{AlgorithmEntry, ObjectIdentifier, PrimitiveFactory};

/// Object identifier of `picnicL1FS`.
pub const PICNIC_L1_FS_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.89.2.1.7");

/// Short name, as printed in key dumps.
pub const PICNIC_L1_FS_NAME: &str = "picnicL1FS";

/// Human-readable description.
pub const PICNIC_L1_FS_DESCRIPTION: &str = "OpenSSL Picnic L1 FS algorithm";

/// Estimated classical security in bits.
pub const PICNIC_L1_FS_SECURITY_BITS: u32 = 128;

/// Bind a primitive backend to the Picnic L1 FS profile.
///
/// # Example
///
/// ```ignore
/// let registry = Registry::new().with(picnic_l1_fs(my_backend));
/// ```
pub const fn picnic_l1_fs(factory: PrimitiveFactory) -> AlgorithmEntry {
    AlgorithmEntry::new(
        PICNIC_L1_FS_OID,
        PICNIC_L1_FS_NAME,
        PICNIC_L1_FS_DESCRIPTION,
        PICNIC_L1_FS_SECURITY_BITS,
        factory,
    )
}
