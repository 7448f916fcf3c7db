//! # pqkey
//!
//! Post-quantum signature key management for host crypto frameworks.
//!
//! ## Features
//!
//! - `picnic` (default): Enable the Picnic L1 FS key adapter
//! - `testing`: Expose an INSECURE deterministic primitive for tests
//!
//! ## Supported Algorithms
//!
//! - **Picnic L1 FS** (`1.3.6.1.4.1.311.89.2.1.7`)
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pqkey::picnic::{picnic_l1_fs, AsnMethod, HostKey, PkeyMethod, SignatureMethod};
//! use pqkey::Registry;
//!
//! // Bind the host's primitive backend and share the registry
//! let registry = Arc::new(Registry::new().with(picnic_l1_fs(my_backend)));
//! let method = SignatureMethod::picnic_l1_fs(registry)?;
//!
//! // Generate a key pair and export the public half
//! let mut key = HostKey::new(method.algorithm());
//! method.keygen(&mut key)?;
//! let spki = method.public_encode(&key)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use pqkey_core::{Error, ObjectIdentifier, Registry, Result};

/// Primitive contract and algorithm registry.
pub mod traits {
    pub use pqkey_core::{AlgorithmEntry, PrimitiveFactory, PrimitiveParams, SignaturePrimitive};
}

/// Picnic L1 FS key adapter and method tables.
#[cfg(feature = "picnic")]
pub mod picnic {
    pub use pqkey_picnic::*;
}

/// INSECURE deterministic primitive for tests.
#[cfg(feature = "testing")]
pub mod testing {
    pub use pqkey_core::testing::*;
}

#[cfg(all(test, feature = "picnic"))]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_facade_wiring() {
        let registry = Arc::new(
            Registry::new().with(picnic::picnic_l1_fs(pqkey_core::testing::scheme_x)),
        );
        let method = picnic::SignatureMethod::picnic_l1_fs(registry).unwrap();
        assert_eq!(method.entry().name, "picnicL1FS");
        assert_eq!(method.entry().security_bits, 128);
    }
}
