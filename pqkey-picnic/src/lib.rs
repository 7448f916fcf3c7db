//! Picnic L1 FS key management and encoding adapter
//!
//! This crate plugs the Picnic L1 FS signature scheme into a host crypto
//! framework's generic key model. It owns the per-key container, the
//! SubjectPublicKeyInfo / PrivateKeyInfo encodings, the method tables the
//! host dispatches through, and the raw sign/verify routing. The signature
//! primitive itself is supplied by the host as a [`PrimitiveFactory`].
//!
//! # Wire Formats
//!
//! | Structure | Algorithm identifier | Key payload |
//! |-----------|----------------------|-------------|
//! | SubjectPublicKeyInfo | `1.3.6.1.4.1.311.89.2.1.7`, no parameters | BIT STRING of the raw public key |
//! | PrivateKeyInfo (v1) | `1.3.6.1.4.1.311.89.2.1.7`, no parameters | OCTET STRING of `private \|\| public` |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pqkey_picnic::{picnic_l1_fs, AsnMethod, HostKey, PkeyMethod, Registry, SignatureMethod};
//!
//! let registry = Arc::new(Registry::new().with(picnic_l1_fs(my_backend)));
//! let method = SignatureMethod::picnic_l1_fs(registry)?;
//!
//! let mut key = HostKey::new(method.algorithm());
//! method.keygen(&mut key)?;
//!
//! let message = b"Hello, post-quantum world!";
//! let len = method.digest_sign(&key, message, None)?;
//! let mut signature = vec![0u8; len];
//! let written = method.digest_sign(&key, message, Some(signature.as_mut_slice()))?;
//! method.digest_verify(&key, Some(&message[..]), Some(&signature[..written]))?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod encoding;
pub mod host;
mod key;
mod method;
pub mod print;
mod profile;
pub mod signing;

pub use encoding::{
    compare_public, decode_private, decode_private_der, decode_public, decode_public_der,
    encode_private, encode_private_payload, encode_public, encode_public_der,
};
pub use host::{
    AsnMethod, ControlRequest, Delegation, HostKey, KeyComparison, Operation, Outcome, PkeyMethod,
    SignatureContext, SignatureInfo,
};
pub use key::{KeyMaterial, KeyMode};
pub use method::SignatureMethod;
pub use profile::{
    picnic_l1_fs, PICNIC_L1_FS_DESCRIPTION, PICNIC_L1_FS_NAME, PICNIC_L1_FS_OID,
    PICNIC_L1_FS_SECURITY_BITS,
};

pub use pqkey_core::{
    AlgorithmEntry, Error, ObjectIdentifier, PrimitiveFactory, PrimitiveParams, Registry, Result,
    SignaturePrimitive,
};
