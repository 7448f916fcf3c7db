//! # pqkey Core
//!
//! Core traits and utilities shared by the pqkey key adapters.
//!
//! This crate provides:
//! - The common error taxonomy
//! - The opaque signature primitive contract ([`SignaturePrimitive`])
//! - The algorithm registration table ([`Registry`])
//! - An insecure deterministic test primitive (feature `testing`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
pub mod registry;
#[cfg(feature = "testing")]
pub mod testing;
mod traits;

pub use error::{Error, Result};
pub use registry::{AlgorithmEntry, PrimitiveFactory, Registry};
pub use traits::{PrimitiveParams, SignaturePrimitive};

/// Re-export of the object identifier type used throughout the registry.
pub use spki::ObjectIdentifier;

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Re-export subtle for constant-time operations.
pub use subtle;
