//! Algorithm registration table.
//!
//! Maps algorithm object identifiers to primitive metadata and a factory.
//! A host builds one [`Registry`] at start-up and shares it (typically
//! behind an `Arc`); adapter code only ever queries it.

use std::collections::BTreeMap;

use spki::ObjectIdentifier;

use crate::{Error, Result, SignaturePrimitive};

/// Constructor for a fresh primitive instance.
pub type PrimitiveFactory = fn() -> Result<Box<dyn SignaturePrimitive>>;

/// One registered signature algorithm profile.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmEntry {
    /// Object identifier stamped into key and signature algorithm fields.
    pub oid: ObjectIdentifier,
    /// Short name, used when printing keys.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Classical security estimate, available without a key instance.
    pub security_bits: u32,
    factory: PrimitiveFactory,
}

impl AlgorithmEntry {
    /// Create a new entry.
    pub const fn new(
        oid: ObjectIdentifier,
        name: &'static str,
        description: &'static str,
        security_bits: u32,
        factory: PrimitiveFactory,
    ) -> Self {
        Self {
            oid,
            name,
            description,
            security_bits,
            factory,
        }
    }

    /// Instantiate the primitive.
    ///
    /// Any factory failure is reported as [`Error::PrimitiveInitFailed`].
    pub fn instantiate(&self) -> Result<Box<dyn SignaturePrimitive>> {
        (self.factory)().map_err(|err| {
            tracing::debug!(algorithm = self.name, %err, "primitive instantiation failed");
            Error::PrimitiveInitFailed
        })
    }
}

/// Registry of supported signature algorithms keyed by OID.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<ObjectIdentifier, AlgorithmEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entry`, returning the entry it replaced, if any.
    pub fn register(&mut self, entry: AlgorithmEntry) -> Option<AlgorithmEntry> {
        let replaced = self.entries.insert(entry.oid, entry);
        if let Some(old) = &replaced {
            tracing::debug!(
                oid = %entry.oid,
                old = old.name,
                new = entry.name,
                "replaced registered algorithm"
            );
        }
        replaced
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, entry: AlgorithmEntry) -> Self {
        self.register(entry);
        self
    }

    /// Look up the entry for `oid`.
    pub fn lookup(&self, oid: &ObjectIdentifier) -> Result<&AlgorithmEntry> {
        self.entries.get(oid).ok_or_else(|| {
            tracing::debug!(%oid, "no primitive registered for algorithm");
            Error::UnsupportedAlgorithm
        })
    }

    /// Whether `oid` is registered.
    pub fn contains(&self, oid: &ObjectIdentifier) -> bool {
        self.entries.contains_key(oid)
    }

    /// Number of registered algorithms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no algorithm is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over registered entries in OID order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmEntry> {
        self.entries.values()
    }
}
