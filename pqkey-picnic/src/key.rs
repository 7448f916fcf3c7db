//! Key material container and lifecycle.
//!
//! A [`KeyMaterial`] owns the primitive instance for one key together with
//! its raw public bytes and, in [`KeyMode::WithPrivate`], its private bytes.
//! Construction is all-or-nothing: if any step fails, everything acquired so
//! far is released before the error is returned.

use core::fmt;

use pqkey_core::{
    AlgorithmEntry, Error, ObjectIdentifier, PrimitiveParams, Registry, Result, SignaturePrimitive,
};
use zeroize::Zeroizing;

/// Which buffers a container carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Public key only (decoded from a SubjectPublicKeyInfo).
    PublicOnly,
    /// Private and public key (generated, or decoded from a PrivateKeyInfo).
    WithPrivate,
}

/// Owned primitive instance.
///
/// Releases the randomness source before the primitive itself is dropped.
struct PrimitiveHandle(Box<dyn SignaturePrimitive>);

impl Drop for PrimitiveHandle {
    fn drop(&mut self) {
        self.0.release_randomness();
    }
}

/// One key pair, or one public key, for a registered algorithm.
///
/// Private bytes live in a [`Zeroizing`] buffer and are overwritten before
/// their memory is released. Not `Clone`: each container has exactly one
/// owner.
pub struct KeyMaterial {
    // Field order is teardown order: primitive, private, public.
    primitive: PrimitiveHandle,
    private_key: Option<Zeroizing<Vec<u8>>>,
    public_key: Vec<u8>,
    entry: AlgorithmEntry,
}

/// Allocate a zero-filled buffer, reporting exhaustion instead of aborting.
pub(crate) fn allocate(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| {
        tracing::debug!(len, "key buffer allocation failed");
        Error::AllocationFailed
    })?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Allocate a zero-filled buffer that is wiped when dropped.
pub(crate) fn allocate_secret(len: usize) -> Result<Zeroizing<Vec<u8>>> {
    allocate(len).map(Zeroizing::new)
}

impl KeyMaterial {
    /// Create an empty container for `algorithm`.
    ///
    /// Buffers are sized from the primitive's declared lengths and
    /// zero-filled.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedAlgorithm`] if `algorithm` is not registered
    /// - [`Error::PrimitiveInitFailed`] if the primitive cannot be instantiated
    /// - [`Error::AllocationFailed`] if a key buffer cannot be allocated
    pub fn create(registry: &Registry, algorithm: &ObjectIdentifier, mode: KeyMode) -> Result<Self> {
        let entry = *registry.lookup(algorithm)?;
        let primitive = PrimitiveHandle(entry.instantiate()?);
        let params = *primitive.0.params();

        let public_key = allocate(params.public_key_len)?;
        let private_key = match mode {
            KeyMode::PublicOnly => None,
            KeyMode::WithPrivate => Some(allocate_secret(params.private_key_len)?),
        };

        tracing::trace!(algorithm = entry.name, ?mode, "key container created");
        Ok(Self {
            primitive,
            private_key,
            public_key,
            entry,
        })
    }

    /// Destroy the container.
    ///
    /// Releases the primitive (randomness source first), wipes and frees the
    /// private bytes, then frees the public bytes. Equivalent to dropping.
    pub fn destroy(self) {
        tracing::trace!(algorithm = self.entry.name, "key container destroyed");
        drop(self);
    }

    /// Registry entry this key was created from.
    pub fn entry(&self) -> &AlgorithmEntry {
        &self.entry
    }

    /// Algorithm identifier.
    pub fn algorithm(&self) -> ObjectIdentifier {
        self.entry.oid
    }

    /// Declared sizes of the underlying primitive.
    pub fn params(&self) -> &PrimitiveParams {
        self.primitive.0.params()
    }

    /// Mode the container was created in.
    pub fn mode(&self) -> KeyMode {
        if self.private_key.is_some() {
            KeyMode::WithPrivate
        } else {
            KeyMode::PublicOnly
        }
    }

    /// Raw public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Raw private key bytes, if this is a private container.
    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_ref().map(|sk| sk.as_slice())
    }

    /// Whether private bytes are present.
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub(crate) fn primitive(&self) -> &dyn SignaturePrimitive {
        self.primitive.0.as_ref()
    }

    pub(crate) fn public_key_mut(&mut self) -> &mut [u8] {
        &mut self.public_key
    }

    pub(crate) fn private_key_mut(&mut self) -> Option<&mut [u8]> {
        self.private_key.as_mut().map(|sk| sk.as_mut_slice())
    }

    /// Run the primitive's key generation into this container's buffers.
    pub(crate) fn generate(&mut self) -> Result<()> {
        let private_key = self
            .private_key
            .as_mut()
            .ok_or(Error::InvalidKeyState)?;
        self.primitive
            .0
            .keygen(private_key.as_mut_slice(), &mut self.public_key)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &self.entry.name)
            .field("mode", &self.mode())
            .field("public_key_len", &self.public_key.len())
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
