//! Signature primitive contract.

use crate::Result;

/// Declared sizes and strength of one signature primitive instance.
///
/// Buffers handed to the primitive are always sized from these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveParams {
    /// Public key length in bytes.
    pub public_key_len: usize,
    /// Private key length in bytes.
    pub private_key_len: usize,
    /// Maximum signature length in bytes.
    pub max_signature_len: usize,
    /// Estimated classical security in bits.
    pub security_bits: u32,
}

/// Opaque post-quantum signature primitive.
///
/// The adapter never looks inside a primitive: it sizes buffers from
/// [`params`](Self::params), moves bytes in and out, and maps failures onto
/// its own error taxonomy. Implementations own whatever randomness source
/// key generation needs.
///
/// # Example
///
/// ```ignore
/// use pqkey_core::SignaturePrimitive;
///
/// let params = *primitive.params();
/// let mut sk = vec![0u8; params.private_key_len];
/// let mut pk = vec![0u8; params.public_key_len];
/// primitive.keygen(&mut sk, &mut pk)?;
///
/// let mut sig = vec![0u8; params.max_signature_len];
/// let n = primitive.sign(&sk, message, &mut sig)?;
/// primitive.verify(&pk, message, &sig[..n])?;
/// ```
pub trait SignaturePrimitive: Send + Sync {
    /// Declared key and signature sizes.
    fn params(&self) -> &PrimitiveParams;

    /// Generate a key pair into the provided buffers.
    ///
    /// `private_key` and `public_key` are exactly `private_key_len` and
    /// `public_key_len` bytes long.
    fn keygen(&mut self, private_key: &mut [u8], public_key: &mut [u8]) -> Result<()>;

    /// Sign `message` directly (no pre-hash).
    ///
    /// `signature` is at least `max_signature_len` bytes. Returns the number
    /// of bytes written, which may be smaller than the maximum.
    fn sign(&self, private_key: &[u8], message: &[u8], signature: &mut [u8]) -> Result<usize>;

    /// Verify `signature` over `message`.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()>;

    /// Release the randomness source ahead of the primitive itself.
    fn release_randomness(&mut self);
}
