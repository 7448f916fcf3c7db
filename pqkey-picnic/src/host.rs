//! Host key-object model and method registration traits.
//!
//! A host framework keeps keys as generic [`HostKey`] objects and drives
//! algorithm-specific behaviour through two method tables:
//!
//! - [`AsnMethod`]: key encoding, comparison, printing and the item-level
//!   sign/verify hooks used for certificates and other structured documents
//! - [`PkeyMethod`]: key generation, control requests and raw sign/verify
//!
//! Item-level hooks may answer [`Outcome::Delegate`], meaning "scheme checks
//! passed, continue with the host's generic logic".

use core::fmt;

use pkcs8::{PrivateKeyInfo, SecretDocument};
use pqkey_core::{Error, ObjectIdentifier, Result};
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned, SubjectPublicKeyInfoRef};

use crate::key::KeyMaterial;

/// Generic host key object.
///
/// Holds the algorithm it was typed with and, once decoded or generated,
/// the algorithm's key material.
#[derive(Debug)]
pub struct HostKey {
    algorithm: ObjectIdentifier,
    material: Option<KeyMaterial>,
}

impl HostKey {
    /// Create an empty key object typed for `algorithm`.
    pub fn new(algorithm: ObjectIdentifier) -> Self {
        Self {
            algorithm,
            material: None,
        }
    }

    /// Algorithm the key object is typed with.
    pub fn algorithm(&self) -> ObjectIdentifier {
        self.algorithm
    }

    /// Key material, if assigned.
    pub fn material(&self) -> Option<&KeyMaterial> {
        self.material.as_ref()
    }

    /// Whether no key material is assigned.
    pub fn is_empty(&self) -> bool {
        self.material.is_none()
    }

    /// Assign key material, destroying any previously held material.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedAlgorithm`] if `material` belongs to a different
    /// algorithm than the key object. The key object is left unchanged and
    /// `material` is destroyed.
    pub fn assign(&mut self, material: KeyMaterial) -> Result<()> {
        if material.algorithm() != self.algorithm {
            tracing::debug!(
                expected = %self.algorithm,
                actual = material.entry().name,
                "key material does not match host key type"
            );
            material.destroy();
            return Err(Error::UnsupportedAlgorithm);
        }
        if let Some(old) = self.material.replace(material) {
            old.destroy();
        }
        Ok(())
    }

    /// Take the key material out, leaving the key object empty.
    pub fn take(&mut self) -> Option<KeyMaterial> {
        self.material.take()
    }
}

/// Three-way public key comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparison {
    /// Both keys are present and byte-identical.
    Equal,
    /// Both keys are present and differ.
    NotEqual,
    /// At least one side has no key material.
    Incomparable,
}

/// Which generic host routine a delegating hook hands over to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delegation {
    /// Continue with generic verification.
    GenericVerify,
    /// Continue with generic signing.
    GenericSign,
}

/// Result of a method-table hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The hook completed.
    Success,
    /// The hook failed.
    Failure(Error),
    /// Scheme-specific checks passed; generic host logic continues.
    Delegate(Delegation),
}

impl Outcome {
    /// Integer code of the host method-table contract.
    ///
    /// `1` success, `0` failure, `2` continue generic verify, `3` continue
    /// generic sign.
    pub fn code(&self) -> i32 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure(_) => 0,
            Outcome::Delegate(Delegation::GenericVerify) => 2,
            Outcome::Delegate(Delegation::GenericSign) => 3,
        }
    }

    /// Whether the hook did not fail.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Outcome::Failure(_))
    }
}

impl From<Result<()>> for Outcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(err) => Outcome::Failure(err),
        }
    }
}

/// Signature descriptor filled in for certificate signature inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureInfo {
    /// Digest algorithm, `None` when the scheme signs raw messages.
    pub digest: Option<ObjectIdentifier>,
    /// Signature algorithm.
    pub signature_algorithm: Option<ObjectIdentifier>,
    /// Estimated classical security in bits.
    pub security_bits: u32,
    /// Usable as a TLS signature algorithm.
    pub tls: bool,
}

/// Control request sent to a [`PkeyMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Select the message digest. `None` means "no digest".
    SetDigest(Option<ObjectIdentifier>),
    /// A digest-sign or digest-verify operation is being initialised.
    DigestInit,
    /// Any other host request type.
    Other(i32),
}

/// Operation a [`SignatureContext`] was initialised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Signing.
    Sign,
    /// Verification.
    Verify,
}

/// Host signing / verification context.
#[derive(Debug, Clone, Default)]
pub struct SignatureContext {
    operation: Option<Operation>,
    digest: Option<ObjectIdentifier>,
}

impl SignatureContext {
    /// Create an uninitialised context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operation the context is initialised for.
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Digest configured for the operation.
    pub fn digest(&self) -> Option<ObjectIdentifier> {
        self.digest
    }

    fn init(
        &mut self,
        method: &dyn PkeyMethod,
        digest: Option<ObjectIdentifier>,
        operation: Operation,
    ) -> Result<()> {
        self.operation = None;
        method.control(ControlRequest::SetDigest(digest))?;
        method.control(ControlRequest::DigestInit)?;
        self.digest = digest;
        self.operation = Some(operation);
        Ok(())
    }

    /// Initialise for signing with `digest`.
    pub fn digest_sign_init(
        &mut self,
        method: &dyn PkeyMethod,
        digest: Option<ObjectIdentifier>,
    ) -> Result<()> {
        self.init(method, digest, Operation::Sign)
    }

    /// Initialise for verification with `digest`.
    pub fn digest_verify_init(
        &mut self,
        method: &dyn PkeyMethod,
        digest: Option<ObjectIdentifier>,
    ) -> Result<()> {
        self.init(method, digest, Operation::Verify)
    }

    /// Sign `message`, negotiating the output length first.
    pub fn sign(&self, method: &dyn PkeyMethod, key: &HostKey, message: &[u8]) -> Result<Vec<u8>> {
        if self.operation != Some(Operation::Sign) {
            return Err(Error::InvalidKeyState);
        }
        let max_len = method.digest_sign(key, message, None)?;
        let mut signature = vec![0u8; max_len];
        let written = method.digest_sign(key, message, Some(signature.as_mut_slice()))?;
        signature.truncate(written);
        Ok(signature)
    }

    /// Verify `signature` over `message`.
    pub fn verify(
        &self,
        method: &dyn PkeyMethod,
        key: &HostKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        if self.operation != Some(Operation::Verify) {
            return Err(Error::InvalidKeyState);
        }
        method.digest_verify(key, Some(message), Some(signature))
    }
}

/// Key and ASN.1 method table.
pub trait AsnMethod {
    /// Algorithm the table is registered for.
    fn algorithm(&self) -> ObjectIdentifier;

    /// Decode a SubjectPublicKeyInfo into `key`.
    fn public_decode(&self, key: &mut HostKey, info: &SubjectPublicKeyInfoRef<'_>) -> Result<()>;

    /// Encode the public half of `key`.
    fn public_encode(&self, key: &HostKey) -> Result<SubjectPublicKeyInfoOwned>;

    /// Compare the public halves of two keys.
    fn public_compare(&self, a: &HostKey, b: &HostKey) -> KeyComparison;

    /// Print the public half of `key`.
    fn public_print(&self, out: &mut dyn fmt::Write, key: &HostKey, indent: usize) -> fmt::Result;

    /// Decode a PrivateKeyInfo into `key`.
    fn private_decode(&self, key: &mut HostKey, info: &PrivateKeyInfo<'_>) -> Result<()>;

    /// Encode `key` as a PrivateKeyInfo.
    fn private_encode(&self, key: &HostKey) -> Result<SecretDocument>;

    /// Print the private and public halves of `key`.
    fn private_print(&self, out: &mut dyn fmt::Write, key: &HostKey, indent: usize)
        -> fmt::Result;

    /// Maximum signature size in bytes.
    fn size(&self, key: &HostKey) -> Result<usize>;

    /// Nominal key strength indicator.
    fn bits(&self, key: &HostKey) -> Result<usize>;

    /// Estimated classical security in bits.
    fn security_bits(&self, key: &HostKey) -> Result<u32>;

    /// Whether the algorithm parameters of two keys are equal.
    fn parameters_equal(&self, a: &HostKey, b: &HostKey) -> bool;

    /// Release the key material held by `key`.
    fn free(&self, key: &mut HostKey);

    /// Check a signature algorithm identifier and prepare `ctx` for verification.
    fn item_verify(
        &self,
        ctx: &mut SignatureContext,
        signature_algorithm: &AlgorithmIdentifierOwned,
        key: &HostKey,
    ) -> Outcome;

    /// Stamp the signature algorithm identifier slot(s) of a document.
    fn item_sign(
        &self,
        algorithm: &mut AlgorithmIdentifierOwned,
        outer_algorithm: Option<&mut AlgorithmIdentifierOwned>,
    ) -> Outcome;

    /// Fill in a signature descriptor.
    fn signature_info(&self, info: &mut SignatureInfo) -> Outcome;
}

/// Key generation, control and raw signing method table.
pub trait PkeyMethod {
    /// Generate a key pair into `key`.
    fn keygen(&self, key: &mut HostKey) -> Result<()>;

    /// Handle a control request.
    fn control(&self, request: ControlRequest) -> Result<()>;

    /// Sign `message`.
    ///
    /// With `signature == None` returns the maximum signature length without
    /// signing. Otherwise returns the number of bytes written.
    fn digest_sign(&self, key: &HostKey, message: &[u8], signature: Option<&mut [u8]>)
        -> Result<usize>;

    /// Verify `signature` over `message`.
    fn digest_verify(
        &self,
        key: &HostKey,
        message: Option<&[u8]>,
        signature: Option<&[u8]>,
    ) -> Result<()>;
}
