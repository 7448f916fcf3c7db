//! Method table bindings for one registered signature profile.

use core::fmt;
use std::sync::Arc;

use pkcs8::{PrivateKeyInfo, SecretDocument};
use pqkey_core::{AlgorithmEntry, Error, ObjectIdentifier, Registry, Result};
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned, SubjectPublicKeyInfoRef};

use crate::encoding;
use crate::host::{
    AsnMethod, ControlRequest, Delegation, HostKey, KeyComparison, Outcome, PkeyMethod,
    SignatureContext, SignatureInfo,
};
use crate::key::KeyMaterial;
use crate::print;
use crate::profile::PICNIC_L1_FS_OID;
use crate::signing;

/// Both method tables bound to a single registry entry.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(Registry::new().with(picnic_l1_fs(my_backend)));
/// let method = SignatureMethod::picnic_l1_fs(registry)?;
///
/// let mut key = HostKey::new(method.algorithm());
/// method.keygen(&mut key)?;
/// let spki = method.public_encode(&key)?;
/// ```
#[derive(Debug, Clone)]
pub struct SignatureMethod {
    registry: Arc<Registry>,
    entry: AlgorithmEntry,
}

impl SignatureMethod {
    /// Bind the method tables to `algorithm`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedAlgorithm`] if `algorithm` is not registered.
    pub fn new(registry: Arc<Registry>, algorithm: &ObjectIdentifier) -> Result<Self> {
        let entry = *registry.lookup(algorithm)?;
        Ok(Self { registry, entry })
    }

    /// Bind the method tables to the Picnic L1 FS profile.
    pub fn picnic_l1_fs(registry: Arc<Registry>) -> Result<Self> {
        Self::new(registry, &PICNIC_L1_FS_OID)
    }

    /// Registry entry the tables are bound to.
    pub fn entry(&self) -> &AlgorithmEntry {
        &self.entry
    }

    /// Registry shared with the host.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn ensure_algorithm(&self, oid: &ObjectIdentifier) -> Result<()> {
        if *oid != self.entry.oid {
            tracing::debug!(
                expected = self.entry.name,
                actual = %oid,
                "algorithm identifier does not match method table"
            );
            return Err(Error::UnsupportedAlgorithm);
        }
        Ok(())
    }

    fn ensure_host_key(&self, key: &HostKey) -> Result<()> {
        self.ensure_algorithm(&key.algorithm())
    }

    fn material<'a>(&self, key: &'a HostKey) -> Result<&'a KeyMaterial> {
        key.material().ok_or_else(|| {
            tracing::debug!(algorithm = self.entry.name, "host key has no material");
            Error::InvalidKeyState
        })
    }
}

impl AsnMethod for SignatureMethod {
    fn algorithm(&self) -> ObjectIdentifier {
        self.entry.oid
    }

    fn public_decode(&self, key: &mut HostKey, info: &SubjectPublicKeyInfoRef<'_>) -> Result<()> {
        self.ensure_host_key(key)?;
        self.ensure_algorithm(&info.algorithm.oid)?;
        let material = encoding::decode_public(
            &self.registry,
            &info.algorithm,
            info.subject_public_key.as_bytes(),
        )?;
        key.assign(material)
    }

    fn public_encode(&self, key: &HostKey) -> Result<SubjectPublicKeyInfoOwned> {
        encoding::encode_public(self.material(key)?)
    }

    fn public_compare(&self, a: &HostKey, b: &HostKey) -> KeyComparison {
        encoding::compare_public(a.material(), b.material())
    }

    fn public_print(&self, out: &mut dyn fmt::Write, key: &HostKey, indent: usize) -> fmt::Result {
        print::print_public(out, key.material(), indent)
    }

    fn private_decode(&self, key: &mut HostKey, info: &PrivateKeyInfo<'_>) -> Result<()> {
        self.ensure_host_key(key)?;
        self.ensure_algorithm(&info.algorithm.oid)?;
        let material = encoding::decode_private(&self.registry, &info.algorithm, info.private_key)?;
        key.assign(material)
    }

    fn private_encode(&self, key: &HostKey) -> Result<SecretDocument> {
        encoding::encode_private(self.material(key)?)
    }

    fn private_print(
        &self,
        out: &mut dyn fmt::Write,
        key: &HostKey,
        indent: usize,
    ) -> fmt::Result {
        print::print_private(out, key.material(), indent)
    }

    fn size(&self, key: &HostKey) -> Result<usize> {
        Ok(self.material(key)?.params().max_signature_len)
    }

    fn bits(&self, key: &HostKey) -> Result<usize> {
        Ok(self.material(key)?.params().public_key_len)
    }

    fn security_bits(&self, key: &HostKey) -> Result<u32> {
        Ok(self.material(key)?.params().security_bits)
    }

    fn parameters_equal(&self, _a: &HostKey, _b: &HostKey) -> bool {
        true
    }

    fn free(&self, key: &mut HostKey) {
        if let Some(material) = key.take() {
            material.destroy();
        }
    }

    fn item_verify(
        &self,
        ctx: &mut SignatureContext,
        signature_algorithm: &AlgorithmIdentifierOwned,
        key: &HostKey,
    ) -> Outcome {
        if signature_algorithm.oid != self.entry.oid || signature_algorithm.parameters.is_some() {
            tracing::debug!(
                algorithm = self.entry.name,
                oid = %signature_algorithm.oid,
                "signature algorithm identifier rejected"
            );
            return Outcome::Failure(Error::UnsupportedAlgorithmOrParams);
        }
        if key.is_empty() {
            tracing::debug!(algorithm = self.entry.name, "item verify without a key");
            return Outcome::Failure(Error::MissingPublicKeyOrInput);
        }
        if let Err(err) = ctx.digest_verify_init(self, None) {
            return Outcome::Failure(err);
        }
        Outcome::Delegate(Delegation::GenericVerify)
    }

    fn item_sign(
        &self,
        algorithm: &mut AlgorithmIdentifierOwned,
        outer_algorithm: Option<&mut AlgorithmIdentifierOwned>,
    ) -> Outcome {
        for slot in core::iter::once(algorithm).chain(outer_algorithm) {
            slot.oid = self.entry.oid;
            slot.parameters = None;
        }
        Outcome::Delegate(Delegation::GenericSign)
    }

    fn signature_info(&self, info: &mut SignatureInfo) -> Outcome {
        info.digest = None;
        info.signature_algorithm = Some(self.entry.oid);
        info.security_bits = self.entry.security_bits;
        info.tls = true;
        Outcome::Success
    }
}

impl PkeyMethod for SignatureMethod {
    fn keygen(&self, key: &mut HostKey) -> Result<()> {
        self.ensure_host_key(key)?;
        let material = signing::keygen(&self.registry, &self.entry.oid)?;
        key.assign(material)
    }

    fn control(&self, request: ControlRequest) -> Result<()> {
        signing::control(request)
    }

    fn digest_sign(
        &self,
        key: &HostKey,
        message: &[u8],
        signature: Option<&mut [u8]>,
    ) -> Result<usize> {
        let material = key.material().ok_or(Error::MissingPrivateKey)?;
        signing::sign(material, message, signature)
    }

    fn digest_verify(
        &self,
        key: &HostKey,
        message: Option<&[u8]>,
        signature: Option<&[u8]>,
    ) -> Result<()> {
        let material = key.material().ok_or(Error::MissingPublicKeyOrInput)?;
        signing::verify(material, message, signature)
    }
}
