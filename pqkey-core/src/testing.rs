//! INSECURE deterministic test primitive.
//!
//! **WARNING**: [`InsecureTestPrimitive`] is not a signature scheme. Anyone
//! holding the public key can forge a "signature". It exists only so the key
//! adapter can be exercised end to end without a native primitive, and it is
//! compiled only with the `testing` feature.
//!
//! Behaviour:
//! - keygen draws the private key from an owned [`StdRng`] and derives the
//!   public key from it with SHAKE256
//! - a signature is a SHAKE256 tag over `public || message`, shorter than
//!   the declared maximum

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use subtle::ConstantTimeEq;

use crate::{Error, PrimitiveParams, Result, SignaturePrimitive};

/// Length of the tag produced by [`InsecureTestPrimitive::sign`].
pub const TAG_LEN: usize = 64;

/// Sizes of the "SchemeX" profile used by scenario tests.
pub const SCHEME_X: PrimitiveParams = PrimitiveParams {
    public_key_len: 1573,
    private_key_len: 3109,
    max_signature_len: 34036,
    security_bits: 128,
};

/// Small sizes for fast property tests.
pub const COMPACT: PrimitiveParams = PrimitiveParams {
    public_key_len: 32,
    private_key_len: 64,
    max_signature_len: 256,
    security_bits: 128,
};

const PK_DOMAIN: &[u8] = b"pqkey-test-pk";
const SIG_DOMAIN: &[u8] = b"pqkey-test-sig";

/// Deterministic stand-in for a real signature primitive.
pub struct InsecureTestPrimitive {
    params: PrimitiveParams,
    rng: Option<StdRng>,
    fail_operations: bool,
}

impl InsecureTestPrimitive {
    /// Create a primitive with an OS-seeded randomness source.
    pub fn new(params: PrimitiveParams) -> Result<Self> {
        let rng = StdRng::try_from_os_rng().map_err(|_| Error::PrimitiveInitFailed)?;
        Ok(Self {
            params,
            rng: Some(rng),
            fail_operations: false,
        })
    }

    /// Create a primitive whose key generation is reproducible.
    pub fn from_seed(params: PrimitiveParams, seed: [u8; 32]) -> Self {
        Self {
            params,
            rng: Some(StdRng::from_seed(seed)),
            fail_operations: false,
        }
    }

    /// Create a primitive whose keygen and sign always fail.
    pub fn failing(params: PrimitiveParams) -> Self {
        Self {
            params,
            rng: None,
            fail_operations: true,
        }
    }

    /// Whether the randomness source is still held.
    pub fn has_randomness(&self) -> bool {
        self.rng.is_some()
    }

    /// Derive the public key that belongs to `private_key`.
    pub fn derive_public(private_key: &[u8], public_key: &mut [u8]) {
        let mut xof = Shake256::default();
        xof.update(PK_DOMAIN);
        xof.update(private_key);
        xof.finalize_xof().read(public_key);
    }

    fn tag_len(&self) -> usize {
        TAG_LEN.min(self.params.max_signature_len)
    }

    fn tag(&self, public_key: &[u8], message: &[u8], out: &mut [u8]) {
        let mut xof = Shake256::default();
        xof.update(SIG_DOMAIN);
        xof.update(public_key);
        xof.update(message);
        xof.finalize_xof().read(out);
    }
}

impl SignaturePrimitive for InsecureTestPrimitive {
    fn params(&self) -> &PrimitiveParams {
        &self.params
    }

    fn keygen(&mut self, private_key: &mut [u8], public_key: &mut [u8]) -> Result<()> {
        if self.fail_operations
            || private_key.len() != self.params.private_key_len
            || public_key.len() != self.params.public_key_len
        {
            return Err(Error::KeygenFailed);
        }
        let rng = self.rng.as_mut().ok_or(Error::KeygenFailed)?;
        rng.fill_bytes(private_key);
        Self::derive_public(private_key, public_key);
        Ok(())
    }

    fn sign(&self, private_key: &[u8], message: &[u8], signature: &mut [u8]) -> Result<usize> {
        let len = self.tag_len();
        if self.fail_operations
            || private_key.len() != self.params.private_key_len
            || signature.len() < len
        {
            return Err(Error::SignFailed);
        }
        let mut public_key = vec![0u8; self.params.public_key_len];
        Self::derive_public(private_key, &mut public_key);
        self.tag(&public_key, message, &mut signature[..len]);
        Ok(len)
    }

    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
        let len = self.tag_len();
        if public_key.len() != self.params.public_key_len || signature.len() != len {
            return Err(Error::VerificationFailed);
        }
        let mut expected = vec![0u8; len];
        self.tag(public_key, message, &mut expected);
        if bool::from(expected.as_slice().ct_eq(signature)) {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }

    fn release_randomness(&mut self) {
        self.rng = None;
    }
}

/// Factory for [`SCHEME_X`] sized primitives.
pub fn scheme_x() -> Result<Box<dyn SignaturePrimitive>> {
    Ok(Box::new(InsecureTestPrimitive::new(SCHEME_X)?))
}

/// Factory for [`COMPACT`] sized primitives.
pub fn compact() -> Result<Box<dyn SignaturePrimitive>> {
    Ok(Box::new(InsecureTestPrimitive::new(COMPACT)?))
}

/// Factory for [`COMPACT`] sized primitives whose keygen and sign fail.
pub fn failing() -> Result<Box<dyn SignaturePrimitive>> {
    Ok(Box::new(InsecureTestPrimitive::failing(COMPACT)))
}

/// Factory that never produces a primitive.
pub fn broken() -> Result<Box<dyn SignaturePrimitive>> {
    Err(Error::PrimitiveInitFailed)
}
