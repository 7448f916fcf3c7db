//! Raw sign / verify / keygen routing to the primitive.
//!
//! The scheme signs messages directly: there is no pre-hash, and the only
//! accepted digest configuration is "none".

use pqkey_core::{Error, ObjectIdentifier, Registry, Result};

use crate::host::ControlRequest;
use crate::key::{KeyMaterial, KeyMode};

/// Sign `message` with `key`.
///
/// Follows the host's two-phase buffer convention:
/// - `signature == None`: returns `max_signature_len`, signs nothing
/// - a buffer shorter than `max_signature_len`: [`Error::BufferTooSmall`]
/// - otherwise signs and returns the number of bytes written
pub fn sign(key: &KeyMaterial, message: &[u8], signature: Option<&mut [u8]>) -> Result<usize> {
    let private_key = key.private_key().ok_or_else(|| {
        tracing::debug!(algorithm = key.entry().name, "sign without private key");
        Error::MissingPrivateKey
    })?;
    let max_len = key.params().max_signature_len;

    let Some(signature) = signature else {
        return Ok(max_len);
    };
    if signature.len() < max_len {
        tracing::debug!(
            algorithm = key.entry().name,
            required = max_len,
            actual = signature.len(),
            "signature buffer too small"
        );
        return Err(Error::BufferTooSmall {
            required: max_len,
            actual: signature.len(),
        });
    }

    let written = key
        .primitive()
        .sign(private_key, message, signature)
        .map_err(|err| {
            tracing::debug!(algorithm = key.entry().name, %err, "primitive sign failed");
            Error::SignFailed
        })?;
    if written > max_len {
        tracing::debug!(algorithm = key.entry().name, written, "primitive overran signature");
        return Err(Error::SignFailed);
    }
    Ok(written)
}

/// Verify `signature` over `message` with `key`.
///
/// Every primitive failure, malformed or mismatching, is reported as
/// [`Error::VerificationFailed`].
pub fn verify(key: &KeyMaterial, message: Option<&[u8]>, signature: Option<&[u8]>) -> Result<()> {
    let (Some(message), Some(signature)) = (message, signature) else {
        tracing::debug!(algorithm = key.entry().name, "verify without message or signature");
        return Err(Error::MissingPublicKeyOrInput);
    };

    key.primitive()
        .verify(key.public_key(), message, signature)
        .map_err(|err| {
            tracing::debug!(algorithm = key.entry().name, %err, "signature rejected");
            Error::VerificationFailed
        })
}

/// Generate a fresh key pair for `algorithm`.
///
/// On primitive failure the half-built container is destroyed and
/// [`Error::KeygenFailed`] is returned.
pub fn keygen(registry: &Registry, algorithm: &ObjectIdentifier) -> Result<KeyMaterial> {
    let mut key = KeyMaterial::create(registry, algorithm, KeyMode::WithPrivate)?;
    if let Err(err) = key.generate() {
        tracing::debug!(algorithm = key.entry().name, %err, "primitive keygen failed");
        key.destroy();
        return Err(Error::KeygenFailed);
    }
    tracing::trace!(algorithm = key.entry().name, "key pair generated");
    Ok(key)
}

/// Handle a control request.
///
/// Only "no digest" is a valid digest selection. Digest-init notifications
/// are accepted as no-ops.
pub fn control(request: ControlRequest) -> Result<()> {
    match request {
        ControlRequest::SetDigest(None) | ControlRequest::DigestInit => Ok(()),
        ControlRequest::SetDigest(Some(digest)) => {
            tracing::debug!(%digest, "digest requested for a raw-message scheme");
            Err(Error::UnsupportedDigest)
        }
        ControlRequest::Other(request) => {
            tracing::debug!(request, "unsupported control request");
            Err(Error::UnsupportedControl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{decode_public_der, encode_public_der};
    use crate::test_support::{self, keypair, COMPACT_OID, FAILING_OID};
    use crate::PICNIC_L1_FS_OID;
    use pqkey_core::testing::{COMPACT, SCHEME_X, TAG_LEN};

    const MESSAGE: &[u8] = b"The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_length_query() {
        let registry = test_support::registry();
        let key = keypair(&registry, &PICNIC_L1_FS_OID);
        let before = key.private_key().unwrap().to_vec();

        assert_eq!(sign(&key, MESSAGE, None), Ok(SCHEME_X.max_signature_len));
        assert_eq!(key.private_key().unwrap(), before.as_slice());

        let mut buf = vec![0u8; SCHEME_X.max_signature_len];
        let written = sign(&key, MESSAGE, Some(buf.as_mut_slice())).unwrap();
        assert_eq!(written, TAG_LEN);
        assert!(written < SCHEME_X.max_signature_len);
    }

    #[test]
    fn test_buffer_too_small() {
        let registry = test_support::registry();
        let key = keypair(&registry, &COMPACT_OID);

        let mut buf = vec![0u8; COMPACT.max_signature_len - 1];
        assert_eq!(
            sign(&key, MESSAGE, Some(buf.as_mut_slice())),
            Err(Error::BufferTooSmall {
                required: COMPACT.max_signature_len,
                actual: COMPACT.max_signature_len - 1,
            })
        );
    }

    #[test]
    fn test_sign_requires_private_key() {
        let registry = test_support::registry();
        let key = keypair(&registry, &COMPACT_OID);
        let public_only = decode_public_der(&registry, &encode_public_der(&key).unwrap()).unwrap();

        assert_eq!(sign(&public_only, MESSAGE, None), Err(Error::MissingPrivateKey));
    }

    #[test]
    fn test_sign_verify() {
        let registry = test_support::registry();
        let key = keypair(&registry, &COMPACT_OID);

        let mut sig = vec![0u8; COMPACT.max_signature_len];
        let n = sign(&key, MESSAGE, Some(sig.as_mut_slice())).unwrap();
        assert!(verify(&key, Some(MESSAGE), Some(&sig[..n])).is_ok());

        let mut tampered = MESSAGE.to_vec();
        tampered[0] ^= 0x01;
        assert_eq!(
            verify(&key, Some(tampered.as_slice()), Some(&sig[..n])),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn test_verify_with_public_only_key() {
        let registry = test_support::registry();
        let key = keypair(&registry, &PICNIC_L1_FS_OID);
        let public_only = decode_public_der(&registry, &encode_public_der(&key).unwrap()).unwrap();

        let mut sig = vec![0u8; SCHEME_X.max_signature_len];
        let n = sign(&key, MESSAGE, Some(sig.as_mut_slice())).unwrap();
        assert!(verify(&public_only, Some(MESSAGE), Some(&sig[..n])).is_ok());
    }

    #[test]
    fn test_verify_missing_input() {
        let registry = test_support::registry();
        let key = keypair(&registry, &COMPACT_OID);

        assert_eq!(
            verify(&key, None, Some(&[0u8; 4][..])),
            Err(Error::MissingPublicKeyOrInput)
        );
        assert_eq!(
            verify(&key, Some(MESSAGE), None),
            Err(Error::MissingPublicKeyOrInput)
        );
    }

    #[test]
    fn test_verify_malformed_signature() {
        let registry = test_support::registry();
        let key = keypair(&registry, &COMPACT_OID);
        assert_eq!(
            verify(&key, Some(MESSAGE), Some(&[0u8; 3][..])),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn test_keygen_sizes() {
        let registry = test_support::registry();
        let key = keygen(&registry, &PICNIC_L1_FS_OID).unwrap();

        assert_eq!(key.public_key().len(), SCHEME_X.public_key_len);
        assert_eq!(
            key.private_key().map(<[u8]>::len),
            Some(SCHEME_X.private_key_len)
        );
        assert_eq!(key.params().max_signature_len, SCHEME_X.max_signature_len);
    }

    #[test]
    fn test_keygen_failure() {
        let registry = test_support::registry();
        assert_eq!(keygen(&registry, &FAILING_OID).err(), Some(Error::KeygenFailed));
    }

    #[test]
    fn test_sign_failure() {
        let registry = test_support::registry();
        let mut key = KeyMaterial::create(&registry, &FAILING_OID, KeyMode::WithPrivate).unwrap();
        key.private_key_mut().unwrap().fill(0x11);

        let mut sig = vec![0u8; COMPACT.max_signature_len];
        assert_eq!(sign(&key, MESSAGE, Some(sig.as_mut_slice())), Err(Error::SignFailed));
    }

    #[test]
    fn test_control() {
        let sha256 = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
        assert_eq!(control(ControlRequest::SetDigest(None)), Ok(()));
        assert_eq!(control(ControlRequest::DigestInit), Ok(()));
        assert_eq!(
            control(ControlRequest::SetDigest(Some(sha256))),
            Err(Error::UnsupportedDigest)
        );
        assert_eq!(
            control(ControlRequest::Other(42)),
            Err(Error::UnsupportedControl)
        );
    }
}
