//! SubjectPublicKeyInfo / PrivateKeyInfo encoding.
//!
//! Wire forms:
//!
//! | Form | Algorithm identifier | Payload |
//! |------|----------------------|---------|
//! | public | OID, parameters absent | raw `public_key_len` bytes in the BIT STRING |
//! | private | OID, parameters absent | OCTET STRING wrapping `private \|\| public` |
//!
//! Parameters must be absent on both sides. An explicit ASN.1 `NULL` counts
//! as present and is rejected.

use der::asn1::{BitString, OctetStringRef};
use der::{Decode, Encode};
use pkcs8::{PrivateKeyInfo, SecretDocument};
use pqkey_core::{Error, ObjectIdentifier, Registry, Result};
use spki::{
    AlgorithmIdentifier, AlgorithmIdentifierOwned, AlgorithmIdentifierRef,
    SubjectPublicKeyInfoOwned, SubjectPublicKeyInfoRef,
};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::host::KeyComparison;
use crate::key::{allocate, allocate_secret, KeyMaterial, KeyMode};

fn ensure_no_parameters<P>(algorithm: &AlgorithmIdentifier<P>) -> Result<()> {
    if algorithm.parameters.is_some() {
        tracing::debug!(oid = %algorithm.oid, "algorithm parameters must be absent");
        return Err(Error::ParametersNotAllowed);
    }
    Ok(())
}

fn algorithm_identifier(oid: ObjectIdentifier) -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid,
        parameters: None,
    }
}

/// Build the SubjectPublicKeyInfo for `key`.
pub fn encode_public(key: &KeyMaterial) -> Result<SubjectPublicKeyInfoOwned> {
    let public_key = key.public_key();
    if public_key.len() != key.params().public_key_len {
        tracing::debug!(algorithm = key.entry().name, "public key buffer has wrong size");
        return Err(Error::InvalidKeyState);
    }

    let mut encoded = allocate(public_key.len())?;
    encoded.copy_from_slice(public_key);
    let subject_public_key = BitString::new(0, encoded)?;

    Ok(SubjectPublicKeyInfoOwned {
        algorithm: algorithm_identifier(key.algorithm()),
        subject_public_key,
    })
}

/// DER-encode the SubjectPublicKeyInfo for `key`.
pub fn encode_public_der(key: &KeyMaterial) -> Result<Vec<u8>> {
    Ok(encode_public(key)?.to_der()?)
}

/// Build a public-only container from a SubjectPublicKeyInfo's fields.
///
/// `raw` is the BIT STRING payload, or `None` if the collaborator could not
/// produce one.
///
/// # Errors
///
/// - [`Error::MissingData`] if `raw` is `None`
/// - [`Error::ParametersNotAllowed`] if `algorithm` carries parameters
/// - errors from [`KeyMaterial::create`]
/// - [`Error::LengthMismatch`] unless `raw` is exactly `public_key_len` bytes
pub fn decode_public<P>(
    registry: &Registry,
    algorithm: &AlgorithmIdentifier<P>,
    raw: Option<&[u8]>,
) -> Result<KeyMaterial> {
    let raw = raw.ok_or_else(|| {
        tracing::debug!(oid = %algorithm.oid, "public key payload missing");
        Error::MissingData
    })?;
    ensure_no_parameters(algorithm)?;

    let mut key = KeyMaterial::create(registry, &algorithm.oid, KeyMode::PublicOnly)?;
    let expected = key.params().public_key_len;
    if raw.len() != expected {
        tracing::debug!(
            algorithm = key.entry().name,
            expected,
            actual = raw.len(),
            "public key length mismatch"
        );
        return Err(Error::LengthMismatch {
            expected,
            actual: raw.len(),
        });
    }

    key.public_key_mut().copy_from_slice(raw);
    Ok(key)
}

/// Parse a DER SubjectPublicKeyInfo into a public-only container.
pub fn decode_public_der(registry: &Registry, der: &[u8]) -> Result<KeyMaterial> {
    let info = SubjectPublicKeyInfoRef::from_der(der).map_err(|err| {
        tracing::debug!(%err, "malformed SubjectPublicKeyInfo");
        Error::MalformedEncoding
    })?;
    decode_public(registry, &info.algorithm, info.subject_public_key.as_bytes())
}

/// Compare two public keys in constant time.
///
/// Returns [`KeyComparison::Incomparable`] when either side has no
/// container.
pub fn compare_public(a: Option<&KeyMaterial>, b: Option<&KeyMaterial>) -> KeyComparison {
    match (a, b) {
        (Some(a), Some(b)) => {
            if bool::from(a.public_key().ct_eq(b.public_key())) {
                KeyComparison::Equal
            } else {
                KeyComparison::NotEqual
            }
        }
        _ => KeyComparison::Incomparable,
    }
}

/// Build a private container from a PrivateKeyInfo's fields.
///
/// `private_key_field` is the PrivateKeyInfo `privateKey` contents, itself a
/// DER OCTET STRING holding `private || public`. If that inner layer does not
/// parse, the payload is treated as empty and fails the length check.
///
/// # Errors
///
/// - [`Error::ParametersNotAllowed`] if `algorithm` carries parameters
/// - errors from [`KeyMaterial::create`]
/// - [`Error::LengthMismatch`] unless the payload is exactly
///   `private_key_len + public_key_len` bytes
pub fn decode_private<P>(
    registry: &Registry,
    algorithm: &AlgorithmIdentifier<P>,
    private_key_field: &[u8],
) -> Result<KeyMaterial> {
    let payload: &[u8] = match OctetStringRef::from_der(private_key_field) {
        Ok(octets) => octets.as_bytes(),
        Err(err) => {
            tracing::debug!(%err, "private key octet string did not parse");
            &[]
        }
    };
    ensure_no_parameters(algorithm)?;

    let mut key = KeyMaterial::create(registry, &algorithm.oid, KeyMode::WithPrivate)?;
    let params = *key.params();
    let expected = params.private_key_len + params.public_key_len;
    if payload.len() != expected {
        tracing::debug!(
            algorithm = key.entry().name,
            expected,
            actual = payload.len(),
            "private key length mismatch"
        );
        return Err(Error::LengthMismatch {
            expected,
            actual: payload.len(),
        });
    }

    let (private_key, public_key) = payload.split_at(params.private_key_len);
    key.private_key_mut()
        .ok_or(Error::InvalidKeyState)?
        .copy_from_slice(private_key);
    key.public_key_mut().copy_from_slice(public_key);
    Ok(key)
}

/// Parse a DER PrivateKeyInfo into a private container.
pub fn decode_private_der(registry: &Registry, der: &[u8]) -> Result<KeyMaterial> {
    let info = PrivateKeyInfo::try_from(der).map_err(|err| {
        tracing::debug!(%err, "malformed PrivateKeyInfo");
        Error::MalformedEncoding
    })?;
    decode_private(registry, &info.algorithm, info.private_key)
}

/// Encode `private || public` as one DER OCTET STRING.
///
/// This is the PrivateKeyInfo `privateKey` payload. The concatenation is
/// built in a zeroizing scratch buffer that is wiped on every exit path.
pub fn encode_private_payload(key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
    let private_key = key.private_key().ok_or_else(|| {
        tracing::debug!(algorithm = key.entry().name, "no private key to encode");
        Error::InvalidKeyState
    })?;
    let params = key.params();

    let mut scratch = allocate_secret(params.private_key_len + params.public_key_len)?;
    let (sk, pk) = scratch.split_at_mut(params.private_key_len);
    sk.copy_from_slice(private_key);
    pk.copy_from_slice(key.public_key());

    let octets = OctetStringRef::new(&scratch).map_err(|err| {
        tracing::debug!(%err, "octet string wrapping failed");
        Error::EncodingFailed
    })?;
    let mut encoded = allocate_secret(usize::try_from(octets.encoded_len()?)?)?;
    octets.encode_to_slice(&mut encoded)?;
    Ok(encoded)
}

/// Encode `key` as a DER PrivateKeyInfo (v1, parameters absent).
pub fn encode_private(key: &KeyMaterial) -> Result<SecretDocument> {
    let payload = encode_private_payload(key)?;
    let algorithm = AlgorithmIdentifierRef {
        oid: key.algorithm(),
        parameters: None,
    };
    SecretDocument::encode_msg(&PrivateKeyInfo::new(algorithm, &payload)).map_err(|err| {
        tracing::debug!(%err, "PrivateKeyInfo encoding failed");
        Error::EncodingFailed
    })
}
