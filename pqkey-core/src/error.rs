//! Error types for pqkey key-management operations.

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the key adapter and its collaborators.
///
/// Every failure is terminal for the call that produced it. Callers never
/// receive a half-built key: partial construction is unwound before the
/// error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The algorithm identifier has no registered primitive.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    /// The primitive (or its randomness source) could not be instantiated.
    #[error("signature primitive initialization failed")]
    PrimitiveInitFailed,

    /// A key or scratch buffer could not be allocated.
    #[error("allocation failed")]
    AllocationFailed,

    /// The key container is missing or lacks the material the operation needs.
    #[error("invalid key state")]
    InvalidKeyState,

    /// No key payload was supplied.
    #[error("missing key data")]
    MissingData,

    /// Algorithm parameters were present; this profile requires them absent.
    #[error("algorithm parameters are not allowed")]
    ParametersNotAllowed,

    /// Key payload length does not match the primitive's declared length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Octet-string or key-info encoding failed.
    #[error("encoding failed")]
    EncodingFailed,

    /// The outer key document is not well-formed DER.
    #[error("malformed key encoding")]
    MalformedEncoding,

    /// Signing requested on a key without private material.
    #[error("missing private key")]
    MissingPrivateKey,

    /// Verification requested without a public key, message or signature.
    #[error("missing public key or input")]
    MissingPublicKeyOrInput,

    /// Output buffer cannot hold a maximum-length signature.
    #[error("signature buffer too small: need {required}, got {actual}")]
    BufferTooSmall {
        /// Required length in bytes.
        required: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// The primitive failed to produce a signature.
    #[error("signing failed")]
    SignFailed,

    /// Signature verification failed.
    #[error("signature verification failed")]
    VerificationFailed,

    /// The primitive failed to generate a key pair.
    #[error("key generation failed")]
    KeygenFailed,

    /// A digest was configured; this scheme signs raw messages only.
    #[error("unsupported digest")]
    UnsupportedDigest,

    /// A signature algorithm identifier names another scheme or carries parameters.
    #[error("unsupported algorithm or parameters")]
    UnsupportedAlgorithmOrParams,

    /// The control request type is not handled by this method.
    #[error("unsupported control request")]
    UnsupportedControl,
}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Self {
        Error::EncodingFailed
    }
}
