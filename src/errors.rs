//! Error types.

/// Alias for [`core::result::Result`] with the `rsakey` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Key does not satisfy the public key sanity bounds.
    InvalidPublicKey,

    /// Key does not satisfy the private key sanity bounds.
    InvalidPrivateKey,

    /// Key does not hold enough consistent material to be completed.
    NotCompletable,

    /// Primes are not prime, or do not multiply to the modulus.
    InvalidPrime,

    /// Private exponent or CRT parameters are inconsistent with the primes.
    InvalidExponent,

    /// Requested modulus size is out of range.
    InvalidKeySize,

    /// Requested public exponent is even or out of range.
    InvalidPublicExponent,

    /// Digest is empty or longer than 64 bytes.
    InvalidDigestLength,

    /// Message is empty.
    EmptyMessage,

    /// Message too long.
    MessageTooLong,

    /// Ciphertext is empty or longer than the modulus.
    InvalidCiphertextLength,

    /// Digest algorithm name is not one of the supported set.
    UnknownAlgorithm,

    /// Encryption padding tag is not one of the supported set.
    UnknownPadding,

    /// Decryption error.
    Decryption,

    /// Verification error.
    Verification,

    /// A required modular inverse does not exist.
    NotInvertible,

    /// Invalid padding length.
    InvalidPadLen,

    /// Internal error.
    Internal,

    /// PKCS#1 error.
    Pkcs1(pkcs1::Error),

    /// PKCS#8 error.
    Pkcs8(pkcs8::Error),
}

/// Broad category of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A key failed a structural invariant (bit lengths, missing fields,
    /// even public exponent).
    Invariant,

    /// A caller-supplied input is out of its allowed range.
    InputBound,

    /// The arithmetic engine or the DER codec reported a failure.
    Engine,
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPublicKey
            | Error::InvalidPrivateKey
            | Error::NotCompletable
            | Error::InvalidPrime
            | Error::InvalidExponent => ErrorKind::Invariant,
            Error::InvalidKeySize
            | Error::InvalidPublicExponent
            | Error::InvalidDigestLength
            | Error::EmptyMessage
            | Error::MessageTooLong
            | Error::InvalidCiphertextLength
            | Error::UnknownAlgorithm
            | Error::UnknownPadding => ErrorKind::InputBound,
            Error::Decryption
            | Error::Verification
            | Error::NotInvertible
            | Error::InvalidPadLen
            | Error::Internal
            | Error::Pkcs1(_)
            | Error::Pkcs8(_) => ErrorKind::Engine,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidPublicKey => write!(f, "invalid public key"),
            Error::InvalidPrivateKey => write!(f, "invalid private key"),
            Error::NotCompletable => write!(f, "key cannot be completed"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidKeySize => write!(f, "invalid key size"),
            Error::InvalidPublicExponent => write!(f, "invalid public exponent"),
            Error::InvalidDigestLength => write!(f, "invalid digest length"),
            Error::EmptyMessage => write!(f, "message is empty"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::InvalidCiphertextLength => write!(f, "invalid ciphertext length"),
            Error::UnknownAlgorithm => write!(f, "unknown digest algorithm"),
            Error::UnknownPadding => write!(f, "unknown padding scheme"),
            Error::Decryption => write!(f, "decryption error"),
            Error::Verification => write!(f, "verification error"),
            Error::NotInvertible => write!(f, "modular inverse does not exist"),
            Error::InvalidPadLen => write!(f, "invalid padding length"),
            Error::Internal => write!(f, "internal error"),
            Error::Pkcs1(err) => write!(f, "{}", err),
            Error::Pkcs8(err) => write!(f, "{}", err),
        }
    }
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Error {
        Error::Pkcs1(err)
    }
}

impl From<pkcs1::der::Error> for Error {
    fn from(err: pkcs1::der::Error) -> Error {
        Error::Pkcs1(pkcs1::Error::Asn1(err))
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Error {
        Error::Pkcs8(err)
    }
}

impl From<pkcs8::spki::Error> for Error {
    fn from(err: pkcs8::spki::Error) -> Error {
        Error::Pkcs8(pkcs8::Error::PublicKey(err))
    }
}
