//! Digest algorithms accepted for PKCS#1 v1.5 signatures.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use const_oid::ObjectIdentifier;

use crate::errors::{Error, Result};
use crate::key::MAX_DIGEST_LEN;

const MD5_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.2.5");
const RIPEMD160_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.36.3.2.1");
const SHA1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
const SHA224_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.4");
const SHA256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
const SHA384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
const SHA512_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

/// The closed set of digest algorithms a signature can be made over.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HashAlgorithm {
    /// MD5
    Md5,
    /// RIPEMD-160
    Ripemd160,
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 7] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Ripemd160,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Returns the object identifier of the algorithm.
    pub const fn oid(&self) -> ObjectIdentifier {
        match self {
            HashAlgorithm::Md5 => MD5_OID,
            HashAlgorithm::Ripemd160 => RIPEMD160_OID,
            HashAlgorithm::Sha1 => SHA1_OID,
            HashAlgorithm::Sha224 => SHA224_OID,
            HashAlgorithm::Sha256 => SHA256_OID,
            HashAlgorithm::Sha384 => SHA384_OID,
            HashAlgorithm::Sha512 => SHA512_OID,
        }
    }

    /// Returns the length in bytes of a digest.
    pub const fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Ripemd160 | HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Returns the lowercase name of the algorithm.
    pub const fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Ripemd160 => "ripemd160",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Returns the DER encoding of a `DigestInfo` up to, but excluding, a
    /// digest of `digest_len` bytes.
    ///
    /// prefix = 0x30 <oid_len + 8 + digest_len> 0x30 <oid_len + 4> 0x06 <oid_len> oid 0x05 0x00 0x04 <digest_len>
    ///
    /// Returns [`Error::InvalidDigestLength`] unless `digest_len` is between 1
    /// and [`MAX_DIGEST_LEN`], which keeps every length in a single byte.
    pub fn digest_info_prefix(&self, digest_len: usize) -> Result<Vec<u8>> {
        if !(1..=MAX_DIGEST_LEN).contains(&digest_len) {
            return Err(Error::InvalidDigestLength);
        }

        let oid = self.oid();
        let oid = oid.as_bytes();
        let oid_len = oid.len() as u8;
        let digest_len = digest_len as u8;
        let mut v = vec![
            0x30,
            oid_len + 8 + digest_len,
            0x30,
            oid_len + 4,
            0x6,
            oid_len,
        ];
        v.extend_from_slice(oid);
        v.extend_from_slice(&[0x05, 0x00, 0x04, digest_len]);
        Ok(v)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or(Error::UnknownAlgorithm)
    }
}
