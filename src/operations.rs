//! Key generation, completion and the private and public key operations.
//!
//! Every operation checks the key with the matching sanity predicate before
//! touching it, converts it to [`KeyComponents`], and hands the arithmetic to
//! [`crate::algorithms`]. None of them modify the record they are called on.

use alloc::vec::Vec;

use log::{debug, trace};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::complete::complete_components;
use crate::algorithms::generate::generate_key_with_exp;
use crate::components::KeyComponents;
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::key::{
    KeyRecord, MAX_DIGEST_LEN, MAX_MODULUS_BITS, MAX_PUBLIC_EXPONENT, MAX_SIGNATURE_LEN,
    MIN_MODULUS_BITS, MIN_PUBLIC_EXPONENT,
};
use crate::padding::EncryptionPadding;
use crate::{oaep, pkcs1v15};

/// Outcome of [`KeyRecord::complete`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Completion {
    /// Every derivable component was already present. No new record is
    /// produced.
    AlreadyComplete,

    /// A new record with every missing component derived.
    Completed(KeyRecord),
}

impl Completion {
    /// Returns the derived record, if one was produced.
    pub fn into_completed(self) -> Option<KeyRecord> {
        match self {
            Completion::AlreadyComplete => None,
            Completion::Completed(key) => Some(key),
        }
    }
}

impl KeyRecord {
    /// Generates a new two-prime key with a modulus of exactly `bits` bits
    /// and the public exponent `exponent`.
    ///
    /// `bits` must be within 512 and 16384, and `exponent` must be odd and
    /// within 3 and `2^33 - 1`. The returned record always satisfies
    /// [`KeyRecord::is_sane_private`].
    pub fn generate<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bits: usize,
        exponent: u64,
    ) -> Result<KeyRecord> {
        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) {
            debug!("generate: modulus size {} out of range", bits);
            return Err(Error::InvalidKeySize);
        }

        if exponent & 1 == 0 || !(MIN_PUBLIC_EXPONENT..=MAX_PUBLIC_EXPONENT).contains(&exponent) {
            debug!("generate: public exponent {} rejected", exponent);
            return Err(Error::InvalidPublicExponent);
        }

        let exp = BigUint::from(exponent);

        loop {
            let parts = generate_key_with_exp(rng, bits, &exp)?;
            let key = KeyRecord::from(&parts);

            if key.is_sane_private() {
                return Ok(key);
            }

            trace!("generate: candidate key failed the sanity check, retrying");
        }
    }

    /// Derives every missing component of a partial private key.
    ///
    /// The record must satisfy [`KeyRecord::is_sane_for_completion`]: both
    /// primes and at least one exponent are required. Returns
    /// [`Completion::AlreadyComplete`] if nothing is missing.
    ///
    /// The result is not checked with [`KeyRecord::is_sane_private`]; callers
    /// should do so before using it.
    pub fn complete<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<Completion> {
        if !self.is_sane_for_completion() {
            debug!("complete: key cannot be completed");
            return Err(Error::NotCompletable);
        }

        if !self.needs_completion() {
            return Ok(Completion::AlreadyComplete);
        }

        let parts = complete_components(rng, &KeyComponents::from(self))?;

        Ok(Completion::Completed(KeyRecord::from(&parts)))
    }

    /// Signs a precomputed digest with RSASSA-PKCS1-v1_5.
    ///
    /// `digest` must be between 1 and 64 bytes. It is embedded in a
    /// `DigestInfo` naming `algorithm`, but its length is not required to
    /// match the algorithm's output size. The private key operation is
    /// blinded with randomness from `rng`. The signature is exactly
    /// [`KeyRecord::size`] bytes long.
    pub fn sign<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        algorithm: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>> {
        if !self.is_sane_private() {
            debug!("sign: key is not a sane private key");
            return Err(Error::InvalidPrivateKey);
        }

        if !valid_digest_len(digest) {
            debug!("sign: digest length {} out of range", digest.len());
            return Err(Error::InvalidDigestLength);
        }

        let parts = KeyComponents::from(self);
        let prefix = algorithm.digest_info_prefix(digest.len())?;

        pkcs1v15::sign(rng, &parts, &prefix, digest)
    }

    /// Verifies an RSASSA-PKCS1-v1_5 signature over a precomputed digest.
    ///
    /// Every failure, including a malformed key or out of range inputs,
    /// is reported as [`Error::Verification`].
    pub fn verify(&self, algorithm: HashAlgorithm, digest: &[u8], signature: &[u8]) -> Result<()> {
        if !self.is_sane_public() {
            debug!("verify: key is not a sane public key");
            return Err(Error::Verification);
        }

        if !valid_digest_len(digest) || signature.is_empty() || signature.len() > MAX_SIGNATURE_LEN
        {
            debug!("verify: input length out of range");
            return Err(Error::Verification);
        }

        let parts = KeyComponents::from(&self.to_public());
        let prefix = algorithm
            .digest_info_prefix(digest.len())
            .map_err(|_| Error::Verification)?;

        pkcs1v15::verify(&parts, &prefix, digest, signature).map_err(|_| Error::Verification)
    }

    /// Encrypts `msg` with the public key.
    ///
    /// `msg` must not be empty and may be at most [`KeyRecord::size`] minus
    /// 11 bytes for PKCS#1 v1.5, or minus 41 bytes for OAEP. OAEP with SHA-1
    /// needs one more byte than that, so a message of exactly the OAEP bound
    /// fails with [`Error::MessageTooLong`]. The ciphertext is exactly
    /// [`KeyRecord::size`] bytes long.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: EncryptionPadding,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        if !self.is_sane_public() {
            debug!("encrypt: key is not a sane public key");
            return Err(Error::InvalidPublicKey);
        }

        if msg.is_empty() {
            debug!("encrypt: empty message");
            return Err(Error::EmptyMessage);
        }

        if msg.len() > padding.max_message_len(self.size()) {
            debug!("encrypt: message too long for {} padding", padding);
            return Err(Error::MessageTooLong);
        }

        let parts = KeyComponents::from(&self.to_public());

        match padding {
            EncryptionPadding::Pkcs1v15 => pkcs1v15::encrypt(rng, &parts, msg),
            EncryptionPadding::Oaep => oaep::encrypt(rng, &parts, msg),
        }
    }

    /// Decrypts `ciphertext` with the private key.
    ///
    /// `ciphertext` must not be empty or longer than [`KeyRecord::size`].
    /// The private key operation is blinded with randomness from `rng`, and
    /// the padding is removed in constant time.
    pub fn decrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: EncryptionPadding,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        if !self.is_sane_private() {
            debug!("decrypt: key is not a sane private key");
            return Err(Error::InvalidPrivateKey);
        }

        if ciphertext.is_empty() || ciphertext.len() > self.size() {
            debug!("decrypt: ciphertext length {} out of range", ciphertext.len());
            return Err(Error::InvalidCiphertextLength);
        }

        let parts = KeyComponents::from(self);

        match padding {
            EncryptionPadding::Pkcs1v15 => pkcs1v15::decrypt(rng, &parts, ciphertext),
            EncryptionPadding::Oaep => oaep::decrypt(rng, &parts, ciphertext),
        }
    }

    /// Returns [`Error::InvalidPublicKey`] unless the key is a sane public key.
    pub fn validate_public(&self) -> Result<()> {
        if !self.is_sane_public() {
            debug!("validate_public: key is not a sane public key");
            return Err(Error::InvalidPublicKey);
        }

        Ok(())
    }

    /// Checks that the key is a sane private key and that its components
    /// are arithmetically consistent.
    pub fn validate_private(&self) -> Result<()> {
        if !self.is_sane_private() {
            debug!("validate_private: key is not a sane private key");
            return Err(Error::InvalidPrivateKey);
        }

        KeyComponents::from(self).validate().map_err(|err| {
            debug!("validate_private: components are inconsistent: {}", err);
            err
        })
    }
}

#[inline]
fn valid_digest_len(digest: &[u8]) -> bool {
    (1..=MAX_DIGEST_LEN).contains(&digest.len())
}
