//! PKCS#1 v1.5 encryption and signatures as described in [RFC8017 § 7.2]
//! and [RFC8017 § 8.2].
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec::Vec;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::pkcs1v15::*;
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Encrypts the given message with RSA and the padding scheme from
/// PKCS#1 v1.5. The message must be no longer than the length of the public
/// modulus minus 11 bytes.
pub(crate) fn encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    pub_key: &impl PublicKeyParts,
    msg: &[u8],
) -> Result<Vec<u8>> {
    let em = pkcs1v15_encrypt_pad(rng, msg, pub_key.size())?;
    let int = Zeroizing::new(BigUint::from_bytes_be(&em));
    uint_to_be_pad(rsa_encrypt(pub_key, &int)?, pub_key.size())
}

/// Decrypts a plaintext using RSA and the padding scheme from PKCS#1 v1.5.
///
/// The private operation is blinded with randomness from `rng`.
pub(crate) fn decrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    priv_key: &impl PrivateKeyParts,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let c = BigUint::from_bytes_be(ciphertext);
    let em = rsa_decrypt_and_check(rng, priv_key, &c)?;
    let em = uint_to_zeroizing_be_pad(em, priv_key.size())?;

    pkcs1v15_encrypt_unpad(&em, priv_key.size())
}

/// Calculates the signature of `hashed` using RSASSA-PKCS1-V1_5-SIGN from
/// RSA PKCS#1 v1.5, over the DigestInfo made of `prefix` and `hashed`.
pub(crate) fn sign<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    priv_key: &impl PrivateKeyParts,
    prefix: &[u8],
    hashed: &[u8],
) -> Result<Vec<u8>> {
    let em = pkcs1v15_sign_pad(prefix, hashed, priv_key.size())?;

    let em = BigUint::from_bytes_be(&em);
    uint_to_be_pad(rsa_decrypt_and_check(rng, priv_key, &em)?, priv_key.size())
}

/// Verifies an RSA PKCS#1 v1.5 signature.
pub(crate) fn verify(
    pub_key: &impl PublicKeyParts,
    prefix: &[u8],
    hashed: &[u8],
    sig: &[u8],
) -> Result<()> {
    if sig.len() != pub_key.size() {
        return Err(Error::Verification);
    }

    let sig = BigUint::from_bytes_be(sig);
    if &sig >= pub_key.n() {
        return Err(Error::Verification);
    }

    let em = uint_to_be_pad(rsa_encrypt(pub_key, &sig)?, pub_key.size())?;

    pkcs1v15_sign_unpad(prefix, hashed, &em, pub_key.size())
}
