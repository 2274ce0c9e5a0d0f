//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! SHA-1 is used both to hash the (empty) label and inside MGF1.

use alloc::vec::Vec;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::algorithms::oaep::*;
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::Result;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Encrypts the given message with RSA and OAEP padding. The message must
/// be no longer than the length of the public modulus minus 42 bytes.
pub(crate) fn encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    pub_key: &impl PublicKeyParts,
    msg: &[u8],
) -> Result<Vec<u8>> {
    let em = oaep_encrypt_digest::<_, Sha1, Sha1>(rng, msg, pub_key.size())?;
    let int = Zeroizing::new(BigUint::from_bytes_be(&em));
    uint_to_be_pad(rsa_encrypt(pub_key, &int)?, pub_key.size())
}

/// Decrypts a ciphertext using RSA and OAEP padding.
///
/// The private operation is blinded with randomness from `rng`.
pub(crate) fn decrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    priv_key: &impl PrivateKeyParts,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let c = BigUint::from_bytes_be(ciphertext);
    let em = rsa_decrypt_and_check(rng, priv_key, &c)?;
    let mut em = uint_to_zeroizing_be_pad(em, priv_key.size())?;

    oaep_decrypt_digest::<Sha1, Sha1>(&mut em, priv_key.size())
}
