//! Encoding and decoding of [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! The label is always empty.

use alloc::vec::Vec;

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

/// Encodes `msg` with OAEP padding into a block of `k` bytes.
///
/// The message must be no longer than `k - 2 - 2 * D::output_size()` bytes.
pub(crate) fn oaep_encrypt_digest<R, D, MGD>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();

    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let p_hash = D::digest(b"");

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB =  pHash || PS || 01 || M
    let db_len = k - h_size - 1;

    db[0..h_size].copy_from_slice(&p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    let mut mgf_digest = MGD::new();
    mgf1_xor(db, &mut mgf_digest, seed);
    mgf1_xor(seed, &mut mgf_digest, db);

    Ok(em)
}

/// Decodes an OAEP padded block of `k` bytes.
///
/// The block is unmasked and checked in constant time; only the final accept
/// or reject decision branches.
pub(crate) fn oaep_decrypt_digest<D, MGD>(em: &mut [u8], k: usize) -> Result<Vec<u8>>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();
    let expected_p_hash = D::digest(b"");

    let res = decrypt_inner(em, h_size, &expected_p_hash, k, |seed, db| {
        let mut mgf_digest = MGD::new();
        mgf1_xor(seed, &mut mgf_digest, db);
        mgf1_xor(db, &mut mgf_digest, seed);
    })?;

    if res.is_none().into() {
        return Err(Error::Decryption);
    }

    let index = res.unwrap();

    Ok(em[index as usize..].to_vec())
}

/// Unmasks `em` in place and returns the index of the first message byte,
/// if the block is well formed.
#[inline]
fn decrypt_inner<MGF: FnMut(&mut [u8], &mut [u8])>(
    em: &mut [u8],
    h_size: usize,
    expected_p_hash: &[u8],
    k: usize,
    mut mgf: MGF,
) -> Result<CtOption<u32>> {
    if k < h_size * 2 + 2 || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    mgf(seed, db);

    let hash_are_equal = db[0..h_size].ct_eq(expected_p_hash);

    // The remainder of the plaintext must be zero or more 0x00, followed
    // by 0x01, followed by the message.
    //   looking_for_index: 1 if we are still looking for the 0x01
    //   index: the offset of the first 0x01 byte
    //   nonzero_before_one: 1 if we saw a non-zero byte before the 1
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;

    Ok(CtOption::new(index + 2 + (h_size * 2) as u32, valid))
}
