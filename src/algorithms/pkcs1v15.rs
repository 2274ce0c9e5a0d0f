//! PKCS#1 v1.5 encoding primitives as described in [RFC8017 § 7.2] and
//! [RFC8017 § 9.2].
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 9.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Overhead of the PKCS#1 v1.5 padding in bytes.
pub(crate) const PKCS1V15_OVERHEAD: usize = 11;

/// Fills the provided slice with random values, which are guaranteed
/// to not be zero.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// Applies the PKCS#1 v1.5 encryption padding. The message must be no longer
/// than `k - 11` bytes.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + PKCS1V15_OVERHEAD > k {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x02 || PS || 0x00 || M
    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..k - msg.len() - 1]);
    em[k - msg.len() - 1] = 0;
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Removes the PKCS#1 v1.5 encryption padding.
///
/// The structure of `em` is checked in constant time; only the final
/// accept or reject decision branches.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: &[u8], k: usize) -> Result<Vec<u8>> {
    let (valid, index) = decrypt_inner(em, k)?;
    if valid.unwrap_u8() == 0 {
        return Err(Error::Decryption);
    }

    Ok(em[index as usize..].to_vec())
}

/// Scans a decrypted block for a well-formed PKCS#1 v1.5 encryption padding.
///
/// Returns whether the block is valid, and if so the index of the first
/// message byte. Memory is accessed in the same pattern for every input.
#[inline]
fn decrypt_inner(em: &[u8], k: usize) -> Result<(Choice, u32)> {
    if k < PKCS1V15_OVERHEAD || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let second_byte_is_two = em[1].ct_eq(&2u8);

    // The remainder of the plaintext must be a string of non-zero random
    // octets, followed by a 0, followed by the message.
    //   looking_for_index: 1 iff we are still looking for the zero.
    //   index: the offset of the first zero byte.
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals0);
        looking_for_index &= !equals0;
    }

    // The PS padding must be at least 8 bytes long, and it starts two
    // bytes into em.
    let valid_ps = !index.ct_lt(&(2 + 8));
    let valid = first_byte_is_zero & second_byte_is_two & !looking_for_index & valid_ps;
    index = u32::conditional_select(&0, &(index + 1), valid);

    Ok((valid, index))
}

/// Applies the PKCS#1 v1.5 signature padding to a DigestInfo made of
/// `prefix` and `hashed`.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + PKCS1V15_OVERHEAD {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..k].copy_from_slice(hashed);

    Ok(em)
}

/// Checks that `em` is the PKCS#1 v1.5 signature padding of the DigestInfo
/// made of `prefix` and `hashed`.
#[inline]
pub(crate) fn pkcs1v15_sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8], k: usize) -> Result<()> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + PKCS1V15_OVERHEAD || em.len() != k {
        return Err(Error::Verification);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut ok = em[0].ct_eq(&0u8);
    ok &= em[1].ct_eq(&1u8);
    ok &= em[k - hash_len..k].ct_eq(hashed);
    ok &= em[k - t_len..k - hash_len].ct_eq(prefix);
    ok &= em[k - t_len - 1].ct_eq(&0u8);

    for el in em.iter().skip(2).take(k - t_len - 3) {
        ok &= el.ct_eq(&0xff)
    }

    if ok.unwrap_u8() != 1 {
        return Err(Error::Verification);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_non_zero_bytes() {
        for _ in 0..10 {
            let mut rng = ChaCha8Rng::from_seed([42; 32]);
            let mut b = vec![0u8; 512];
            non_zero_random_bytes(&mut rng, &mut b);
            for el in &b {
                assert_ne!(*el, 0u8);
            }
        }
    }

    #[test]
    fn test_encrypt_tiny_no_crash() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 8;
        let message = vec![1u8; 4];
        let res = pkcs1v15_encrypt_pad(&mut rng, &message, k);
        assert_eq!(res, Err(Error::MessageTooLong));
    }

    #[test]
    fn test_encrypt_pad_unpad() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 64;

        for len in [1, 16, k - PKCS1V15_OVERHEAD] {
            let msg = vec![0x5a; len];
            let em = pkcs1v15_encrypt_pad(&mut rng, &msg, k).unwrap();
            assert_eq!(em[..2], [0, 2]);
            assert_eq!(pkcs1v15_encrypt_unpad(&em, k).unwrap(), msg);
        }

        let msg = vec![0x5a; k - PKCS1V15_OVERHEAD + 1];
        assert_eq!(
            pkcs1v15_encrypt_pad(&mut rng, &msg, k),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_encrypt_unpad_rejects_malformed() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 64;
        let em = pkcs1v15_encrypt_pad(&mut rng, b"testing", k).unwrap();

        let mut bad_type = em.clone();
        bad_type[1] = 1;
        assert_eq!(pkcs1v15_encrypt_unpad(&bad_type, k), Err(Error::Decryption));

        // separator inside the first 8 bytes of padding
        let mut short_ps = em.clone();
        short_ps[5] = 0;
        assert_eq!(pkcs1v15_encrypt_unpad(&short_ps, k), Err(Error::Decryption));

        // no separator at all
        let mut no_sep = em.clone();
        for el in no_sep.iter_mut().skip(2) {
            *el = 0x11;
        }
        assert_eq!(pkcs1v15_encrypt_unpad(&no_sep, k), Err(Error::Decryption));

        assert_eq!(pkcs1v15_encrypt_unpad(&em[1..], k), Err(Error::Decryption));
    }

    #[test]
    fn test_sign_pad_unpad() {
        let prefix = [0x30, 0x21];
        let hashed = [0xab; 20];
        let k = 64;

        let em = pkcs1v15_sign_pad(&prefix, &hashed, k).unwrap();
        assert_eq!(em[..3], [0, 1, 0xff]);
        assert_eq!(pkcs1v15_sign_unpad(&prefix, &hashed, &em, k), Ok(()));

        let mut tampered = em.clone();
        tampered[k - 1] ^= 1;
        assert_eq!(
            pkcs1v15_sign_unpad(&prefix, &hashed, &tampered, k),
            Err(Error::Verification)
        );

        assert_eq!(
            pkcs1v15_sign_pad(&prefix, &[0; 52], k),
            Err(Error::MessageTooLong)
        );
    }
}
