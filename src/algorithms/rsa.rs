//! Generic RSA implementation

use num_bigint::{BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Bit size of the random multiple added to a secret value before it is
/// reduced.
const REDUCTION_BLINDING_BITS: usize = 64;

/// Raw RSA encryption of m with the public key. No padding is performed.
#[inline]
pub(crate) fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if key.n().is_zero() {
        return Err(Error::InvalidPublicKey);
    }

    Ok(m.modpow(key.e(), key.n()))
}

/// Performs raw RSA decryption with no padding or error checking.
///
/// The ciphertext is always blinded with a fresh random factor drawn from
/// `rng`. The CRT values are used when present, the private exponent
/// otherwise.
pub(crate) fn rsa_decrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    priv_key: &impl PrivateKeyParts,
    c: &BigUint,
) -> Result<BigUint> {
    if priv_key.n().is_zero() || c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    let (c, unblinder) = blind(rng, priv_key, c);
    let c = Zeroizing::new(c);

    let p = priv_key.p();
    let q = priv_key.q();
    let dp = priv_key.dp();
    let dq = priv_key.dq();
    let qinv = priv_key.qinv();

    let m = if [p, q, dp, dq, qinv].iter().any(|x| x.is_zero()) {
        c.modpow(priv_key.d(), priv_key.n())
    } else {
        // m1 = c^dp mod p, m2 = c^dq mod q
        // m = m2 + q * (qinv * (m1 - m2) mod p)
        let mut m1 = c.modpow(dp, p);
        let mut m2 = c.modpow(dq, q);

        let mut h = (&m1 + p - (&m2 % p)) * qinv;
        h %= p;

        let m = &h * q + &m2;

        m1.zeroize();
        m2.zeroize();
        h.zeroize();

        m
    };

    Ok(unblind(priv_key, &m, &unblinder))
}

/// Performs raw RSA decryption with no padding.
///
/// This will also check for errors in the CRT computation by re-encrypting
/// the result.
#[inline]
pub(crate) fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    priv_key: &impl PrivateKeyParts,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let unblinder;
    loop {
        r = rng.gen_biguint_below(key.n());
        if r.is_zero() {
            r = BigUint::one();
        }
        if let Some(ir) = r.clone().mod_inverse(key.n()).and_then(|ir| ir.into_biguint()) {
            unblinder = ir;
            break;
        }
    }

    let c = {
        let mut rpowe = r.modpow(key.e(), key.n()); // N != 0
        let mut c = c * &rpowe;
        c %= key.n();

        rpowe.zeroize();

        c
    };

    r.zeroize();

    (c, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind(key: &impl PublicKeyParts, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

/// Computes `a^-1 mod m` without running the inversion on `a` itself.
///
/// A random unit `r` is drawn and `(a*r)^-1 * r` is returned, so the
/// variable-time inversion only ever sees a uniformly blinded operand.
/// Returns `None` if `a` is not invertible modulo `m`.
pub(crate) fn blinded_mod_inverse<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    a: &BigUint,
    m: &BigUint,
) -> Option<BigUint> {
    if *m <= BigUint::one() || a.is_zero() {
        return None;
    }

    let mut r = loop {
        let r = rng.gen_biguint_below(m);
        if !r.is_zero() && r.gcd(m).is_one() {
            break r;
        }
    };

    let blinded = Zeroizing::new((a * &r) % m);
    let inverse = (*blinded)
        .clone()
        .mod_inverse(m)
        .and_then(|inv| inv.into_biguint())
        .map(Zeroizing::new);

    let result = inverse.map(|inv| (&*inv * &r) % m);
    r.zeroize();

    result
}

/// Computes `x mod m` on an exponent-blinded copy of `x`, that is
/// `(x + r*m) mod m` for a random `r`.
pub(crate) fn blinded_reduce<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    x: &BigUint,
    m: &BigUint,
) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::Internal);
    }

    let mut r = rng.gen_biguint(REDUCTION_BLINDING_BITS);
    let blinded = Zeroizing::new(&r * m + x);
    r.zeroize();

    Ok(&*blinded % m)
}
