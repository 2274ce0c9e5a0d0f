//! Derivation of missing key components from a partial key.

use log::trace;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use super::rsa::{blinded_mod_inverse, blinded_reduce};
use crate::components::KeyComponents;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Fills in every absent component of `parts` from the primes and one of the
/// exponents.
///
/// Components already present are kept as they are, with one exception:
/// `dp` and `dq` are always derived as a pair, so if either is missing both
/// are recomputed from `d`.
///
/// Every inversion or reduction that touches secret material goes through
/// the blinded helpers in [`super::rsa`].
pub(crate) fn complete_components<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    parts: &KeyComponents,
) -> Result<KeyComponents> {
    let p = parts.p();
    let q = parts.q();
    let one = BigUint::one();

    if *p <= one || *q <= one {
        return Err(Error::InvalidPrime);
    }

    let n = if parts.n().is_zero() {
        trace!("deriving modulus");
        p * q
    } else {
        parts.n().clone()
    };

    let lambda_p = Zeroizing::new(p - &one);
    let lambda_q = Zeroizing::new(q - &one);
    let phi = Zeroizing::new(&*lambda_p * &*lambda_q);

    let e = if parts.e().is_zero() {
        trace!("deriving public exponent");
        blinded_mod_inverse(rng, parts.d(), &phi).ok_or(Error::NotInvertible)?
    } else {
        parts.e().clone()
    };

    let d = if parts.d().is_zero() {
        trace!("deriving private exponent");
        blinded_mod_inverse(rng, &e, &phi).ok_or(Error::NotInvertible)?
    } else {
        parts.d().clone()
    };

    let (dp, dq) = if parts.dp().is_zero() || parts.dq().is_zero() {
        trace!("deriving CRT exponents");
        (
            blinded_reduce(rng, &d, &lambda_p)?,
            blinded_reduce(rng, &d, &lambda_q)?,
        )
    } else {
        (parts.dp().clone(), parts.dq().clone())
    };

    let qinv = if parts.qinv().is_zero() {
        trace!("deriving CRT coefficient");
        blinded_mod_inverse(rng, q, p).ok_or(Error::NotInvertible)?
    } else {
        parts.qinv().clone()
    };

    Ok(KeyComponents::new(
        n,
        e,
        d,
        p.clone(),
        q.clone(),
        dp,
        dq,
        qinv,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::tests::{private_key, D, DP, DQ, E, N, P, Q, QINV};
    use crate::key::KeyRecord;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn complete(key: &KeyRecord) -> Result<KeyRecord> {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let parts = complete_components(&mut rng, &KeyComponents::from(key))?;
        Ok(KeyRecord::from(&parts))
    }

    #[test]
    fn test_from_primes_and_public_exponent() {
        let key = KeyRecord::default().with_p(&P).with_q(&Q).with_e(&E);
        assert_eq!(complete(&key).unwrap(), private_key());
    }

    #[test]
    fn test_from_primes_and_private_exponent() {
        let key = KeyRecord::default().with_p(&P).with_q(&Q).with_d(&D);
        let completed = complete(&key).unwrap();

        // e is recovered modulo phi, which for 65537 is e itself
        assert_eq!(completed.e(), &E);
        assert_eq!(completed.n(), &N);
        assert_eq!(completed.dp(), &DP);
        assert_eq!(completed.dq(), &DQ);
        assert_eq!(completed.qinv(), &QINV);
    }

    #[test]
    fn test_present_fields_are_kept() {
        let key = private_key().with_qinv(&[]).with_d(&[0x05]);
        let completed = complete(&key).unwrap();
        assert_eq!(completed.d(), &[0x05]);
        assert_eq!(completed.qinv(), &QINV);
    }

    #[test]
    fn test_crt_exponents_recomputed_together() {
        // dq is present but wrong; since dp is absent both are derived again
        let key = private_key().with_dp(&[]).with_dq(&[0x07]);
        let completed = complete(&key).unwrap();
        assert_eq!(completed.dp(), &DP);
        assert_eq!(completed.dq(), &DQ);
    }

    #[test]
    fn test_not_invertible() {
        // 7 divides p-1 for this p, so no inverse exists modulo phi
        let key = KeyRecord::default().with_p(&P).with_q(&Q).with_e(&[0x07]);
        assert_eq!(complete(&key), Err(Error::NotInvertible));
    }

    #[test]
    fn test_degenerate_primes() {
        let key = KeyRecord::default().with_p(&[0x01]).with_q(&Q).with_e(&E);
        assert_eq!(complete(&key), Err(Error::InvalidPrime));
    }
}
