//! Engine form of the key record.
//!
//! [`KeyComponents`] holds the eight key components as arbitrary precision
//! integers, which is what the arithmetic in [`crate::algorithms`] works on.
//! Conversion in both directions is lossless: every buffer of a
//! [`KeyRecord`] maps to exactly one [`BigUint`], and an absent component
//! maps to zero.

use alloc::vec::Vec;
use core::fmt;

use num_bigint::prime::probably_prime;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::key::KeyRecord;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Number of Miller-Rabin rounds used when checking the primes of a key.
const PRIME_CHECK_ROUNDS: usize = 20;

/// RSA key components as unsigned big integers. Zero means "unknown".
#[derive(Clone, Default)]
pub struct KeyComponents {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

impl KeyComponents {
    /// Assembles a set of components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
        dp: BigUint,
        dq: BigUint,
        qinv: BigUint,
    ) -> Self {
        KeyComponents {
            n,
            e,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        }
    }

    /// Checks the arithmetic consistency of a two-prime private key.
    ///
    /// Both primes must be probably prime and distinct, their product must be
    /// the modulus, `d` must invert `e` modulo `p-1` and `q-1`, and the CRT
    /// values must agree with `d`, `p` and `q`.
    pub fn validate(&self) -> Result<()> {
        let one = BigUint::one();

        for prime in [&self.p, &self.q] {
            if *prime <= one || !probably_prime(prime, PRIME_CHECK_ROUNDS) {
                return Err(Error::InvalidPrime);
            }
        }

        if self.p == self.q || &self.p * &self.q != self.n {
            return Err(Error::InvalidPrime);
        }

        let pm1 = Zeroizing::new(&self.p - &one);
        let qm1 = Zeroizing::new(&self.q - &one);
        let de = Zeroizing::new(&self.d * &self.e);

        if !(&*de % &*pm1).is_one() || !(&*de % &*qm1).is_one() {
            return Err(Error::InvalidExponent);
        }

        if self.dp != &self.d % &*pm1 || self.dq != &self.d % &*qm1 {
            return Err(Error::InvalidExponent);
        }

        if !((&self.q * &self.qinv) % &self.p).is_one() {
            return Err(Error::InvalidExponent);
        }

        Ok(())
    }
}

impl PublicKeyParts for KeyComponents {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PrivateKeyParts for KeyComponents {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl From<&KeyRecord> for KeyComponents {
    fn from(key: &KeyRecord) -> Self {
        KeyComponents {
            n: BigUint::from_bytes_be(key.n()),
            e: BigUint::from_bytes_be(key.e()),
            d: BigUint::from_bytes_be(key.d()),
            p: BigUint::from_bytes_be(key.p()),
            q: BigUint::from_bytes_be(key.q()),
            dp: BigUint::from_bytes_be(key.dp()),
            dq: BigUint::from_bytes_be(key.dq()),
            qinv: BigUint::from_bytes_be(key.qinv()),
        }
    }
}

impl From<&KeyComponents> for KeyRecord {
    fn from(parts: &KeyComponents) -> Self {
        KeyRecord::default()
            .with_n(&to_bytes(&parts.n))
            .with_e(&to_bytes(&parts.e))
            .with_d(&to_bytes(&parts.d))
            .with_p(&to_bytes(&parts.p))
            .with_q(&to_bytes(&parts.q))
            .with_dp(&to_bytes(&parts.dp))
            .with_dq(&to_bytes(&parts.dq))
            .with_qinv(&to_bytes(&parts.qinv))
    }
}

/// Big-endian bytes of `x`, empty for zero.
fn to_bytes(x: &BigUint) -> Zeroizing<Vec<u8>> {
    if x.is_zero() {
        Zeroizing::new(Vec::new())
    } else {
        Zeroizing::new(x.to_bytes_be())
    }
}

impl fmt::Debug for KeyComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyComponents")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl Zeroize for KeyComponents {
    fn zeroize(&mut self) {
        self.n.zeroize();
        self.e.zeroize();
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for KeyComponents {
    fn drop(&mut self) {
        self.zeroize();
    }
}
