//! Generate prime components for the RSA Private Key

use log::trace;
use num_bigint::{BigUint, RandPrime};
use num_traits::Zero;
use rand_core::CryptoRngCore;

use super::complete::complete_components;
use crate::components::KeyComponents;
use crate::errors::{Error, Result};
use crate::traits::PublicKeyParts;

/// Generates a two-prime RSA key of exactly `bit_size` bits with public
/// exponent `exp`.
///
/// Primes are drawn until their product has the requested size and `exp` is
/// invertible modulo the totient. The private exponent and CRT values are
/// derived by [`complete_components`].
pub(crate) fn generate_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<KeyComponents> {
    if bit_size < 64 {
        return Err(Error::InvalidKeySize);
    }

    loop {
        // `gen_prime` sets the top two bits of each prime, so the product
        // of a `k` bit and an `l` bit prime has `k + l` bits.
        let p_bits = bit_size / 2;
        let p: BigUint = rng.gen_prime(p_bits);
        let q: BigUint = rng.gen_prime(bit_size - p.bits());

        if p == q {
            trace!("generated equal primes, retrying");
            continue;
        }

        let partial = KeyComponents::new(
            BigUint::zero(),
            exp.clone(),
            BigUint::zero(),
            p,
            q,
            BigUint::zero(),
            BigUint::zero(),
            BigUint::zero(),
        );

        let parts = match complete_components(rng, &partial) {
            Ok(parts) => parts,
            Err(Error::NotInvertible) => {
                trace!("public exponent not invertible for primes, retrying");
                continue;
            }
            Err(err) => return Err(err),
        };

        if parts.n().bits() != bit_size {
            trace!("modulus has {} bits, retrying", parts.n().bits());
            continue;
        }

        return Ok(parts);
    }
}
