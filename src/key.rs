use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::bits::{bit_length, is_odd, strip_leading_zeros};

/// Smallest accepted modulus, in bits.
pub const MIN_MODULUS_BITS: usize = 512;

/// Largest accepted modulus, in bits.
pub const MAX_MODULUS_BITS: usize = 16384;

/// Smallest accepted public exponent, in bits.
pub const MIN_PUBLIC_EXPONENT_BITS: usize = 2;

/// Largest accepted public exponent, in bits.
pub const MAX_PUBLIC_EXPONENT_BITS: usize = 33;

/// Smallest public exponent accepted by key generation.
pub const MIN_PUBLIC_EXPONENT: u64 = 3;

/// Largest public exponent accepted by key generation (`2^33 - 1`).
pub const MAX_PUBLIC_EXPONENT: u64 = 0x1_ffff_ffff;

/// Largest digest accepted by signing and verification, in bytes.
pub const MAX_DIGEST_LEN: usize = 64;

/// Largest signature accepted by verification, in bytes.
pub const MAX_SIGNATURE_LEN: usize = 3072;

/// RSA key material as big-endian unsigned integers.
///
/// Holds up to eight independently owned buffers: the public modulus and
/// exponent, and the private exponent, primes and CRT parameters. Any of
/// them may be empty, meaning "unknown". Buffers are stored without
/// leading zero bytes, so two records compare equal exactly when their
/// components are numerically equal.
///
/// A record is never modified after construction. Operations that derive
/// new material, such as [`KeyRecord::complete`], return a new record.
///
/// All buffers are zeroized when the record is dropped.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyRecord {
    /// Modulus
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    n: Vec<u8>,
    /// Public exponent
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    e: Vec<u8>,
    /// Private exponent
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    d: Vec<u8>,
    /// First prime factor
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    p: Vec<u8>,
    /// Second prime factor
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    q: Vec<u8>,
    /// D mod (P-1)
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    dp: Vec<u8>,
    /// D mod (Q-1)
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    dq: Vec<u8>,
    /// Q^-1 mod P
    #[cfg_attr(feature = "serde", serde(with = "hex_or_bin"))]
    qinv: Vec<u8>,
}

#[inline]
fn normalize(buf: &[u8]) -> Vec<u8> {
    strip_leading_zeros(buf).to_vec()
}

impl KeyRecord {
    /// Creates a public key record from its modulus and exponent.
    pub fn from_public(n: &[u8], e: &[u8]) -> Self {
        KeyRecord::default().with_n(n).with_e(e)
    }

    /// Returns this record with the modulus replaced.
    pub fn with_n(mut self, n: &[u8]) -> Self {
        self.n.zeroize();
        self.n = normalize(n);
        self
    }

    /// Returns this record with the public exponent replaced.
    pub fn with_e(mut self, e: &[u8]) -> Self {
        self.e.zeroize();
        self.e = normalize(e);
        self
    }

    /// Returns this record with the private exponent replaced.
    pub fn with_d(mut self, d: &[u8]) -> Self {
        self.d.zeroize();
        self.d = normalize(d);
        self
    }

    /// Returns this record with the first prime replaced.
    pub fn with_p(mut self, p: &[u8]) -> Self {
        self.p.zeroize();
        self.p = normalize(p);
        self
    }

    /// Returns this record with the second prime replaced.
    pub fn with_q(mut self, q: &[u8]) -> Self {
        self.q.zeroize();
        self.q = normalize(q);
        self
    }

    /// Returns this record with `d mod (p-1)` replaced.
    pub fn with_dp(mut self, dp: &[u8]) -> Self {
        self.dp.zeroize();
        self.dp = normalize(dp);
        self
    }

    /// Returns this record with `d mod (q-1)` replaced.
    pub fn with_dq(mut self, dq: &[u8]) -> Self {
        self.dq.zeroize();
        self.dq = normalize(dq);
        self
    }

    /// Returns this record with `q^-1 mod p` replaced.
    pub fn with_qinv(mut self, qinv: &[u8]) -> Self {
        self.qinv.zeroize();
        self.qinv = normalize(qinv);
        self
    }

    /// Returns the modulus.
    pub fn n(&self) -> &[u8] {
        &self.n
    }

    /// Returns the public exponent.
    pub fn e(&self) -> &[u8] {
        &self.e
    }

    /// Returns the private exponent.
    pub fn d(&self) -> &[u8] {
        &self.d
    }

    /// Returns the first prime factor.
    pub fn p(&self) -> &[u8] {
        &self.p
    }

    /// Returns the second prime factor.
    pub fn q(&self) -> &[u8] {
        &self.q
    }

    /// Returns the precomputed dp value, D mod (P-1).
    pub fn dp(&self) -> &[u8] {
        &self.dp
    }

    /// Returns the precomputed dq value, D mod (Q-1).
    pub fn dq(&self) -> &[u8] {
        &self.dq
    }

    /// Returns the precomputed qinv value, Q^-1 mod P.
    pub fn qinv(&self) -> &[u8] {
        &self.qinv
    }

    /// Returns the modulus size in bytes. Raw signatures and ciphertexts for
    /// or by this key will have the same size.
    pub fn size(&self) -> usize {
        (bit_length(&self.n) + 7) / 8
    }

    /// Returns `true` if any private component is present.
    pub fn is_private(&self) -> bool {
        [&self.d, &self.p, &self.q, &self.dp, &self.dq, &self.qinv]
            .iter()
            .any(|buf| !buf.is_empty())
    }

    /// Returns a new record holding only the public components.
    pub fn to_public(&self) -> KeyRecord {
        KeyRecord::from_public(&self.n, &self.e)
    }

    /// Checks the public key bounds: the modulus has between 512 and 16384
    /// bits, and the public exponent is odd with between 2 and 33 bits.
    pub fn is_sane_public(&self) -> bool {
        let nb = bit_length(&self.n);

        if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&nb) {
            return false;
        }

        sane_public_exponent(&self.e)
    }

    /// Checks the private key bounds on top of [`KeyRecord::is_sane_public`].
    ///
    /// The bit lengths of `p` and `q` must add up to the bit length of `n`
    /// exactly, and `d`, `dp`, `dq` and `qinv` must be non-zero and no longer
    /// than `n`, `p`, `q` and `p` respectively.
    pub fn is_sane_private(&self) -> bool {
        if !self.is_sane_public() {
            return false;
        }

        let nb = bit_length(&self.n);
        let pb = bit_length(&self.p);
        let qb = bit_length(&self.q);

        if pb + qb != nb {
            return false;
        }

        within(bit_length(&self.d), nb)
            && within(bit_length(&self.dp), pb)
            && within(bit_length(&self.dq), qb)
            && within(bit_length(&self.qinv), pb)
    }

    /// Checks whether [`KeyRecord::complete`] can derive the missing
    /// components of this record.
    ///
    /// Both primes and at least one of the exponents must be present. Every
    /// other component may be absent, but any component that is present is
    /// held to the same bounds as a private key.
    pub fn is_sane_for_completion(&self) -> bool {
        let nb = bit_length(&self.n);
        let eb = bit_length(&self.e);
        let db = bit_length(&self.d);
        let pb = bit_length(&self.p);
        let qb = bit_length(&self.q);
        let dpb = bit_length(&self.dp);
        let dqb = bit_length(&self.dq);
        let qib = bit_length(&self.qinv);

        if pb == 0 || qb == 0 {
            return false;
        }

        if eb == 0 && db == 0 {
            return false;
        }

        if nb != 0 && (!(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&nb) || pb + qb != nb) {
            return false;
        }

        if eb != 0 && !sane_public_exponent(&self.e) {
            return false;
        }

        db <= pb + qb && dpb <= pb && dqb <= qb && qib <= pb
    }

    /// Returns `true` if any of `n`, `e`, `d`, `dp`, `dq` or `qinv` is absent.
    pub fn needs_completion(&self) -> bool {
        [&self.n, &self.e, &self.d, &self.dp, &self.dq, &self.qinv]
            .iter()
            .any(|buf| bit_length(buf) == 0)
    }
}

#[inline]
fn within(bits: usize, max: usize) -> bool {
    bits != 0 && bits <= max
}

#[inline]
fn sane_public_exponent(e: &[u8]) -> bool {
    let eb = bit_length(e);
    (MIN_PUBLIC_EXPONENT_BITS..=MAX_PUBLIC_EXPONENT_BITS).contains(&eb) && is_odd(e)
}

impl ConstantTimeEq for KeyRecord {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.n.ct_eq(&other.n)
            & self.e.ct_eq(&other.e)
            & self.d.ct_eq(&other.d)
            & self.p.ct_eq(&other.p)
            & self.q.ct_eq(&other.q)
            & self.dp.ct_eq(&other.dp)
            & self.dq.ct_eq(&other.dq)
            & self.qinv.ct_eq(&other.qinv)
    }
}

impl PartialEq for KeyRecord {
    #[inline]
    fn eq(&self, other: &KeyRecord) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for KeyRecord {}

impl fmt::Debug for KeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Private components are intentionally skipped
        f.debug_struct("KeyRecord")
            .field("n", &HexBytes(&self.n))
            .field("e", &HexBytes(&self.e))
            .field("private", &self.is_private())
            .finish_non_exhaustive()
    }
}

struct HexBytes<'a>(&'a [u8]);

impl fmt::Debug for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Zeroize for KeyRecord {
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

impl Drop for KeyRecord {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(feature = "serde")]
mod hex_or_bin {
    use alloc::vec::Vec;
    use serde::{Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(buf: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serdect::slice::serialize_hex_lower_or_bin(buf, serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let buf = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Ok(super::normalize(&buf))
    }
}
