//! MGF1 mask generation function from RFC 8017 B.2.1.

use digest::{Digest, FixedOutputReset};

/// XORs `out` with the MGF1 mask generated from `seed`.
///
/// `out` must be shorter than `2^32` hash outputs, which holds for every
/// modulus size accepted by this crate.
pub(crate) fn mgf1_xor<D>(out: &mut [u8], digest: &mut D, seed: &[u8])
where
    D: Digest + FixedOutputReset,
{
    let mut counter = [0u8; 4];

    for chunk in out.chunks_mut(<D as Digest>::output_size()) {
        Digest::update(digest, seed);
        Digest::update(digest, counter);

        let mask = digest.finalize_reset();
        for (byte, m) in chunk.iter_mut().zip(mask.iter()) {
            *byte ^= m;
        }

        inc_counter(&mut counter);
    }
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}
