//! Completion of partial private keys through the public API.

use hex_literal::hex;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsakey::{Completion, EncryptionPadding, Error, HashAlgorithm, KeyRecord};

const N: [u8; 64] = hex!(
    "b87a968c553e7b9abb4fd310ab918e18d13764bdbfbf3986f06ea290ee1242f9"
    "88f80d3dcc4c72dc1f21a9ab9d1104063b938c9146f5f2ba9e9bbce204513371"
);
const P: [u8; 32] = hex!("e63eabe6816a60e96be627bc9a4e7bd973a135691479d2f45c6784a5dcf29acb");
const Q: [u8; 32] = hex!("cd1d5af18b0e2b03e93b5d152c0d63e272f94a83c6e9e0e1736f06a145187733");
const QINV: [u8; 32] = hex!("0a68f9877aad1fda99f3d4ad4efd1f7479956358ddeca4167912eeb9fd92f3c9");
const E: [u8; 3] = hex!("010001");

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::from_seed([42; 32])
}

#[test]
fn complete_and_use() {
    let mut rng = rng();
    let partial = KeyRecord::default().with_p(&P).with_q(&Q).with_e(&E);

    assert!(partial.is_private());
    assert!(!partial.is_sane_private());
    assert!(partial.is_sane_for_completion());
    assert!(partial.needs_completion());
    assert_eq!(
        partial.sign(&mut rng, HashAlgorithm::Sha1, &[0x5a; 20]),
        Err(Error::InvalidPrivateKey)
    );

    let key = match partial.complete(&mut rng).unwrap() {
        Completion::Completed(key) => key,
        Completion::AlreadyComplete => panic!("nothing was derived"),
    };
    assert_eq!(key.n(), &N);
    assert_eq!(key.qinv(), &QINV);
    assert!(key.is_sane_private());
    assert!(!key.needs_completion());
    key.validate_private().unwrap();

    // the input record is left untouched
    assert!(partial.n().is_empty());

    let ciphertext = key
        .to_public()
        .encrypt(&mut rng, EncryptionPadding::Oaep, b"testing")
        .unwrap();
    assert_eq!(
        key.decrypt(&mut rng, EncryptionPadding::Oaep, &ciphertext)
            .unwrap(),
        b"testing"
    );

    assert_eq!(key.complete(&mut rng).unwrap(), Completion::AlreadyComplete);
}

#[test]
fn complete_with_modulus_present() {
    let mut rng = rng();
    let partial = KeyRecord::from_public(&N, &E).with_p(&P).with_q(&Q);

    let key = partial.complete(&mut rng).unwrap().into_completed().unwrap();
    assert_eq!(
        key,
        KeyRecord::default()
            .with_p(&P)
            .with_q(&Q)
            .with_e(&E)
            .complete(&mut rng)
            .unwrap()
            .into_completed()
            .unwrap()
    );
}

#[test]
fn not_completable() {
    let mut rng = rng();

    let cases = [
        // nothing at all
        KeyRecord::default(),
        // public key only
        KeyRecord::from_public(&N, &E),
        // missing a prime
        KeyRecord::default().with_p(&P).with_e(&E),
        // neither exponent
        KeyRecord::default().with_p(&P).with_q(&Q),
        // even public exponent
        KeyRecord::default().with_p(&P).with_q(&Q).with_e(&[0x01, 0x00]),
        // modulus does not match the primes' sizes
        KeyRecord::from_public(&N[1..], &E).with_p(&P).with_q(&Q),
        // coefficient longer than p
        KeyRecord::default()
            .with_p(&P)
            .with_q(&Q)
            .with_e(&E)
            .with_qinv(&N),
    ];

    for (i, key) in cases.iter().enumerate() {
        assert!(!key.is_sane_for_completion(), "case {}", i);
        assert_eq!(key.complete(&mut rng), Err(Error::NotCompletable), "case {}", i);
    }
}

#[test]
fn wrong_modulus_is_not_corrected() {
    let mut rng = rng();

    // a modulus of the right size that is not p*q is kept as is and the
    // resulting key fails the consistency checks
    let mut n = N;
    n[63] ^= 0x02;
    let key = KeyRecord::from_public(&n, &E)
        .with_p(&P)
        .with_q(&Q)
        .complete(&mut rng)
        .unwrap()
        .into_completed()
        .unwrap();

    assert_eq!(key.n(), &n);
    assert!(key.is_sane_private());
    assert_eq!(key.validate_private(), Err(Error::InvalidPrime));
}
