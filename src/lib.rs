#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # The key record
//!
//! A [`KeyRecord`] holds the eight RSA components as big-endian byte
//! strings. Any of them may be empty, which means "unknown". Records are
//! built from raw buffers and checked with the sanity predicates before
//! they are used:
//!
//! - [`KeyRecord::is_sane_public`]: `n` and `e` are usable for public key
//!   operations
//! - [`KeyRecord::is_sane_private`]: every component is present and within
//!   bounds
//! - [`KeyRecord::is_sane_for_completion`]: enough is known to derive the
//!   rest
//! - [`KeyRecord::needs_completion`]: something derivable is missing
//!
//! # Usage
//!
//! ## Completing a partial key
//!
//! ```
//! use rsakey::{Completion, KeyRecord};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let key = KeyRecord::generate(&mut rng, 1024, 65537).expect("failed to generate a key");
//! let partial = KeyRecord::default()
//!     .with_p(key.p())
//!     .with_q(key.q())
//!     .with_e(key.e());
//!
//! assert!(partial.needs_completion());
//! let completed = match partial.complete(&mut rng).expect("failed to complete") {
//!     Completion::Completed(completed) => completed,
//!     Completion::AlreadyComplete => unreachable!(),
//! };
//! assert_eq!(completed, key);
//! ```
//!
//! ## Encryption
//!
//! ```
//! use rsakey::{EncryptionPadding, KeyRecord};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = KeyRecord::generate(&mut rng, 1024, 65537).expect("failed to generate a key");
//! let public_key = private_key.to_public();
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = public_key
//!     .encrypt(&mut rng, EncryptionPadding::Oaep, &data[..])
//!     .expect("failed to encrypt");
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! // Decrypt
//! let dec_data = private_key
//!     .decrypt(&mut rng, EncryptionPadding::Oaep, &enc_data)
//!     .expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## PKCS#1 v1.5 signatures
//!
//! Signatures are computed over a digest the caller already produced.
//!
//! ```
//! use rsakey::{HashAlgorithm, KeyRecord};
//! use sha2::{Digest, Sha256};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = KeyRecord::generate(&mut rng, 1024, 65537).expect("failed to generate a key");
//! let public_key = private_key.to_public();
//!
//! // Sign
//! let digest = Sha256::digest(b"hello world");
//! let signature = private_key
//!     .sign(&mut rng, HashAlgorithm::Sha256, &digest)
//!     .expect("failed to sign");
//! assert_eq!(signature.len(), private_key.size());
//!
//! // Verify
//! public_key
//!     .verify(HashAlgorithm::Sha256, &digest, &signature)
//!     .expect("failed to verify");
//! ```
//!
//! # PKCS#1 and PKCS#8 Key Encoding
//!
//! Keys are read from and written to PKCS#1 (`RSAPrivateKey` and
//! `RSAPublicKey`), PKCS#8 (`PrivateKeyInfo`) and `SubjectPublicKeyInfo`
//! documents. With the `pem` feature each of these can also be read from
//! and written to PEM: `RSA PRIVATE KEY`, `RSA PUBLIC KEY`, `PRIVATE KEY`
//! and `PUBLIC KEY`. [`pkcs1`] and [`pkcs8`] are re-exported from the
//! toplevel of the crate.
//!
//! ### Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # #[cfg(all(feature = "pem", feature = "std"))]
//! # {
//! use rsakey::{KeyRecord, LineEnding};
//!
//! let pem = "-----BEGIN RSA PUBLIC KEY-----
//! MEgCQQC4epaMVT57mrtP0xCrkY4Y0Tdkvb+/OYbwbqKQ7hJC+Yj4DT3MTHLcHyGp
//! q50RBAY7k4yRRvXyup6bvOIEUTNxAgMBAAE=
//! -----END RSA PUBLIC KEY-----";
//!
//! let public_key = KeyRecord::from_pkcs1_public_pem(pem)?;
//! assert!(public_key.is_sane_public());
//! assert_eq!(public_key.size(), 64);
//!
//! let spki = public_key.to_public_key_pem(LineEnding::LF)?;
//! assert!(spki.starts_with("-----BEGIN PUBLIC KEY-----"));
//! assert_eq!(KeyRecord::from_public_key_pem(&spki)?, public_key);
//! # }
//! # Ok(())
//! # }
//! ```

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod bits;
mod components;
mod encoding;
pub mod errors;
pub mod hash;
mod key;
mod oaep;
mod operations;
pub mod padding;
mod pkcs1v15;
pub mod traits;

pub use pkcs1;
pub use pkcs8;

#[cfg(feature = "pem")]
pub use pkcs1::der::pem::LineEnding;

pub use crate::{
    bits::bit_length,
    components::KeyComponents,
    errors::{Error, ErrorKind, Result},
    hash::HashAlgorithm,
    key::{
        KeyRecord, MAX_DIGEST_LEN, MAX_MODULUS_BITS, MAX_PUBLIC_EXPONENT,
        MAX_PUBLIC_EXPONENT_BITS, MAX_SIGNATURE_LEN, MIN_MODULUS_BITS, MIN_PUBLIC_EXPONENT,
        MIN_PUBLIC_EXPONENT_BITS,
    },
    operations::Completion,
    padding::EncryptionPadding,
};
