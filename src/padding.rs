//! Encryption padding selection.

use core::fmt;

use crate::errors::{Error, Result};

/// Padding scheme used by [`KeyRecord::encrypt`](crate::KeyRecord::encrypt)
/// and [`KeyRecord::decrypt`](crate::KeyRecord::decrypt).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EncryptionPadding {
    /// PKCS#1 v1.5 encryption padding (RSAES-PKCS1-v1_5).
    Pkcs1v15,

    /// OAEP padding (RSAES-OAEP) with SHA-1 for both the label hash and
    /// MGF1, and an empty label.
    Oaep,
}

impl EncryptionPadding {
    /// Number of bytes of a block that the padding reserves for itself.
    pub const fn overhead(&self) -> usize {
        match self {
            EncryptionPadding::Pkcs1v15 => 11,
            EncryptionPadding::Oaep => 41,
        }
    }

    /// Longest plaintext accepted for a modulus of `k` bytes.
    pub const fn max_message_len(&self, k: usize) -> usize {
        k.saturating_sub(self.overhead())
    }
}

impl fmt::Display for EncryptionPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncryptionPadding::Pkcs1v15 => f.write_str("pkcs1v15"),
            EncryptionPadding::Oaep => f.write_str("oaep"),
        }
    }
}

impl TryFrom<u8> for EncryptionPadding {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(EncryptionPadding::Pkcs1v15),
            1 => Ok(EncryptionPadding::Oaep),
            _ => Err(Error::UnknownPadding),
        }
    }
}

impl From<EncryptionPadding> for u8 {
    fn from(padding: EncryptionPadding) -> u8 {
        match padding {
            EncryptionPadding::Pkcs1v15 => 0,
            EncryptionPadding::Oaep => 1,
        }
    }
}
