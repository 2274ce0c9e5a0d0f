//! Useful algorithms related to RSA.

pub(crate) mod complete;
pub(crate) mod generate;
pub(crate) mod mgf;
pub(crate) mod oaep;
pub(crate) mod pad;
pub(crate) mod pkcs1v15;
pub(crate) mod rsa;
