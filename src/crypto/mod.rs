//! Cryptographic collaborators consumed by the key-management core.
//!
//! - [`HashProvider`] / [`HashContext`] - incremental hashing, with the
//!   RustCrypto-backed [`RustCryptoHashes`] as the default implementation
//! - [`SecureRandom`] - salt source for KeyChange encoding, with [`OsRandom`]
//!   as the default implementation
//! - secret-buffer helpers (equal-length XOR, wipe-on-error destinations)

mod hash;
mod random;
pub(crate) mod secret;

pub use hash::{HashAlgorithm, HashContext, HashProvider, RustCryptoHashes};
pub use random::{OsRandom, SecureRandom};
pub use secret::xor_into;

pub(crate) use hash::hash_parts;
pub(crate) use random::fill_exact;
