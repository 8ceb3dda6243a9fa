//! Owned key types.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::KeyTools;
use crate::crypto::HashAlgorithm;
use crate::error::{Error, Result};

/// Master key Ku, derived from a passphrase and not yet bound to an engine.
///
/// A master key is as sensitive as the passphrase it came from. Caching it
/// avoids repeating the 1 MiB expansion when localizing the same credentials
/// for many engines.
///
/// Key material is zeroed when the key is dropped and redacted from `Debug`
/// output. Equality is evaluated in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    key: Vec<u8>,
    #[zeroize(skip)]
    algorithm: HashAlgorithm,
}

impl MasterKey {
    pub(crate) fn new(algorithm: HashAlgorithm, key: Vec<u8>) -> Self {
        Self { key, algorithm }
    }

    /// Derive a master key with the default engine.
    ///
    /// ```rust
    /// use snmp_usm_keys::{HashAlgorithm, MasterKey};
    ///
    /// let ku = MasterKey::from_passphrase(HashAlgorithm::Sha1, b"maplesyrup").unwrap();
    /// assert_eq!(ku.len(), 20);
    /// ```
    pub fn from_passphrase(algorithm: HashAlgorithm, passphrase: &[u8]) -> Result<Self> {
        KeyTools::shared().derive_master_key(algorithm, passphrase)
    }

    /// Wrap previously derived master key bytes.
    ///
    /// The length must equal the algorithm's digest length.
    pub fn from_bytes(algorithm: HashAlgorithm, key: impl Into<Vec<u8>>) -> Result<Self> {
        let key = key.into();
        if key.len() != algorithm.digest_len() {
            let actual = key.len();
            let mut key = key;
            key.zeroize();
            return Err(Error::key_length(algorithm.digest_len(), actual));
        }
        Ok(Self::new(algorithm, key))
    }

    /// Localize this key for an engine using the default engine.
    pub fn localize(&self, engine_id: &[u8]) -> Result<LocalizedKey> {
        KeyTools::shared().localize(self, engine_id)
    }

    /// The key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Always false for a derived key.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Hash algorithm the key was derived with.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for MasterKey {}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Localized key Kul, bound to one authoritative engine.
///
/// Freshly localized keys are exactly one digest long. Keys extended for a
/// privacy cipher, or recovered from a KeyChange, may be longer or shorter.
///
/// Key material is zeroed when the key is dropped and redacted from `Debug`
/// output. Equality is evaluated in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LocalizedKey {
    key: Vec<u8>,
    #[zeroize(skip)]
    algorithm: HashAlgorithm,
}

impl LocalizedKey {
    pub(crate) fn new(algorithm: HashAlgorithm, key: Vec<u8>) -> Self {
        Self { key, algorithm }
    }

    /// Derive and localize in one step using the default engine.
    ///
    /// ```rust
    /// use snmp_usm_keys::{HashAlgorithm, LocalizedKey};
    ///
    /// let engine_id = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];
    /// let kul = LocalizedKey::from_passphrase(HashAlgorithm::Md5, b"maplesyrup", &engine_id)
    ///     .unwrap();
    /// assert_eq!(kul.as_bytes()[..4], [0x52, 0x6f, 0x5e, 0xed]);
    /// ```
    pub fn from_passphrase(
        algorithm: HashAlgorithm,
        passphrase: &[u8],
        engine_id: &[u8],
    ) -> Result<Self> {
        KeyTools::shared().localize_passphrase(algorithm, passphrase, engine_id)
    }

    /// Wrap localized key bytes, such as a key read from configuration.
    ///
    /// Any non-empty length is accepted so that extended keys can be stored.
    pub fn from_bytes(algorithm: HashAlgorithm, key: impl Into<Vec<u8>>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::InvalidArgument("localized key is empty").boxed());
        }
        Ok(Self::new(algorithm, key))
    }

    /// The key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Always false for a valid key.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Hash algorithm the key was localized with.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Consume the key, returning its bytes.
    ///
    /// The caller takes over responsibility for zeroing them.
    pub fn into_bytes(mut self) -> Vec<u8> {
        std::mem::take(&mut self.key)
    }
}

impl PartialEq for LocalizedKey {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for LocalizedKey {}

impl std::fmt::Debug for LocalizedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizedKey")
            .field("algorithm", &self.algorithm)
            .field("len", &self.key.len())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let key = LocalizedKey::from_bytes(HashAlgorithm::Md5, vec![0x42; 16]).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("42"));

        let ku = MasterKey::from_bytes(HashAlgorithm::Md5, vec![0x42; 16]).unwrap();
        assert!(format!("{:?}", ku).contains("REDACTED"));
    }

    #[test]
    fn test_master_key_length_checked() {
        let err = MasterKey::from_bytes(HashAlgorithm::Sha1, vec![0u8; 16]).unwrap_err();
        assert!(matches!(
            *err,
            Error::KeyLengthMismatch {
                expected: 20,
                actual: 16
            }
        ));
    }

    #[test]
    fn test_localized_key_rejects_empty() {
        assert!(LocalizedKey::from_bytes(HashAlgorithm::Md5, Vec::new()).is_err());
        // extended and truncated keys are fine
        assert_eq!(
            LocalizedKey::from_bytes(HashAlgorithm::Md5, vec![1u8; 32])
                .unwrap()
                .len(),
            32
        );
    }

    #[test]
    fn test_equality_includes_algorithm() {
        let a = LocalizedKey::from_bytes(HashAlgorithm::Sha256, vec![7u8; 32]).unwrap();
        let b = LocalizedKey::from_bytes(HashAlgorithm::Sha256, vec![7u8; 32]).unwrap();
        let c = LocalizedKey::from_bytes(HashAlgorithm::Sha512, vec![7u8; 32]).unwrap();
        let d = LocalizedKey::from_bytes(HashAlgorithm::Sha256, vec![7u8; 31]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_into_bytes() {
        let key = LocalizedKey::from_bytes(HashAlgorithm::Md5, vec![9u8; 16]).unwrap();
        assert_eq!(key.into_bytes(), vec![9u8; 16]);
    }
}
