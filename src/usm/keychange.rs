//! KeyChange textual convention (RFC 3414 Section 5).
//!
//! A KeyChange value carries a new key to an agent without exposing it:
//!
//! ```text
//! salt  = random(len)
//! delta = H(old_key || salt)[..len] XOR new_key
//! value = salt || delta
//! ```
//!
//! where `len = min(old_key.len(), digest_len)`. The agent, which knows the
//! old key, recomputes the digest and recovers the new key.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::LocalizedKey;
use crate::KeyTools;
use crate::crypto::{HashAlgorithm, fill_exact, hash_parts, secret::wipe_on_error, xor_into};
use crate::error::{Error, Result};

/// An encoded KeyChange value, `salt || delta`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyChange {
    bytes: Vec<u8>,
}

impl KeyChange {
    /// Wrap a KeyChange value received off the wire.
    ///
    /// The value must be non-empty with an even length.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() || !bytes.len().is_multiple_of(2) {
            return Err(Error::InvalidArgument("KeyChange value must have a non-zero even length").boxed());
        }
        Ok(Self { bytes })
    }

    /// The random half.
    pub fn salt(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() / 2]
    }

    /// The masked new key.
    pub fn delta(&self) -> &[u8] {
        &self.bytes[self.bytes.len() / 2..]
    }

    /// The full encoded value.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded length in bytes (twice the key portion).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a valid value.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for KeyChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyChange")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl KeyTools {
    /// Encode a KeyChange value that moves an agent from `old_key` to
    /// `new_key`.
    ///
    /// A fresh salt is drawn from the random source on every call.
    ///
    /// When the keys are longer than the digest, only the first
    /// `digest_len` bytes of `new_key` are carried; the rest is the caller's
    /// responsibility.
    ///
    /// # Example
    ///
    /// ```rust
    /// use snmp_usm_keys::{HashAlgorithm, KeyTools};
    ///
    /// let tools = KeyTools::default();
    /// let old = [0x11u8; 20];
    /// let new = [0x22u8; 20];
    /// let kc = tools.encode_key_change(HashAlgorithm::Sha1, &old, &new).unwrap();
    /// assert_eq!(kc.len(), 40);
    ///
    /// let recovered = tools.decode_key_change(HashAlgorithm::Sha1, &old, kc.as_bytes()).unwrap();
    /// assert_eq!(recovered.as_bytes(), &new);
    /// ```
    pub fn encode_key_change(
        &self,
        hash: HashAlgorithm,
        old_key: &[u8],
        new_key: &[u8],
    ) -> Result<KeyChange> {
        let mut out = Zeroizing::new(vec![0u8; 2 * old_key.len()]);
        let len = self.encode_key_change_into(hash, old_key, new_key, &mut out[..])?;
        Ok(KeyChange {
            bytes: out[..len].to_vec(),
        })
    }

    /// Encode a KeyChange value into the front of `out`.
    ///
    /// `out` must hold at least `2 * old_key.len()` bytes. Returns the
    /// encoded length, `2 * min(old_key.len(), digest_len)`. `out` is zeroed
    /// if the random source or hash fails.
    pub fn encode_key_change_into(
        &self,
        hash: HashAlgorithm,
        old_key: &[u8],
        new_key: &[u8],
        out: &mut [u8],
    ) -> Result<usize> {
        if old_key.is_empty() {
            return Err(Error::InvalidArgument("old key is empty").boxed());
        }
        if old_key.len() != new_key.len() {
            tracing::warn!(
                target: "snmp_usm_keys::keychange",
                { usm.old_len = old_key.len(), usm.new_len = new_key.len() },
                "old and new key lengths differ"
            );
            return Err(Error::key_length(old_key.len(), new_key.len()));
        }
        if out.len() < 2 * old_key.len() {
            return Err(Error::buffer_too_small(2 * old_key.len(), out.len()));
        }

        let digest_len = self.hashes.digest_len(hash)?;
        let proper = old_key.len().min(digest_len);

        wipe_on_error(out, |out| {
            let (salt, rest) = out.split_at_mut(proper);
            let delta = &mut rest[..proper];
            fill_exact(&*self.random, salt)?;

            let mut digest = Zeroizing::new(vec![0u8; digest_len]);
            hash_parts(&*self.hashes, hash, &[&old_key[..proper], &salt[..]], &mut digest[..])?;
            xor_into(delta, &digest[..proper], &new_key[..proper])?;

            tracing::debug!(
                target: "snmp_usm_keys::keychange",
                { usm.hash = %hash, usm.key_len = old_key.len(), usm.proper_len = proper },
                "encoded KeyChange"
            );
            Ok(2 * proper)
        })
    }

    /// Recover the new key from a KeyChange value.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyLengthMismatch`] if `key_change` is not exactly twice
    ///   the old key length, or the old key is longer than the digest
    pub fn decode_key_change(
        &self,
        hash: HashAlgorithm,
        old_key: &[u8],
        key_change: &[u8],
    ) -> Result<LocalizedKey> {
        let mut out = Zeroizing::new(vec![0u8; old_key.len()]);
        let len = self.decode_key_change_into(hash, old_key, key_change, &mut out[..])?;
        Ok(LocalizedKey::new(hash, out[..len].to_vec()))
    }

    /// Recover the new key into the front of `out`, returning its length.
    ///
    /// `out` is zeroed if hashing fails.
    pub fn decode_key_change_into(
        &self,
        hash: HashAlgorithm,
        old_key: &[u8],
        key_change: &[u8],
        out: &mut [u8],
    ) -> Result<usize> {
        if old_key.is_empty() {
            return Err(Error::InvalidArgument("old key is empty").boxed());
        }
        if key_change.len() != 2 * old_key.len() {
            tracing::warn!(
                target: "snmp_usm_keys::keychange",
                { usm.old_len = old_key.len(), usm.keychange_len = key_change.len() },
                "KeyChange length is not twice the old key length"
            );
            return Err(Error::key_length(2 * old_key.len(), key_change.len()));
        }
        let digest_len = self.hashes.digest_len(hash)?;
        if old_key.len() > digest_len {
            tracing::warn!(
                target: "snmp_usm_keys::keychange",
                { usm.hash = %hash, usm.old_len = old_key.len(), usm.digest_len = digest_len },
                "old key is longer than the digest"
            );
            return Err(Error::key_length(digest_len, old_key.len()));
        }
        if out.len() < old_key.len() {
            return Err(Error::buffer_too_small(old_key.len(), out.len()));
        }

        let proper = old_key.len();
        let (salt, delta) = key_change.split_at(proper);

        wipe_on_error(out, |out| {
            let mut digest = Zeroizing::new(vec![0u8; digest_len]);
            hash_parts(&*self.hashes, hash, &[old_key, salt], &mut digest[..])?;
            xor_into(&mut out[..proper], &digest[..proper], delta)?;

            tracing::debug!(
                target: "snmp_usm_keys::keychange",
                { usm.hash = %hash, usm.key_len = proper },
                "decoded KeyChange"
            );
            Ok(proper)
        })
    }
}
