//! Password to key transformation (RFC 3414 Section A.2.1).

use zeroize::Zeroizing;

use super::MasterKey;
use crate::KeyTools;
use crate::crypto::{HashAlgorithm, secret::wipe_on_error};
use crate::error::{CryptoErrorKind, Error, Result};

/// Shortest passphrase RFC 3414 Section 11.2 allows.
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Bytes of repeated passphrase hashed into a master key (1 MiB).
pub const EXPANDED_PASSPHRASE_LEN: usize = 1_048_576;

/// Expansion block size. Each block is fed to the hash separately.
pub const HASH_BLOCK_LEN: usize = 64;

impl KeyTools {
    /// Derive the master key Ku from a passphrase.
    ///
    /// The passphrase is repeated to fill the configured expansion length
    /// (1 MiB by default) and hashed. The result is always exactly
    /// `hash.digest_len()` bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for an empty passphrase
    /// - [`Error::PassphraseTooShort`] below the configured minimum
    /// - [`Error::CryptoEngine`] if the hash provider fails
    ///
    /// # Example
    ///
    /// ```rust
    /// use snmp_usm_keys::{HashAlgorithm, KeyTools};
    ///
    /// let ku = KeyTools::default()
    ///     .derive_master_key(HashAlgorithm::Md5, b"maplesyrup")
    ///     .unwrap();
    /// assert_eq!(ku.as_bytes()[..4], [0x9f, 0xaf, 0x32, 0x83]);
    /// ```
    pub fn derive_master_key(&self, hash: HashAlgorithm, passphrase: &[u8]) -> Result<MasterKey> {
        let mut out = Zeroizing::new(vec![0u8; self.hashes.digest_len(hash)?]);
        let len = self.derive_master_key_into(hash, passphrase, &mut out[..])?;
        Ok(MasterKey::new(hash, out[..len].to_vec()))
    }

    /// Derive Ku into the front of `out`, returning the number of bytes
    /// written.
    ///
    /// `out` must hold at least the digest length. It is zeroed if the
    /// derivation fails after the precondition checks.
    pub fn derive_master_key_into(
        &self,
        hash: HashAlgorithm,
        passphrase: &[u8],
        out: &mut [u8],
    ) -> Result<usize> {
        if passphrase.is_empty() {
            tracing::warn!(target: "snmp_usm_keys::passphrase", "rejected empty passphrase");
            return Err(Error::InvalidArgument("passphrase is empty").boxed());
        }
        let min = self.config.min_passphrase_len;
        if passphrase.len() < min {
            tracing::warn!(
                target: "snmp_usm_keys::passphrase",
                { usm.passphrase_len = passphrase.len(), usm.min = min },
                "rejected short passphrase"
            );
            return Err(Error::PassphraseTooShort {
                len: passphrase.len(),
                min,
            }
            .boxed());
        }
        self.expand_passphrase(hash, passphrase, out)
    }

    /// The expansion itself, without the human-passphrase length floor.
    ///
    /// Reeder key extension feeds localized key material back through here.
    pub(crate) fn expand_passphrase(
        &self,
        hash: HashAlgorithm,
        passphrase: &[u8],
        out: &mut [u8],
    ) -> Result<usize> {
        if passphrase.is_empty() {
            return Err(Error::InvalidArgument("passphrase is empty").boxed());
        }
        let digest_len = self.hashes.digest_len(hash)?;
        if out.len() < digest_len {
            return Err(Error::buffer_too_small(digest_len, out.len()));
        }

        wipe_on_error(out, |out| {
            let mut ctx = self.hashes.context(hash)?;
            let mut block = Zeroizing::new([0u8; HASH_BLOCK_LEN]);
            let mut index = 0;
            let mut count = 0;

            while count < self.config.expansion_len {
                for byte in block.iter_mut() {
                    *byte = passphrase[index];
                    index = (index + 1) % passphrase.len();
                }
                ctx.update(&block[..])?;
                count += HASH_BLOCK_LEN;
            }

            let written = ctx.finalize_into(out)?;
            if written != digest_len {
                return Err(Error::crypto(CryptoErrorKind::Hash));
            }
            tracing::debug!(
                target: "snmp_usm_keys::passphrase",
                { usm.hash = %hash, usm.expanded = count, usm.key_len = written },
                "derived master key"
            );
            Ok(written)
        })
    }
}
