//! Key localization (RFC 3414 Section A.2.2).
//!
//! Binds a master key to a specific engine ID:
//! `localized_key = H(master_key || engine_id || master_key)`

use zeroize::Zeroizing;

use super::{LocalizedKey, MasterKey};
use crate::KeyTools;
use crate::crypto::{HashAlgorithm, hash_parts, secret::wipe_on_error};
use crate::error::{Error, Result};
use crate::format::hex::Bytes;

impl KeyTools {
    /// Localize a master key for an authoritative engine.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for an empty engine ID
    /// - [`Error::KeyLengthMismatch`] if the key is not one digest long
    pub fn localize(&self, master: &MasterKey, engine_id: &[u8]) -> Result<LocalizedKey> {
        let hash = master.algorithm();
        let mut out = Zeroizing::new(vec![0u8; self.hashes.digest_len(hash)?]);
        let len = self.localize_into(hash, master.as_bytes(), engine_id, &mut out[..])?;
        Ok(LocalizedKey::new(hash, out[..len].to_vec()))
    }

    /// Localize raw master key bytes into the front of `out`.
    ///
    /// Returns the number of bytes written (the digest length). `out` is
    /// zeroed if hashing fails.
    pub fn localize_into(
        &self,
        hash: HashAlgorithm,
        master: &[u8],
        engine_id: &[u8],
        out: &mut [u8],
    ) -> Result<usize> {
        if engine_id.is_empty() {
            tracing::warn!(target: "snmp_usm_keys::localize", "rejected empty engine ID");
            return Err(Error::InvalidArgument("engine ID is empty").boxed());
        }
        let digest_len = self.hashes.digest_len(hash)?;
        if master.len() != digest_len {
            tracing::warn!(
                target: "snmp_usm_keys::localize",
                { usm.hash = %hash, usm.expected = digest_len, usm.actual = master.len() },
                "master key length does not match digest"
            );
            return Err(Error::key_length(digest_len, master.len()));
        }
        if out.len() < digest_len {
            return Err(Error::buffer_too_small(digest_len, out.len()));
        }

        let written = wipe_on_error(out, |out| {
            hash_parts(&*self.hashes, hash, &[master, engine_id, master], out)
        })?;
        tracing::debug!(
            target: "snmp_usm_keys::localize",
            { usm.hash = %hash, usm.engine_id = %Bytes(engine_id) },
            "localized key"
        );
        Ok(written)
    }

    /// Derive Ku from a passphrase and localize it, discarding Ku.
    pub fn localize_passphrase(
        &self,
        hash: HashAlgorithm,
        passphrase: &[u8],
        engine_id: &[u8],
    ) -> Result<LocalizedKey> {
        if engine_id.is_empty() {
            return Err(Error::InvalidArgument("engine ID is empty").boxed());
        }
        let master = self.derive_master_key(hash, passphrase)?;
        self.localize(&master, engine_id)
    }
}
