//! Privacy key extension.
//!
//! Some privacy ciphers need more key material than the authentication hash
//! produces. Two incompatible constructions are deployed:
//!
//! - Blumenthal (draft-blumenthal-aes-usm-04 section 3.1.2.1), used by the
//!   AES-192/256 draft protocols
//! - Reeder (draft-reeder-snmpv3-usm-3desede section 2.1), used by 3DES-EDE
//!   and the Cisco AES-192/256 variants
//!
//! The strategy is a property of the privacy algorithm, so both peers always
//! agree on it.

use zeroize::Zeroizing;

use super::{KeyExtension, LocalizedKey, PrivAlgorithm};
use crate::KeyTools;
use crate::crypto::{HashAlgorithm, hash_parts, secret::wipe_tail_on_error};
use crate::error::{Error, Result};
use crate::oid::Oid;

impl KeyTools {
    /// Lengthen a localized key to `needed_len` bytes.
    ///
    /// A key that is already long enough is returned unchanged. Otherwise the
    /// privacy algorithm's extension strategy is applied; algorithms without
    /// one fail with [`Error::UnsupportedExtensionStrategy`].
    ///
    /// `engine_id` must be the engine the key was localized for. Only the
    /// Reeder strategy uses it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use snmp_usm_keys::{HashAlgorithm, KeyTools, PrivAlgorithm};
    ///
    /// let tools = KeyTools::default();
    /// let engine_id = [0x80, 0x00, 0x1f, 0x88, 0x04];
    /// let kul = tools
    ///     .localize_passphrase(HashAlgorithm::Sha1, b"privpass123", &engine_id)
    ///     .unwrap();
    /// let aes_key = tools
    ///     .extend_key(&PrivAlgorithm::AES256, &kul, &engine_id, 32)
    ///     .unwrap();
    /// assert_eq!(aes_key.len(), 32);
    /// assert_eq!(&aes_key.as_bytes()[..20], kul.as_bytes());
    /// ```
    pub fn extend_key(
        &self,
        privacy: &PrivAlgorithm,
        kul: &LocalizedKey,
        engine_id: &[u8],
        needed_len: usize,
    ) -> Result<LocalizedKey> {
        if kul.len() >= needed_len {
            tracing::debug!(
                target: "snmp_usm_keys::extend",
                { usm.privacy = %privacy, usm.have = kul.len(), usm.need = needed_len },
                "key already long enough"
            );
            return Ok(kul.clone());
        }

        if privacy.extension == KeyExtension::None {
            return Err(unsupported_strategy(privacy, kul.len(), needed_len));
        }

        let mut buf = Vec::new();
        buf.try_reserve_exact(needed_len)
            .map_err(|_| Error::buffer_too_small(needed_len, 0))?;
        buf.resize(needed_len, 0);
        let mut buf = Zeroizing::new(buf);
        buf[..kul.len()].copy_from_slice(kul.as_bytes());
        let len = self.extend_into(
            privacy,
            kul.algorithm(),
            engine_id,
            &mut buf[..],
            kul.len(),
            needed_len,
        )?;
        Ok(LocalizedKey::new(kul.algorithm(), buf[..len].to_vec()))
    }

    /// Lengthen the key held in `buf[..key_len]` in place.
    ///
    /// On success `buf[..needed_len]` holds the extended key and `needed_len`
    /// is returned (or `key_len` if no extension was needed). On failure the
    /// bytes past `key_len` are zeroed and the original key is left intact.
    pub fn extend_into(
        &self,
        privacy: &PrivAlgorithm,
        hash: HashAlgorithm,
        engine_id: &[u8],
        buf: &mut [u8],
        key_len: usize,
        needed_len: usize,
    ) -> Result<usize> {
        if key_len == 0 {
            return Err(Error::InvalidArgument("localized key is empty").boxed());
        }
        if buf.len() < key_len {
            return Err(Error::buffer_too_small(key_len, buf.len()));
        }
        if key_len >= needed_len {
            tracing::debug!(
                target: "snmp_usm_keys::extend",
                { usm.privacy = %privacy, usm.have = key_len, usm.need = needed_len },
                "key already long enough"
            );
            return Ok(key_len);
        }

        if privacy.extension == KeyExtension::None {
            return Err(unsupported_strategy(privacy, key_len, needed_len));
        }
        if buf.len() < needed_len {
            return Err(Error::buffer_too_small(needed_len, buf.len()));
        }
        if privacy.extension == KeyExtension::Reeder && engine_id.is_empty() {
            return Err(Error::InvalidArgument("engine ID is empty").boxed());
        }

        tracing::debug!(
            target: "snmp_usm_keys::extend",
            {
                usm.privacy = %privacy,
                usm.strategy = %privacy.extension,
                usm.hash = %hash,
                usm.have = key_len,
                usm.need = needed_len
            },
            "extending localized key"
        );

        let buf = &mut buf[..needed_len];
        wipe_tail_on_error(buf, key_len, |buf| match privacy.extension {
            KeyExtension::Blumenthal => self.extend_blumenthal(hash, buf, key_len),
            KeyExtension::Reeder => self.extend_reeder(hash, engine_id, buf, key_len),
            KeyExtension::None => Err(unsupported_strategy(privacy, key_len, needed_len)),
        })
    }

    /// `Kul = Kul || H(Kul)` until `buf` is full.
    fn extend_blumenthal(
        &self,
        hash: HashAlgorithm,
        buf: &mut [u8],
        key_len: usize,
    ) -> Result<usize> {
        let needed = buf.len();
        let digest_len = self.hashes.digest_len(hash)?;
        let rounds = (needed - key_len).div_ceil(digest_len);
        let mut digest = Zeroizing::new(vec![0u8; digest_len]);
        let mut len = key_len;

        for _ in 0..rounds {
            hash_parts(&*self.hashes, hash, &[&buf[..len]], &mut digest[..])?;
            let take = (needed - len).min(digest_len);
            buf[len..len + take].copy_from_slice(&digest[..take]);
            len += take;
            if len >= needed {
                break;
            }
        }
        Ok(len)
    }

    /// `Kul = Kul || localize(Ku(Kul))` until `buf` is full.
    fn extend_reeder(
        &self,
        hash: HashAlgorithm,
        engine_id: &[u8],
        buf: &mut [u8],
        key_len: usize,
    ) -> Result<usize> {
        let needed = buf.len();
        let digest_len = self.hashes.digest_len(hash)?;
        let mut ku = Zeroizing::new(vec![0u8; digest_len]);
        let mut kul = Zeroizing::new(vec![0u8; digest_len]);
        let mut len = key_len;

        while len < needed {
            self.expand_passphrase(hash, &buf[..len], &mut ku[..])?;
            self.localize_into(hash, &ku[..], engine_id, &mut kul[..])?;
            let take = (needed - len).min(digest_len);
            buf[len..len + take].copy_from_slice(&kul[..take]);
            len += take;
        }
        Ok(len)
    }

    /// Derive the key a privacy cipher consumes from a passphrase.
    ///
    /// Runs passphrase-to-key, localization and (when the cipher needs more
    /// material than the hash produces) key extension. When the digest is
    /// longer than the cipher key, the full localized key is returned; the
    /// cipher uses its leading `privacy.key_len` bytes.
    pub fn derive_privacy_key(
        &self,
        hash: HashAlgorithm,
        privacy: &PrivAlgorithm,
        passphrase: &[u8],
        engine_id: &[u8],
    ) -> Result<LocalizedKey> {
        let kul = self.localize_passphrase(hash, passphrase, engine_id)?;
        self.extend_key(privacy, &kul, engine_id, privacy.key_len)
    }

    /// [`derive_privacy_key`](Self::derive_privacy_key) with both protocols
    /// named by their USM MIB OIDs.
    pub fn derive_privacy_key_by_oid(
        &self,
        auth_protocol: &Oid,
        priv_protocol: &Oid,
        passphrase: &[u8],
        engine_id: &[u8],
    ) -> Result<LocalizedKey> {
        let hash = self.registry.hash_algorithm(auth_protocol)?;
        let privacy = self.registry.privacy(priv_protocol)?;
        self.derive_privacy_key(hash, &privacy, passphrase, engine_id)
    }
}

fn unsupported_strategy(privacy: &PrivAlgorithm, have: usize, need: usize) -> Box<Error> {
    tracing::warn!(
        target: "snmp_usm_keys::extend",
        { usm.privacy = %privacy, usm.have = have, usm.need = need },
        "privacy algorithm has no key extension strategy"
    );
    Error::UnsupportedExtensionStrategy(privacy.to_string().into_boxed_str()).boxed()
}
