//! Algorithm registry: protocol OIDs to key-management parameters.
//!
//! The USM MIB names authentication and privacy protocols by OID
//! (`usmUserAuthProtocol`, `usmUserPrivProtocol`). The registry maps each
//! identifier to the data the key-management operations need: the hash for
//! an authentication protocol, or the key length and extension strategy for
//! a privacy protocol. Entries can be added at runtime for vendor protocols.

use std::collections::HashMap;

use crate::crypto::HashAlgorithm;
use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::usm::{PrivAlgorithm, PrivProtocol};

/// Well-known algorithm OIDs, as arc slices.
pub mod oids {
    /// usmHMACMD5AuthProtocol (RFC 3414)
    pub const HMAC_MD5: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 1, 2];
    /// usmHMACSHAAuthProtocol (RFC 3414)
    pub const HMAC_SHA: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 1, 3];
    /// usmHMAC128SHA224AuthProtocol (RFC 7860)
    pub const HMAC_SHA224: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 1, 4];
    /// usmHMAC192SHA256AuthProtocol (RFC 7860)
    pub const HMAC_SHA256: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 1, 5];
    /// usmHMAC256SHA384AuthProtocol (RFC 7860)
    pub const HMAC_SHA384: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 1, 6];
    /// usmHMAC384SHA512AuthProtocol (RFC 7860)
    pub const HMAC_SHA512: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 1, 7];

    /// usmDESPrivProtocol (RFC 3414)
    pub const DES: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 2, 2];
    /// usm3DESEDEPrivProtocol (draft-reeder-snmpv3-usm-3desede)
    pub const TRIPLE_DES: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 2, 3];
    /// usmAesCfb128Protocol (RFC 3826)
    pub const AES128: &[u32] = &[1, 3, 6, 1, 6, 3, 10, 1, 2, 4];
    /// usmAES192PrivProtocol (draft-blumenthal-aes-usm-04)
    pub const AES192: &[u32] = &[1, 3, 6, 1, 4, 1, 14832, 1, 3];
    /// usmAES256PrivProtocol (draft-blumenthal-aes-usm-04)
    pub const AES256: &[u32] = &[1, 3, 6, 1, 4, 1, 14832, 1, 4];
    /// usmAES192CiscoPrivProtocol (Reeder key extension)
    pub const AES192_CISCO: &[u32] = &[1, 3, 6, 1, 4, 1, 9, 12, 6, 1, 1];
    /// usmAES256CiscoPrivProtocol (Reeder key extension)
    pub const AES256_CISCO: &[u32] = &[1, 3, 6, 1, 4, 1, 9, 12, 6, 1, 2];
}

/// Authentication protocol parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAlgorithm {
    /// Hash used for key derivation and HMAC.
    pub hash: HashAlgorithm,
    /// Truncated MAC length carried in msgAuthenticationParameters.
    pub mac_len: usize,
}

impl AuthAlgorithm {
    /// Parameters for `hash` with its RFC 3414 / RFC 7860 MAC length.
    pub fn new(hash: HashAlgorithm) -> Self {
        let mac_len = match hash {
            HashAlgorithm::Md5 | HashAlgorithm::Sha1 => 12,
            HashAlgorithm::Sha224 => 16,
            HashAlgorithm::Sha256 => 24,
            HashAlgorithm::Sha384 => 32,
            HashAlgorithm::Sha512 => 48,
        };
        Self { hash, mac_len }
    }
}

/// A registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Authentication protocol.
    Auth(AuthAlgorithm),
    /// Privacy protocol.
    Priv(PrivAlgorithm),
}

/// Map from protocol OID to algorithm parameters.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    entries: HashMap<Oid, Algorithm>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every protocol this crate knows.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        let auth = [
            (oids::HMAC_MD5, HashAlgorithm::Md5),
            (oids::HMAC_SHA, HashAlgorithm::Sha1),
            (oids::HMAC_SHA224, HashAlgorithm::Sha224),
            (oids::HMAC_SHA256, HashAlgorithm::Sha256),
            (oids::HMAC_SHA384, HashAlgorithm::Sha384),
            (oids::HMAC_SHA512, HashAlgorithm::Sha512),
        ];
        for (arcs, hash) in auth {
            registry.register_auth(Oid::from_slice(arcs), AuthAlgorithm::new(hash));
        }

        let privacy = [
            (oids::DES, PrivAlgorithm::DES),
            (oids::TRIPLE_DES, PrivAlgorithm::TRIPLE_DES),
            (oids::AES128, PrivAlgorithm::AES128),
            (oids::AES192, PrivAlgorithm::AES192),
            (oids::AES256, PrivAlgorithm::AES256),
            (oids::AES192_CISCO, PrivAlgorithm::AES192_CISCO),
            (oids::AES256_CISCO, PrivAlgorithm::AES256_CISCO),
        ];
        for (arcs, algorithm) in privacy {
            registry.register_priv(Oid::from_slice(arcs), algorithm);
        }

        registry
    }

    /// Register an authentication protocol, returning any entry it replaces.
    pub fn register_auth(&mut self, oid: Oid, auth: AuthAlgorithm) -> Option<Algorithm> {
        self.register(oid, Algorithm::Auth(auth))
    }

    /// Register a privacy protocol, returning any entry it replaces.
    pub fn register_priv(&mut self, oid: Oid, privacy: PrivAlgorithm) -> Option<Algorithm> {
        self.register(oid, Algorithm::Priv(privacy))
    }

    fn register(&mut self, oid: Oid, algorithm: Algorithm) -> Option<Algorithm> {
        tracing::debug!(target: "snmp_usm_keys::registry", { usm.oid = %oid, usm.algorithm = ?algorithm }, "registering algorithm");
        self.entries.insert(oid, algorithm)
    }

    /// Look up an OID.
    pub fn resolve(&self, oid: &Oid) -> Result<&Algorithm> {
        self.entries
            .get(oid)
            .ok_or_else(|| Error::unknown_algorithm(oid))
    }

    /// Resolve an authentication protocol OID to its hash algorithm.
    ///
    /// # Example
    ///
    /// ```rust
    /// use snmp_usm_keys::{AlgorithmRegistry, HashAlgorithm, oid};
    ///
    /// let registry = AlgorithmRegistry::standard();
    /// let hash = registry.hash_algorithm(&oid!(1, 3, 6, 1, 6, 3, 10, 1, 1, 3)).unwrap();
    /// assert_eq!(hash, HashAlgorithm::Sha1);
    /// ```
    pub fn hash_algorithm(&self, oid: &Oid) -> Result<HashAlgorithm> {
        match self.resolve(oid)? {
            Algorithm::Auth(auth) => Ok(auth.hash),
            Algorithm::Priv(_) => Err(Error::unknown_algorithm(format_args!(
                "{} is a privacy protocol, not an authentication protocol",
                oid
            ))),
        }
    }

    /// Resolve a privacy protocol OID to its key requirements.
    pub fn privacy(&self, oid: &Oid) -> Result<PrivAlgorithm> {
        match self.resolve(oid)? {
            Algorithm::Priv(privacy) => Ok(*privacy),
            Algorithm::Auth(_) => Err(Error::unknown_algorithm(format_args!(
                "{} is an authentication protocol, not a privacy protocol",
                oid
            ))),
        }
    }

    /// Find the OID registered for a privacy algorithm.
    pub fn privacy_oid(&self, privacy: &PrivAlgorithm) -> Option<&Oid> {
        self.entries.iter().find_map(|(oid, entry)| match entry {
            Algorithm::Priv(p) if p == privacy => Some(oid),
            _ => None,
        })
    }

    /// Number of registered protocols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over privacy protocols of a given cipher family.
    pub fn privacy_variants(&self, protocol: PrivProtocol) -> impl Iterator<Item = &PrivAlgorithm> {
        self.entries.values().filter_map(move |entry| match entry {
            Algorithm::Priv(p) if p.protocol == protocol => Some(p),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::usm::KeyExtension;

    #[test]
    fn test_standard_auth_entries() {
        let registry = AlgorithmRegistry::standard();
        let expected = [
            (oids::HMAC_MD5, HashAlgorithm::Md5),
            (oids::HMAC_SHA, HashAlgorithm::Sha1),
            (oids::HMAC_SHA224, HashAlgorithm::Sha224),
            (oids::HMAC_SHA256, HashAlgorithm::Sha256),
            (oids::HMAC_SHA384, HashAlgorithm::Sha384),
            (oids::HMAC_SHA512, HashAlgorithm::Sha512),
        ];
        for (arcs, hash) in expected {
            assert_eq!(
                registry.hash_algorithm(&Oid::from_slice(arcs)).unwrap(),
                hash
            );
        }
    }

    #[test]
    fn test_standard_priv_entries() {
        let registry = AlgorithmRegistry::standard();

        let des = registry.privacy(&Oid::from_slice(oids::DES)).unwrap();
        assert_eq!(des.key_len, 16);
        assert_eq!(des.extension, KeyExtension::None);

        let aes256 = registry.privacy(&Oid::from_slice(oids::AES256)).unwrap();
        assert_eq!(aes256.key_len, 32);
        assert_eq!(aes256.extension, KeyExtension::Blumenthal);

        let aes256c = registry
            .privacy(&Oid::from_slice(oids::AES256_CISCO))
            .unwrap();
        assert_eq!(aes256c.protocol, PrivProtocol::Aes256);
        assert_eq!(aes256c.extension, KeyExtension::Reeder);

        let tdes = registry
            .privacy(&Oid::from_slice(oids::TRIPLE_DES))
            .unwrap();
        assert_eq!(tdes.key_len, 32);
        assert_eq!(tdes.extension, KeyExtension::Reeder);

        assert_eq!(registry.len(), 13);
        assert_eq!(registry.privacy_variants(PrivProtocol::Aes192).count(), 2);
    }

    #[test]
    fn test_unknown_oid() {
        let registry = AlgorithmRegistry::standard();
        let err = registry.resolve(&oid!(1, 3, 6, 1, 6, 3, 10, 1, 1, 1)).unwrap_err();
        assert!(matches!(*err, Error::UnknownAlgorithm(_)));
        assert!(err.to_string().contains("1.3.6.1.6.3.10.1.1.1"));
    }

    #[test]
    fn test_wrong_kind() {
        let registry = AlgorithmRegistry::standard();
        assert!(registry.hash_algorithm(&Oid::from_slice(oids::DES)).is_err());
        assert!(registry.privacy(&Oid::from_slice(oids::HMAC_MD5)).is_err());
    }

    #[test]
    fn test_register_vendor_protocol() {
        let mut registry = AlgorithmRegistry::new();
        assert!(registry.is_empty());

        let vendor = oid!(1, 3, 6, 1, 4, 1, 99999, 1);
        let algorithm = PrivAlgorithm::new(PrivProtocol::Aes256, KeyExtension::Reeder);
        assert!(registry.register_priv(vendor.clone(), algorithm).is_none());
        assert_eq!(registry.privacy(&vendor).unwrap(), algorithm);
        assert_eq!(registry.privacy_oid(&algorithm), Some(&vendor));

        let replaced = registry.register_auth(vendor.clone(), AuthAlgorithm::new(HashAlgorithm::Sha256));
        assert_eq!(replaced, Some(Algorithm::Priv(algorithm)));
    }

    #[test]
    fn test_mac_lengths() {
        assert_eq!(AuthAlgorithm::new(HashAlgorithm::Md5).mac_len, 12);
        assert_eq!(AuthAlgorithm::new(HashAlgorithm::Sha1).mac_len, 12);
        assert_eq!(AuthAlgorithm::new(HashAlgorithm::Sha224).mac_len, 16);
        assert_eq!(AuthAlgorithm::new(HashAlgorithm::Sha256).mac_len, 24);
        assert_eq!(AuthAlgorithm::new(HashAlgorithm::Sha384).mac_len, 32);
        assert_eq!(AuthAlgorithm::new(HashAlgorithm::Sha512).mac_len, 48);
    }
}
