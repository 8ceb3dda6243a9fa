//! USM key management (RFC 3414 Section 2.6, 5 and A.2).
//!
//! This module implements:
//! - Passphrase to master key (Ku) derivation
//! - Key localization (Ku to Kul) with an authoritative engine ID
//! - Privacy key extension (Blumenthal and Reeder strategies)
//! - KeyChange textual-convention encoding and decoding
//!
//! Every operation is a method on [`KeyTools`](crate::KeyTools).

mod extend;
mod keychange;
mod keys;
mod localize;
mod passphrase;

pub use keychange::KeyChange;
pub use keys::{LocalizedKey, MasterKey};
pub use passphrase::{EXPANDED_PASSPHRASE_LEN, HASH_BLOCK_LEN, MIN_PASSPHRASE_LEN};

use crate::crypto::HashAlgorithm;
use crate::error::{Error, Result};

/// Key extension strategy for privacy key derivation.
///
/// When a privacy protocol needs more key material than the authentication
/// hash produces (AES-256 with SHA-1, 3DES with MD5), the localized key must
/// be lengthened. Peers disagree on how, so the strategy is part of the
/// privacy algorithm's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyExtension {
    /// No extension defined. Short keys are an error.
    #[default]
    None,
    /// draft-blumenthal-aes-usm-04: `Kul' = Kul || H(Kul) || H(Kul || H(Kul)) || ...`
    Blumenthal,
    /// draft-reeder-snmpv3-usm-3desede: re-run passphrase-to-key with the
    /// current key as the passphrase, localize, append.
    Reeder,
}

impl std::fmt::Display for KeyExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Blumenthal => write!(f, "blumenthal"),
            Self::Reeder => write!(f, "reeder"),
        }
    }
}

/// Privacy cipher families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrivProtocol {
    /// DES-CBC (RFC 3414)
    Des,
    /// 3DES-EDE-CBC (draft-reeder-snmpv3-usm-3desede)
    TripleDes,
    /// AES-128-CFB (RFC 3826)
    Aes128,
    /// AES-192-CFB
    Aes192,
    /// AES-256-CFB
    Aes256,
}

impl PrivProtocol {
    /// Get the key length in bytes, including any pre-IV material.
    pub fn key_len(self) -> usize {
        match self {
            Self::Des => 16,       // 8 key + 8 pre-IV
            Self::TripleDes => 32, // 24 key + 8 pre-IV
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

impl std::fmt::Display for PrivProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Des => write!(f, "DES"),
            Self::TripleDes => write!(f, "3DES"),
            Self::Aes128 => write!(f, "AES"),
            Self::Aes192 => write!(f, "AES-192"),
            Self::Aes256 => write!(f, "AES-256"),
        }
    }
}

/// A privacy algorithm as far as key management is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrivAlgorithm {
    /// Cipher family.
    pub protocol: PrivProtocol,
    /// Bytes of localized key the cipher consumes.
    pub key_len: usize,
    /// How to lengthen a localized key shorter than `key_len`.
    pub extension: KeyExtension,
}

impl PrivAlgorithm {
    /// usmDESPrivProtocol
    pub const DES: Self = Self::new(PrivProtocol::Des, KeyExtension::None);
    /// usm3DESEDEPrivProtocol
    pub const TRIPLE_DES: Self = Self::new(PrivProtocol::TripleDes, KeyExtension::Reeder);
    /// usmAesCfb128Protocol
    pub const AES128: Self = Self::new(PrivProtocol::Aes128, KeyExtension::None);
    /// usmAES192PrivProtocol (Blumenthal extension)
    pub const AES192: Self = Self::new(PrivProtocol::Aes192, KeyExtension::Blumenthal);
    /// usmAES256PrivProtocol (Blumenthal extension)
    pub const AES256: Self = Self::new(PrivProtocol::Aes256, KeyExtension::Blumenthal);
    /// usmAES192CiscoPrivProtocol (Reeder extension)
    pub const AES192_CISCO: Self = Self::new(PrivProtocol::Aes192, KeyExtension::Reeder);
    /// usmAES256CiscoPrivProtocol (Reeder extension)
    pub const AES256_CISCO: Self = Self::new(PrivProtocol::Aes256, KeyExtension::Reeder);

    /// Privacy algorithm with the protocol's natural key length.
    pub const fn new(protocol: PrivProtocol, extension: KeyExtension) -> Self {
        let key_len = match protocol {
            PrivProtocol::Des | PrivProtocol::Aes128 => 16,
            PrivProtocol::Aes192 => 24,
            PrivProtocol::TripleDes | PrivProtocol::Aes256 => 32,
        };
        Self {
            protocol,
            key_len,
            extension,
        }
    }

    /// Check whether a key localized with `hash` is too short for this cipher.
    ///
    /// ```rust
    /// use snmp_usm_keys::{HashAlgorithm, PrivAlgorithm};
    ///
    /// assert!(PrivAlgorithm::AES256.needs_extension(HashAlgorithm::Sha1));
    /// assert!(!PrivAlgorithm::AES256.needs_extension(HashAlgorithm::Sha256));
    /// assert!(!PrivAlgorithm::DES.needs_extension(HashAlgorithm::Md5));
    /// ```
    pub fn needs_extension(&self, hash: HashAlgorithm) -> bool {
        hash.digest_len() < self.key_len
    }
}

impl std::fmt::Display for PrivAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.protocol, self.extension) {
            (PrivProtocol::Aes192 | PrivProtocol::Aes256, KeyExtension::Reeder) => {
                write!(f, "{}-C", self.protocol)
            }
            _ => write!(f, "{}", self.protocol),
        }
    }
}

impl std::str::FromStr for PrivAlgorithm {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DES" => Ok(Self::DES),
            "3DES" | "3DESEDE" | "3DES-EDE" => Ok(Self::TRIPLE_DES),
            "AES" | "AES128" | "AES-128" => Ok(Self::AES128),
            "AES192" | "AES-192" => Ok(Self::AES192),
            "AES256" | "AES-256" => Ok(Self::AES256),
            "AES192C" | "AES-192-C" => Ok(Self::AES192_CISCO),
            "AES256C" | "AES-256-C" => Ok(Self::AES256_CISCO),
            _ => Err(Error::unknown_algorithm(format_args!(
                "privacy protocol '{}'; expected one of: DES, 3DES, AES, AES-192, AES-256, AES-192-C, AES-256-C",
                s
            ))),
        }
    }
}
