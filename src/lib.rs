//! # snmp-usm-keys
//!
//! SNMPv3 User-based Security Model key management (RFC 3414, RFC 7860).
//!
//! ## Features
//!
//! - Passphrase to master key (Ku) derivation
//! - Key localization (Ku to Kul) for an authoritative engine
//! - Privacy key extension (Blumenthal and Reeder strategies) for AES-192,
//!   AES-256 and 3DES with short authentication hashes
//! - KeyChange encoding and decoding for in-band key rotation
//! - Data-driven algorithm registry keyed by USM MIB OIDs
//! - Pluggable hash and secure random backends
//!
//! Key material is zeroed on drop, compared in constant time, and never
//! written to logs.
//!
//! ## Quick Start
//!
//! ```rust
//! use snmp_usm_keys::{HashAlgorithm, KeyTools, PrivAlgorithm};
//!
//! let tools = KeyTools::default();
//! let engine_id = [0x80, 0x00, 0x1f, 0x88, 0x80, 0x01, 0x02, 0x03];
//!
//! // Authentication key
//! let auth_key = tools
//!     .localize_passphrase(HashAlgorithm::Sha1, b"authpass123", &engine_id)
//!     .unwrap();
//! assert_eq!(auth_key.len(), 20);
//!
//! // AES-256 privacy key from a SHA-1 user, extended per draft-blumenthal
//! let priv_key = tools
//!     .derive_privacy_key(HashAlgorithm::Sha1, &PrivAlgorithm::AES256, b"privpass123", &engine_id)
//!     .unwrap();
//! assert_eq!(priv_key.len(), 32);
//! ```
//!
//! ## Key Rotation
//!
//! ```rust
//! use snmp_usm_keys::{HashAlgorithm, KeyTools};
//!
//! let tools = KeyTools::default();
//! let engine_id = [0x80, 0x00, 0x1f, 0x88, 0x80, 0x01, 0x02, 0x03];
//! let old = tools.localize_passphrase(HashAlgorithm::Sha256, b"oldpassword", &engine_id).unwrap();
//! let new = tools.localize_passphrase(HashAlgorithm::Sha256, b"newpassword", &engine_id).unwrap();
//!
//! // Value to SET on usmUserAuthKeyChange
//! let kc = tools
//!     .encode_key_change(HashAlgorithm::Sha256, old.as_bytes(), new.as_bytes())
//!     .unwrap();
//!
//! // What the agent does on receipt
//! let recovered = tools
//!     .decode_key_change(HashAlgorithm::Sha256, old.as_bytes(), kc.as_bytes())
//!     .unwrap();
//! assert_eq!(recovered, new);
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod format;
pub mod oid;
pub mod registry;
pub mod tools;
pub mod usm;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use config::KeyToolsConfig;
pub use crypto::{HashAlgorithm, HashContext, HashProvider, OsRandom, RustCryptoHashes, SecureRandom};
pub use error::{CryptoErrorKind, Error, Result};
pub use oid::Oid;
pub use registry::{Algorithm, AlgorithmRegistry, AuthAlgorithm};
pub use tools::{KeyTools, KeyToolsBuilder};
pub use usm::{KeyChange, KeyExtension, LocalizedKey, MasterKey, PrivAlgorithm, PrivProtocol};
