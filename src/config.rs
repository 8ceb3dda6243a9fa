//! Key-derivation configuration.

use crate::error::{Error, Result};
use crate::usm::{EXPANDED_PASSPHRASE_LEN, HASH_BLOCK_LEN, MIN_PASSPHRASE_LEN};

/// Tunable parameters for passphrase-to-key derivation.
///
/// The defaults reproduce RFC 3414 exactly. Changing `expansion_len` yields
/// keys that no standard peer will derive from the same passphrase, so it is
/// only useful for tests and benchmarks.
///
/// With the `serde` feature enabled, fields missing from a deserialized
/// config take these defaults.
///
/// ```rust
/// use snmp_usm_keys::KeyToolsConfig;
///
/// let config = KeyToolsConfig::default();
/// assert_eq!(config.min_passphrase_len, 8);
/// assert_eq!(config.expansion_len, 1_048_576);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyToolsConfig {
    /// Shortest passphrase accepted (net-snmp `USM_LENGTH_P_MIN`).
    pub min_passphrase_len: usize,
    /// Bytes of repeated passphrase hashed to form the master key.
    pub expansion_len: usize,
}

impl Default for KeyToolsConfig {
    fn default() -> Self {
        Self {
            min_passphrase_len: MIN_PASSPHRASE_LEN,
            expansion_len: EXPANDED_PASSPHRASE_LEN,
        }
    }
}

impl KeyToolsConfig {
    /// Check the configuration for values the derivation cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.min_passphrase_len == 0 {
            return Err(Error::Config("min_passphrase_len must be at least 1".into()).boxed());
        }
        if self.expansion_len == 0 {
            return Err(Error::Config("expansion_len must be non-zero".into()).boxed());
        }
        if !self.expansion_len.is_multiple_of(HASH_BLOCK_LEN) {
            return Err(Error::Config(
                format!(
                    "expansion_len {} is not a multiple of the {}-byte hash block",
                    self.expansion_len, HASH_BLOCK_LEN
                )
                .into(),
            )
            .boxed());
        }
        Ok(())
    }
}
