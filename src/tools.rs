//! The key-management engine and its builder.

use std::sync::{Arc, OnceLock};

use crate::config::KeyToolsConfig;
use crate::crypto::{HashProvider, OsRandom, RustCryptoHashes, SecureRandom};
use crate::error::Result;
use crate::registry::AlgorithmRegistry;

/// Stateless USM key-management engine.
///
/// `KeyTools` bundles the collaborators every key operation needs: a hash
/// provider, a secure random source (for KeyChange salts), the algorithm
/// registry and the derivation parameters. It holds no per-call state, so a
/// single instance can be shared across threads and cloned cheaply.
///
/// The operations themselves live in the [`usm`](crate::usm) module:
///
/// - [`derive_master_key`](KeyTools::derive_master_key) - passphrase to Ku
/// - [`localize`](KeyTools::localize) - Ku to Kul
/// - [`extend_key`](KeyTools::extend_key) - lengthen a Kul for a cipher
/// - [`encode_key_change`](KeyTools::encode_key_change) /
///   [`decode_key_change`](KeyTools::decode_key_change) - KeyChange TC
///
/// # Example
///
/// ```rust
/// use snmp_usm_keys::{HashAlgorithm, KeyTools};
///
/// let tools = KeyTools::default();
/// let ku = tools.derive_master_key(HashAlgorithm::Sha1, b"maplesyrup").unwrap();
/// let kul = tools.localize(&ku, &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2]).unwrap();
/// assert_eq!(kul.len(), 20);
/// ```
#[derive(Clone)]
pub struct KeyTools {
    pub(crate) hashes: Arc<dyn HashProvider>,
    pub(crate) random: Arc<dyn SecureRandom>,
    pub(crate) registry: Arc<AlgorithmRegistry>,
    pub(crate) config: KeyToolsConfig,
}

impl Default for KeyTools {
    fn default() -> Self {
        Self {
            hashes: Arc::new(RustCryptoHashes),
            random: Arc::new(OsRandom),
            registry: Arc::new(AlgorithmRegistry::standard()),
            config: KeyToolsConfig::default(),
        }
    }
}

impl std::fmt::Debug for KeyTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyTools")
            .field("registry_entries", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl KeyTools {
    /// Create a builder for a customized engine.
    pub fn builder() -> KeyToolsBuilder {
        KeyToolsBuilder::new()
    }

    /// Process-wide engine with the default collaborators.
    ///
    /// Used by the convenience constructors on the key types.
    pub fn shared() -> &'static KeyTools {
        static SHARED: OnceLock<KeyTools> = OnceLock::new();
        SHARED.get_or_init(KeyTools::default)
    }

    /// The algorithm registry used to resolve protocol OIDs.
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// The derivation parameters.
    pub fn config(&self) -> &KeyToolsConfig {
        &self.config
    }
}

/// Builder for [`KeyTools`].
///
/// Every collaborator defaults to the same value [`KeyTools::default`] uses.
///
/// # Example
///
/// ```rust
/// use snmp_usm_keys::{KeyTools, OsRandom};
///
/// let tools = KeyTools::builder()
///     .random_source(OsRandom)
///     .min_passphrase_len(12)
///     .build()
///     .unwrap();
/// assert_eq!(tools.config().min_passphrase_len, 12);
/// ```
pub struct KeyToolsBuilder {
    hashes: Arc<dyn HashProvider>,
    random: Arc<dyn SecureRandom>,
    registry: Arc<AlgorithmRegistry>,
    config: KeyToolsConfig,
}

impl Default for KeyToolsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyToolsBuilder {
    /// Create a builder with default collaborators.
    pub fn new() -> Self {
        let KeyTools {
            hashes,
            random,
            registry,
            config,
        } = KeyTools::default();
        Self {
            hashes,
            random,
            registry,
            config,
        }
    }

    /// Set the hash provider.
    pub fn hash_provider(mut self, hashes: impl HashProvider + 'static) -> Self {
        self.hashes = Arc::new(hashes);
        self
    }

    /// Set the secure random source used for KeyChange salts.
    pub fn random_source(mut self, random: impl SecureRandom + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }

    /// Share an existing random source.
    pub fn shared_random_source(mut self, random: Arc<dyn SecureRandom>) -> Self {
        self.random = random;
        self
    }

    /// Set the algorithm registry.
    pub fn registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Replace the whole derivation configuration.
    pub fn config(mut self, config: KeyToolsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum passphrase length (default: 8).
    pub fn min_passphrase_len(mut self, len: usize) -> Self {
        self.config.min_passphrase_len = len;
        self
    }

    /// Set the passphrase expansion length (default: 1,048,576).
    ///
    /// Anything other than the default breaks interoperability.
    pub fn expansion_len(mut self, len: usize) -> Self {
        self.config.expansion_len = len;
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<KeyTools> {
        self.config.validate()?;
        tracing::debug!(
            target: "snmp_usm_keys::tools",
            { usm.min_passphrase_len = self.config.min_passphrase_len, usm.expansion_len = self.config.expansion_len },
            "key tools configured"
        );
        Ok(KeyTools {
            hashes: self.hashes,
            random: self.random,
            registry: self.registry,
            config: self.config,
        })
    }
}
