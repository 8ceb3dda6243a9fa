//! Command-line argument structures for the `usmkey` tool.

use clap::{Parser, Subcommand};

use crate::crypto::HashAlgorithm;
use crate::format::hex;
use crate::usm::PrivAlgorithm;

/// Hex-encoded byte string argument (engine IDs, keys, KeyChange values).
///
/// Bytes are zeroed on drop and hidden from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct HexBytes(pub zeroize::Zeroizing<Vec<u8>>);

impl HexBytes {
    /// The decoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::str::FromStr for HexBytes {
    type Err = hex::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map(|bytes| Self(zeroize::Zeroizing::new(bytes)))
    }
}

impl std::fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexBytes({} bytes)", self.0.len())
    }
}

/// Logging control arguments.
#[derive(Debug, Parser)]
pub struct LogArgs {
    /// Enable debug logging (snmp_usm_keys=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Enable trace logging (snmp_usm_keys=trace).
    #[arg(short = 'D', long = "trace", global = true)]
    pub trace: bool,
}

impl LogArgs {
    /// Initialize tracing based on debug/trace flags.
    ///
    /// Logs go to stderr so that stdout carries only the hex result.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = if self.trace {
            "snmp_usm_keys=trace"
        } else if self.debug {
            "snmp_usm_keys=debug"
        } else {
            "snmp_usm_keys=warn"
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Hash selection shared by every subcommand.
#[derive(Debug, Parser)]
pub struct HashArgs {
    /// Authentication hash: MD5, SHA, SHA-224, SHA-256, SHA-384, SHA-512.
    #[arg(short = 'a', long = "auth-protocol", default_value = "SHA")]
    pub hash: HashAlgorithm,
}

/// Key-management subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive the master key Ku from a passphrase.
    Ku {
        #[command(flatten)]
        hash: HashArgs,

        /// Passphrase (at least 8 characters).
        #[arg(short = 'p', long = "passphrase")]
        passphrase: String,
    },

    /// Derive a localized key Kul from a passphrase or master key.
    Kul {
        #[command(flatten)]
        hash: HashArgs,

        /// Authoritative engine ID, hex.
        #[arg(short = 'e', long = "engine-id")]
        engine_id: HexBytes,

        /// Passphrase to derive Ku from.
        #[arg(short = 'p', long = "passphrase", required_unless_present = "master_key", conflicts_with = "master_key")]
        passphrase: Option<String>,

        /// Previously derived master key, hex.
        #[arg(short = 'k', long = "master-key")]
        master_key: Option<HexBytes>,
    },

    /// Derive a privacy key, extended to the cipher's key length if needed.
    PrivKey {
        #[command(flatten)]
        hash: HashArgs,

        /// Privacy protocol: DES, 3DES, AES, AES-192, AES-256, AES-192-C, AES-256-C.
        #[arg(short = 'x', long = "priv-protocol")]
        privacy: PrivAlgorithm,

        /// Authoritative engine ID, hex.
        #[arg(short = 'e', long = "engine-id")]
        engine_id: HexBytes,

        /// Privacy passphrase.
        #[arg(short = 'p', long = "passphrase")]
        passphrase: String,
    },

    /// Encode a KeyChange value for usmUserAuthKeyChange/usmUserPrivKeyChange.
    EncodeKeychange {
        #[command(flatten)]
        hash: HashArgs,

        /// Authoritative engine ID, hex. Required with passphrases.
        #[arg(short = 'e', long = "engine-id")]
        engine_id: Option<HexBytes>,

        /// Current passphrase.
        #[arg(short = 'O', long = "old-passphrase", required_unless_present = "old_key", conflicts_with = "old_key")]
        old_passphrase: Option<String>,

        /// New passphrase.
        #[arg(short = 'N', long = "new-passphrase", required_unless_present = "new_key", conflicts_with = "new_key")]
        new_passphrase: Option<String>,

        /// Current localized key, hex.
        #[arg(long = "old-key")]
        old_key: Option<HexBytes>,

        /// New localized key, hex.
        #[arg(long = "new-key")]
        new_key: Option<HexBytes>,
    },

    /// Recover the new key from a KeyChange value.
    DecodeKeychange {
        #[command(flatten)]
        hash: HashArgs,

        /// Current localized key, hex.
        #[arg(long = "old-key")]
        old_key: HexBytes,

        /// KeyChange value, hex.
        #[arg(short = 'c', long = "keychange")]
        keychange: HexBytes,
    },
}
