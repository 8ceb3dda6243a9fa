//! Error types for snmp-usm-keys.
//!
//! This module provides:
//!
//! - [`Error`] - The main error type covering every key-management failure
//! - [`CryptoErrorKind`] - Which cryptographic collaborator failed
//!
//! # Error Handling
//!
//! Errors are boxed for efficiency: `Result<T> = Result<T, Box<Error>>`.
//!
//! ```rust
//! use snmp_usm_keys::{Error, HashAlgorithm, KeyTools};
//!
//! let tools = KeyTools::default();
//! match tools.derive_master_key(HashAlgorithm::Md5, b"short") {
//!     Ok(_) => unreachable!(),
//!     Err(e) => match &*e {
//!         Error::PassphraseTooShort { len, min } => {
//!             println!("passphrase has {} bytes, need {}", len, min);
//!         }
//!         _ => println!("Error: {}", e),
//!     },
//! }
//! ```
//!
//! Every operation fails fast on the first violated precondition. No partial
//! key material is ever returned alongside an error, and destination buffers
//! handed to the `_into` operations are zeroed before the error is reported.

/// Result type alias using the library's boxed Error type.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Cryptographic collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CryptoErrorKind {
    /// The hash context failed to initialize, update or finalize.
    Hash,
    /// The secure random source reported an error.
    RandomSource,
    /// The secure random source produced fewer bytes than requested.
    ShortRandom { requested: usize, produced: usize },
}

impl std::fmt::Display for CryptoErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash => write!(f, "hash engine failure"),
            Self::RandomSource => write!(f, "secure random source unavailable"),
            Self::ShortRandom {
                requested,
                produced,
            } => write!(
                f,
                "secure random source produced {} of {} requested bytes",
                produced, requested
            ),
        }
    }
}

/// The main error type for all key-management operations.
///
/// # Common Patterns
///
/// ```
/// use snmp_usm_keys::Error;
///
/// fn is_caller_mistake(error: &Error) -> bool {
///     matches!(error,
///         Error::InvalidArgument(_) |
///         Error::KeyLengthMismatch { .. } |
///         Error::BufferTooSmall { .. }
///     )
/// }
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required input was empty or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Passphrase is below the configured security floor.
    #[error("passphrase is {len} bytes; at least {min} are required")]
    PassphraseTooShort { len: usize, min: usize },

    /// Algorithm identifier is not known to the registry or hash provider.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(Box<str>),

    /// A key does not have the length the operation requires.
    #[error("key length mismatch: expected {expected} bytes, got {actual}")]
    KeyLengthMismatch { expected: usize, actual: usize },

    /// A destination buffer cannot hold the result.
    #[error("buffer too small: need {needed} bytes, capacity is {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// The privacy algorithm has no key extension strategy.
    #[error("no key extension strategy defined for {0}")]
    UnsupportedExtensionStrategy(Box<str>),

    /// Hash or random-source failure.
    #[error("crypto engine failure: {kind}")]
    CryptoEngine { kind: CryptoErrorKind },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(Box<str>),

    /// Invalid OID format.
    #[error("invalid OID: {0}")]
    InvalidOid(Box<str>),
}

impl Error {
    /// Box this error (convenience for constructing boxed errors).
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub(crate) fn unknown_algorithm(name: impl std::fmt::Display) -> Box<Self> {
        Self::UnknownAlgorithm(name.to_string().into_boxed_str()).boxed()
    }

    pub(crate) fn crypto(kind: CryptoErrorKind) -> Box<Self> {
        Self::CryptoEngine { kind }.boxed()
    }

    pub(crate) fn key_length(expected: usize, actual: usize) -> Box<Self> {
        Self::KeyLengthMismatch { expected, actual }.boxed()
    }

    pub(crate) fn buffer_too_small(needed: usize, capacity: usize) -> Box<Self> {
        Self::BufferTooSmall { needed, capacity }.boxed()
    }
}
