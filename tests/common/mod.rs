//! Shared test infrastructure for snmp-usm-keys.
//!
//! Provides deterministic and faulty random sources, a failing hash provider,
//! and RFC 3414 fixture constants.

// Allow dead code since not all test files use all utilities
#![allow(dead_code)]

use snmp_usm_keys::{
    CryptoErrorKind, Error, HashAlgorithm, HashContext, HashProvider, KeyTools, Result,
    RustCryptoHashes, SecureRandom,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Engine ID used by every RFC 3414 Appendix A vector.
pub const RFC_ENGINE_ID: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];

/// Passphrase used by the RFC 3414 Appendix A vectors.
pub const MAPLESYRUP: &[u8] = b"maplesyrup";

/// New passphrase used by the RFC 3414 A.5 key change vectors.
pub const NEWSYRUP: &[u8] = b"newsyrup";

/// Random source that always produces the same byte.
///
/// `FixedRandom(0)` reproduces net-snmp's RANDOMZEROS test build, which is
/// how the RFC 3414 A.5 KeyChange vectors were generated.
pub struct FixedRandom(pub u8);

impl SecureRandom for FixedRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<usize> {
        dest.fill(self.0);
        Ok(dest.len())
    }
}

/// Random source that reports an unavailable device.
pub struct FailingRandom;

impl SecureRandom for FailingRandom {
    fn fill(&self, _dest: &mut [u8]) -> Result<usize> {
        Err(Error::CryptoEngine {
            kind: CryptoErrorKind::RandomSource,
        }
        .boxed())
    }
}

/// Random source that fills only part of the request but claims success
/// for the part it did fill.
pub struct ShortRandom;

impl SecureRandom for ShortRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<usize> {
        let half = dest.len() / 2;
        dest[..half].fill(0x5a);
        Ok(half)
    }
}

/// Hash provider that fails after a number of successful contexts.
///
/// Delegates to [`RustCryptoHashes`] until the budget is spent.
pub struct FailingHashes {
    remaining: AtomicUsize,
}

impl FailingHashes {
    pub fn after(contexts: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(contexts),
        }
    }
}

impl HashProvider for FailingHashes {
    fn context(&self, algorithm: HashAlgorithm) -> Result<Box<dyn HashContext>> {
        let budget = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match budget {
            Ok(_) => RustCryptoHashes.context(algorithm),
            Err(_) => Err(Error::CryptoEngine {
                kind: CryptoErrorKind::Hash,
            }
            .boxed()),
        }
    }
}

/// Engine with a 4 KiB passphrase expansion, for property tests that would
/// otherwise hash a megabyte per case.
pub fn fast_tools() -> KeyTools {
    KeyTools::builder()
        .expansion_len(4096)
        .build()
        .expect("valid test configuration")
}
