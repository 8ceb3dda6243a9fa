//! Secure random source used for KeyChange salts.

use crate::error::{CryptoErrorKind, Error, Result};

/// Cryptographically secure random byte source.
///
/// Implementations must either fill the whole destination with unpredictable
/// bytes or fail. The return value is the number of bytes produced; callers in
/// this crate treat anything other than `dest.len()` as a fatal
/// [`CryptoErrorKind::ShortRandom`] failure rather than padding or retrying.
///
/// A single source may be shared between threads. It must never hand the same
/// output to two concurrent callers.
pub trait SecureRandom: Send + Sync {
    /// Fill `dest` with random bytes, returning how many were produced.
    fn fill(&self, dest: &mut [u8]) -> Result<usize>;
}

/// Operating-system random source via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<usize> {
        getrandom::fill(dest).map_err(|e| {
            tracing::warn!(target: "snmp_usm_keys::random", error = %e, "OS random source failed");
            Error::crypto(CryptoErrorKind::RandomSource)
        })?;
        Ok(dest.len())
    }
}

/// Fill `dest` completely or fail.
pub(crate) fn fill_exact(random: &dyn SecureRandom, dest: &mut [u8]) -> Result<()> {
    let produced = random.fill(dest)?;
    if produced != dest.len() {
        tracing::warn!(
            target: "snmp_usm_keys::random",
            { usm.requested = dest.len(), usm.produced = produced },
            "secure random source returned a short read"
        );
        return Err(Error::crypto(CryptoErrorKind::ShortRandom {
            requested: dest.len(),
            produced,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Truncating;

    impl SecureRandom for Truncating {
        fn fill(&self, dest: &mut [u8]) -> Result<usize> {
            dest.fill(0x5a);
            Ok(dest.len() / 2)
        }
    }

    #[test]
    fn test_os_random_fills() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        fill_exact(&OsRandom, &mut a).unwrap();
        fill_exact(&OsRandom, &mut b).unwrap();
        // 2^-256 chance of a false failure
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_read_is_fatal() {
        let mut buf = [0u8; 16];
        let err = fill_exact(&Truncating, &mut buf).unwrap_err();
        assert!(matches!(
            *err,
            Error::CryptoEngine {
                kind: CryptoErrorKind::ShortRandom {
                    requested: 16,
                    produced: 8
                }
            }
        ));
    }

    #[test]
    fn test_empty_request() {
        let mut buf = [0u8; 0];
        fill_exact(&OsRandom, &mut buf).unwrap();
    }
}
