//! Hash algorithms and the incremental hashing interface.
//!
//! The key-management core never names a hash implementation directly. It
//! asks a [`HashProvider`] for a [`HashContext`] and drives it through
//! update/finalize, so an alternative backend (a FIPS module, a hardware
//! token) can be swapped in at startup through
//! [`KeyToolsBuilder::hash_provider`](crate::KeyToolsBuilder::hash_provider).

use digest::{Digest, OutputSizeUser};
use zeroize::Zeroize;

use crate::error::{CryptoErrorKind, Error, Result};

/// Hash algorithms used by the USM authentication protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashAlgorithm {
    /// MD5 (usmHMACMD5AuthProtocol, RFC 3414)
    Md5,
    /// SHA-1 (usmHMACSHAAuthProtocol, RFC 3414)
    Sha1,
    /// SHA-224 (usmHMAC128SHA224AuthProtocol, RFC 7860)
    Sha224,
    /// SHA-256 (usmHMAC192SHA256AuthProtocol, RFC 7860)
    Sha256,
    /// SHA-384 (usmHMAC256SHA384AuthProtocol, RFC 7860)
    Sha384,
    /// SHA-512 (usmHMAC384SHA512AuthProtocol, RFC 7860)
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, weakest first.
    pub const ALL: [Self; 6] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Get the digest output length in bytes.
    ///
    /// This is also the length of every master key and localized key derived
    /// with this algorithm.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Md5 => write!(f, "MD5"),
            Self::Sha1 => write!(f, "SHA"),
            Self::Sha224 => write!(f, "SHA-224"),
            Self::Sha256 => write!(f, "SHA-256"),
            Self::Sha384 => write!(f, "SHA-384"),
            Self::Sha512 => write!(f, "SHA-512"),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MD5" => Ok(Self::Md5),
            "SHA" | "SHA1" | "SHA-1" => Ok(Self::Sha1),
            "SHA224" | "SHA-224" => Ok(Self::Sha224),
            "SHA256" | "SHA-256" => Ok(Self::Sha256),
            "SHA384" | "SHA-384" => Ok(Self::Sha384),
            "SHA512" | "SHA-512" => Ok(Self::Sha512),
            _ => Err(Error::unknown_algorithm(format_args!(
                "hash '{}'; expected one of: MD5, SHA, SHA-224, SHA-256, SHA-384, SHA-512",
                s
            ))),
        }
    }
}

/// An in-progress hash computation.
pub trait HashContext: Send {
    /// Feed more input into the hash.
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Finish the hash and write the digest to the front of `out`.
    ///
    /// Returns the number of bytes written. Fails with
    /// [`Error::BufferTooSmall`] when `out` is shorter than the digest.
    fn finalize_into(self: Box<Self>, out: &mut [u8]) -> Result<usize>;
}

/// Source of hash contexts.
pub trait HashProvider: Send + Sync {
    /// Digest length of `algorithm` as produced by this provider.
    fn digest_len(&self, algorithm: HashAlgorithm) -> Result<usize> {
        Ok(algorithm.digest_len())
    }

    /// Start a new hash computation.
    ///
    /// Providers that do not implement `algorithm` return
    /// [`Error::UnknownAlgorithm`].
    fn context(&self, algorithm: HashAlgorithm) -> Result<Box<dyn HashContext>>;
}

/// Default [`HashProvider`] backed by the RustCrypto `md-5`, `sha1` and
/// `sha2` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoHashes;

impl HashProvider for RustCryptoHashes {
    fn context(&self, algorithm: HashAlgorithm) -> Result<Box<dyn HashContext>> {
        Ok(match algorithm {
            HashAlgorithm::Md5 => DigestContext::<md5::Md5>::boxed(),
            HashAlgorithm::Sha1 => DigestContext::<sha1::Sha1>::boxed(),
            HashAlgorithm::Sha224 => DigestContext::<sha2::Sha224>::boxed(),
            HashAlgorithm::Sha256 => DigestContext::<sha2::Sha256>::boxed(),
            HashAlgorithm::Sha384 => DigestContext::<sha2::Sha384>::boxed(),
            HashAlgorithm::Sha512 => DigestContext::<sha2::Sha512>::boxed(),
        })
    }
}

struct DigestContext<D>(D);

impl<D> DigestContext<D>
where
    D: Digest + Send + 'static,
{
    fn boxed() -> Box<dyn HashContext> {
        Box::new(Self(D::new()))
    }
}

impl<D> HashContext for DigestContext<D>
where
    D: Digest + Send + 'static,
{
    fn update(&mut self, data: &[u8]) -> Result<()> {
        Digest::update(&mut self.0, data);
        Ok(())
    }

    fn finalize_into(self: Box<Self>, out: &mut [u8]) -> Result<usize> {
        let len = <D as OutputSizeUser>::output_size();
        if out.len() < len {
            return Err(Error::buffer_too_small(len, out.len()));
        }
        let Self(hasher) = *self;
        let mut digest = hasher.finalize();
        out[..len].copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
        Ok(len)
    }
}

/// Hash the concatenation of `parts` into the front of `out`.
///
/// Returns the digest length. A provider that writes a digest of a different
/// length than it advertises is reported as a hash engine failure.
pub(crate) fn hash_parts(
    hashes: &dyn HashProvider,
    algorithm: HashAlgorithm,
    parts: &[&[u8]],
    out: &mut [u8],
) -> Result<usize> {
    let digest_len = hashes.digest_len(algorithm)?;
    if out.len() < digest_len {
        return Err(Error::buffer_too_small(digest_len, out.len()));
    }

    let mut ctx = hashes.context(algorithm)?;
    for part in parts {
        ctx.update(part)?;
    }
    let written = ctx.finalize_into(out)?;
    if written != digest_len {
        tracing::warn!(
            target: "snmp_usm_keys::hash",
            { usm.hash = %algorithm, usm.expected = digest_len, usm.written = written },
            "hash provider digest length disagrees with advertised length"
        );
        return Err(Error::crypto(CryptoErrorKind::Hash));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::hex::encode;

    fn one_shot(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; algorithm.digest_len()];
        let n = hash_parts(&RustCryptoHashes, algorithm, &[data], &mut out).unwrap();
        out.truncate(n);
        out
    }

    #[test]
    fn test_digest_lengths_match_backend() {
        for alg in HashAlgorithm::ALL {
            assert_eq!(one_shot(alg, b"abc").len(), alg.digest_len(), "{}", alg);
        }
    }

    #[test]
    fn test_known_digests() {
        // FIPS 180 / RFC 1321 "abc" vectors
        assert_eq!(
            encode(&one_shot(HashAlgorithm::Md5, b"abc")),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            encode(&one_shot(HashAlgorithm::Sha1, b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            encode(&one_shot(HashAlgorithm::Sha256, b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_parts_are_concatenated() {
        let mut split = vec![0u8; 20];
        hash_parts(
            &RustCryptoHashes,
            HashAlgorithm::Sha1,
            &[b"ab", b"", b"c"],
            &mut split,
        )
        .unwrap();
        assert_eq!(split, one_shot(HashAlgorithm::Sha1, b"abc"));
    }

    #[test]
    fn test_short_output_rejected() {
        let mut out = [0u8; 15];
        let err = hash_parts(&RustCryptoHashes, HashAlgorithm::Md5, &[b"x"], &mut out)
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::BufferTooSmall {
                needed: 16,
                capacity: 15
            }
        ));
    }

    #[test]
    fn test_context_finalize_into_short_buffer() {
        let ctx = RustCryptoHashes.context(HashAlgorithm::Sha512).unwrap();
        let mut out = [0u8; 32];
        assert!(ctx.finalize_into(&mut out).is_err());
    }

    #[test]
    fn test_hash_algorithm_display() {
        assert_eq!(format!("{}", HashAlgorithm::Md5), "MD5");
        assert_eq!(format!("{}", HashAlgorithm::Sha1), "SHA");
        assert_eq!(format!("{}", HashAlgorithm::Sha224), "SHA-224");
        assert_eq!(format!("{}", HashAlgorithm::Sha512), "SHA-512");
    }

    #[test]
    fn test_hash_algorithm_from_str() {
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("SHA".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!("sha-1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!(
            "SHA256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );
        assert_eq!(
            "sha-384".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha384
        );

        let err = "whirlpool".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(*err, Error::UnknownAlgorithm(_)));
        assert!(err.to_string().contains("whirlpool"));
    }
}
