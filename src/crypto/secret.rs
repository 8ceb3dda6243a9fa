//! Helpers for handling secret byte buffers.

use zeroize::Zeroize;

use crate::error::{Error, Result};

/// XOR two equal-length operands into `dst`.
///
/// All three slices must have the same length; otherwise
/// [`Error::KeyLengthMismatch`] is returned and `dst` is left untouched.
///
/// # Examples
///
/// ```
/// use snmp_usm_keys::crypto::xor_into;
///
/// let mut out = [0u8; 2];
/// xor_into(&mut out, &[0xf0, 0x0f], &[0xff, 0xff]).unwrap();
/// assert_eq!(out, [0x0f, 0xf0]);
///
/// assert!(xor_into(&mut out, &[1], &[1, 2]).is_err());
/// ```
pub fn xor_into(dst: &mut [u8], a: &[u8], b: &[u8]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::key_length(a.len(), b.len()));
    }
    if dst.len() != a.len() {
        return Err(Error::key_length(a.len(), dst.len()));
    }
    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x ^ y;
    }
    Ok(())
}

/// Zeroes the tail of a caller-owned destination unless explicitly disarmed.
///
/// The guard covers early returns, `?` propagation and unwinding alike.
struct WipeGuard<'a> {
    buf: &'a mut [u8],
    from: usize,
    armed: bool,
}

impl Drop for WipeGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.buf[self.from..].zeroize();
        }
    }
}

/// Run `op` against `out`, zeroing all of `out` if `op` fails or panics.
pub(crate) fn wipe_on_error<T>(
    out: &mut [u8],
    op: impl FnOnce(&mut [u8]) -> Result<T>,
) -> Result<T> {
    wipe_tail_on_error(out, 0, op)
}

/// Run `op` against `out`, zeroing `out[from..]` if `op` fails or panics.
///
/// Bytes before `from` belong to the caller and are left as they are.
pub(crate) fn wipe_tail_on_error<T>(
    out: &mut [u8],
    from: usize,
    op: impl FnOnce(&mut [u8]) -> Result<T>,
) -> Result<T> {
    let from = from.min(out.len());
    let mut guard = WipeGuard {
        buf: out,
        from,
        armed: true,
    };
    let result = op(&mut *guard.buf);
    if result.is_ok() {
        guard.armed = false;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_into() {
        let mut out = [0u8; 4];
        xor_into(&mut out, &[1, 2, 3, 4], &[1, 0, 3, 0]).unwrap();
        assert_eq!(out, [0, 2, 0, 4]);
    }

    #[test]
    fn test_xor_into_rejects_unequal_operands() {
        let mut out = [0xAAu8; 3];
        let err = xor_into(&mut out, &[1, 2, 3], &[1, 2]).unwrap_err();
        assert!(matches!(
            *err,
            Error::KeyLengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(out, [0xAA; 3]);

        let mut short = [0u8; 2];
        assert!(xor_into(&mut short, &[1, 2, 3], &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_wipe_on_error_keeps_success() {
        let mut out = [0u8; 4];
        let n = wipe_on_error(&mut out, |buf| {
            buf.fill(7);
            Ok(buf.len())
        })
        .unwrap();
        assert_eq!(n, 4);
        assert_eq!(out, [7; 4]);
    }

    #[test]
    fn test_wipe_on_error_zeroes_whole_buffer() {
        let mut out = [0xAAu8; 8];
        let result: Result<()> = wipe_on_error(&mut out, |buf| {
            buf[..4].fill(0x55);
            Err(Error::InvalidArgument("boom").boxed())
        });
        assert!(result.is_err());
        assert_eq!(out, [0u8; 8]);
    }

    #[test]
    fn test_wipe_tail_keeps_prefix() {
        let mut out = [0xAAu8; 8];
        let result: Result<()> = wipe_tail_on_error(&mut out, 3, |buf| {
            buf.fill(0x55);
            Err(Error::InvalidArgument("boom").boxed())
        });
        assert!(result.is_err());
        // prefix was overwritten by the closure but not wiped by the guard
        assert_eq!(out[..3], [0x55; 3]);
        assert_eq!(out[3..], [0u8; 5]);
    }

    #[test]
    fn test_wipe_on_panic() {
        let mut out = [0xAAu8; 8];
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<()> = wipe_on_error(&mut out, |_| panic!("hash backend exploded"));
        }));
        assert!(caught.is_err());
        assert_eq!(out, [0u8; 8]);
    }
}
