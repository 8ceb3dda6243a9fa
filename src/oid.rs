//! Object Identifier (OID) type.
//!
//! Algorithm identifiers in the USM MIB (`usmUserAuthProtocol`,
//! `usmUserPrivProtocol`) are OIDs. They are stored as `SmallVec<[u32; 16]>`
//! so registry lookups never allocate for the identifiers in use today.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a value".
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.6.3.10.1.1.3").
    ///
    /// A single leading dot is accepted, as printed by net-snmp tools.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_usm_keys::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.6.3.10.1.2.4").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.6.3.10.1.2.4");
    ///
    /// assert!(Oid::parse("1.3.six").is_err());
    /// assert!(Oid::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix('.').unwrap_or(s);
        if body.is_empty() {
            return Err(Error::InvalidOid("empty OID".into()).boxed());
        }

        let mut arcs = SmallVec::new();
        for part in body.split('.') {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::InvalidOid(s.to_string().into_boxed_str()).boxed())?;
            arcs.push(arc);
        }

        if arcs.len() > MAX_OID_LEN {
            return Err(Error::InvalidOid(
                format!("{} arcs exceeds maximum of {}", arcs.len(), MAX_OID_LEN).into(),
            )
            .boxed());
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Macro to create an OID from literal arcs.
///
/// # Examples
///
/// ```
/// use snmp_usm_keys::oid;
///
/// let hmac_sha = oid!(1, 3, 6, 1, 6, 3, 10, 1, 1, 3);
/// assert_eq!(hmac_sha.to_string(), "1.3.6.1.6.3.10.1.1.3");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.6.3.10.1.1.2").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 6, 3, 10, 1, 1, 2]);
    }

    #[test]
    fn test_parse_leading_dot() {
        let oid = Oid::parse(".1.3.6.1.4.1.14832.1.4").unwrap();
        assert_eq!(oid, oid!(1, 3, 6, 1, 4, 1, 14832, 1, 4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Oid::parse("").is_err());
        assert!(Oid::parse(".").is_err());
        assert!(Oid::parse("1..3").is_err());
        assert!(Oid::parse("1.3.-6").is_err());
        assert!(Oid::parse("1.3.99999999999").is_err());
    }

    #[test]
    fn test_parse_too_long() {
        let s = vec!["1"; MAX_OID_LEN + 1].join(".");
        let err = Oid::parse(&s).unwrap_err();
        assert!(matches!(*err, Error::InvalidOid(_)));
    }

    #[test]
    fn test_display() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 6, 3, 10, 1, 2, 4]);
        assert_eq!(oid.to_string(), "1.3.6.1.6.3.10.1.2.4");
        assert_eq!(format!("{:?}", oid), "Oid(1.3.6.1.6.3.10.1.2.4)");
    }

    #[test]
    fn test_from_str() {
        let oid: Oid = "1.3.6.1.4.1.9.12.6.1.1".parse().unwrap();
        assert_eq!(oid.len(), 11);
    }
}
