//! Formatting utilities.
//!
//! The [`hex`] module provides hexadecimal encoding and decoding for key
//! material and engine IDs.
//!
//! ```
//! use snmp_usm_keys::format::hex;
//!
//! assert_eq!(hex::encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
//!
//! // Lazy formatting for logging
//! let engine_id = [0x80, 0x00, 0x1f, 0x88];
//! println!("{}", hex::Bytes(&engine_id)); // prints: 80001f88
//! ```

pub mod hex;
