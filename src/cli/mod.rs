//! Command-line support for the `usmkey` tool.
//!
//! Enabled with the `cli` feature.

pub mod args;

use args::Command;

use crate::KeyTools;
use crate::error::{Error, Result};
use crate::format::hex;

/// Run one subcommand, returning the hex string to print.
pub fn run(tools: &KeyTools, command: &Command) -> Result<String> {
    match command {
        Command::Ku { hash, passphrase } => {
            let ku = tools.derive_master_key(hash.hash, passphrase.as_bytes())?;
            Ok(hex::encode(ku.as_bytes()))
        }
        Command::Kul {
            hash,
            engine_id,
            passphrase,
            master_key,
        } => {
            let kul = match (passphrase, master_key) {
                (_, Some(key)) => {
                    let ku = crate::MasterKey::from_bytes(hash.hash, key.as_bytes())?;
                    tools.localize(&ku, engine_id.as_bytes())?
                }
                (Some(passphrase), None) => tools.localize_passphrase(
                    hash.hash,
                    passphrase.as_bytes(),
                    engine_id.as_bytes(),
                )?,
                (None, None) => {
                    return Err(Error::InvalidArgument("passphrase or master key required").boxed());
                }
            };
            Ok(hex::encode(kul.as_bytes()))
        }
        Command::PrivKey {
            hash,
            privacy,
            engine_id,
            passphrase,
        } => {
            let key = tools.derive_privacy_key(
                hash.hash,
                privacy,
                passphrase.as_bytes(),
                engine_id.as_bytes(),
            )?;
            Ok(hex::encode(key.as_bytes()))
        }
        Command::EncodeKeychange {
            hash,
            engine_id,
            old_passphrase,
            new_passphrase,
            old_key,
            new_key,
        } => {
            let old = resolve_key(tools, hash.hash, engine_id, old_passphrase, old_key)?;
            let new = resolve_key(tools, hash.hash, engine_id, new_passphrase, new_key)?;
            let kc = tools.encode_key_change(hash.hash, &old[..], &new[..])?;
            Ok(hex::encode(kc.as_bytes()))
        }
        Command::DecodeKeychange {
            hash,
            old_key,
            keychange,
        } => {
            let key = tools.decode_key_change(hash.hash, old_key.as_bytes(), keychange.as_bytes())?;
            Ok(hex::encode(key.as_bytes()))
        }
    }
}

/// A localized key given directly, or derived from a passphrase.
fn resolve_key(
    tools: &KeyTools,
    hash: crate::HashAlgorithm,
    engine_id: &Option<args::HexBytes>,
    passphrase: &Option<String>,
    key: &Option<args::HexBytes>,
) -> Result<zeroize::Zeroizing<Vec<u8>>> {
    if let Some(key) = key {
        return Ok(zeroize::Zeroizing::new(key.as_bytes().to_vec()));
    }
    let passphrase = passphrase
        .as_ref()
        .ok_or_else(|| Error::InvalidArgument("passphrase or key required").boxed())?;
    let engine_id = engine_id
        .as_ref()
        .ok_or_else(|| Error::InvalidArgument("engine ID (-e) required with passphrases").boxed())?;
    let kul = tools.localize_passphrase(hash, passphrase.as_bytes(), engine_id.as_bytes())?;
    Ok(zeroize::Zeroizing::new(kul.as_bytes().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::args::{HashArgs, HexBytes};
    use super::*;
    use crate::HashAlgorithm;

    fn engine() -> HexBytes {
        "000000000000000000000002".parse().unwrap()
    }

    #[test]
    fn test_run_ku() {
        let out = run(
            &KeyTools::default(),
            &Command::Ku {
                hash: HashArgs {
                    hash: HashAlgorithm::Md5,
                },
                passphrase: "maplesyrup".into(),
            },
        )
        .unwrap();
        assert_eq!(out, "9faf3283884e92834ebc9847d8edd963");
    }

    #[test]
    fn test_run_kul_from_master_key() {
        let out = run(
            &KeyTools::default(),
            &Command::Kul {
                hash: HashArgs {
                    hash: HashAlgorithm::Md5,
                },
                engine_id: engine(),
                passphrase: None,
                master_key: Some("9faf3283884e92834ebc9847d8edd963".parse().unwrap()),
            },
        )
        .unwrap();
        assert_eq!(out, "526f5eed9fcce26f8964c2930787d82b");
    }

    #[test]
    fn test_run_keychange_round_trip() {
        let tools = KeyTools::default();
        let encoded = run(
            &tools,
            &Command::EncodeKeychange {
                hash: HashArgs {
                    hash: HashAlgorithm::Md5,
                },
                engine_id: Some(engine()),
                old_passphrase: Some("maplesyrup".into()),
                new_passphrase: Some("newsyrup".into()),
                old_key: None,
                new_key: None,
            },
        )
        .unwrap();
        assert_eq!(encoded.len(), 64);

        let decoded = run(
            &tools,
            &Command::DecodeKeychange {
                hash: HashArgs {
                    hash: HashAlgorithm::Md5,
                },
                old_key: "526f5eed9fcce26f8964c2930787d82b".parse().unwrap(),
                keychange: encoded.parse().unwrap(),
            },
        )
        .unwrap();
        assert_eq!(decoded, "87021d7bd9d101ba05ea6e3bf9d9bd4a");
    }

    #[test]
    fn test_run_keychange_needs_engine_for_passphrase() {
        let err = run(
            &KeyTools::default(),
            &Command::EncodeKeychange {
                hash: HashArgs {
                    hash: HashAlgorithm::Md5,
                },
                engine_id: None,
                old_passphrase: Some("maplesyrup".into()),
                new_passphrase: Some("newsyrup".into()),
                old_key: None,
                new_key: None,
            },
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidArgument(_)));
    }
}
