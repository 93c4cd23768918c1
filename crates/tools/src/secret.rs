//! Opaque signing credentials.
//!
//! A [`PrivateKey`] never exposes its raw value through `Debug`, `Display`,
//! or serialization; the signing component asks for it explicitly via
//! [`PrivateKey::reveal`].

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::ConfigError;

/// Hex digits in a secp256k1 private key.
const KEY_HEX_LEN: usize = 64;

/// A validated, `0x`-prefixed signing key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Parse a key from its hex form, with or without a `0x` prefix.
    ///
    /// The stored form is normalized to lowercase with the prefix, which is
    /// the shape the deployment framework expects in its account lists.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let hex = raw.strip_prefix("0x").unwrap_or(raw);

        if hex.len() != KEY_HEX_LEN {
            return Err(ConfigError::InvalidFormat {
                field: "private key".to_string(),
                reason: format!("expected {} hex digits, got {}", KEY_HEX_LEN, hex.len()),
            });
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidFormat {
                field: "private key".to_string(),
                reason: "contains non-hex characters".to_string(),
            });
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// The raw `0x`-prefixed key, for handing to the signer.
    pub fn reveal(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> String {
        format!("0x****{}", &self.0[self.0.len() - 4..])
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({})", self.redacted())
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef";

    #[test]
    fn test_parse_bare_hex() {
        let key = PrivateKey::parse(KEY).unwrap();
        assert_eq!(key.reveal(), format!("0x{}", KEY));
    }

    #[test]
    fn test_parse_prefixed_hex() {
        let key = PrivateKey::parse(&format!("0x{}", KEY)).unwrap();
        assert_eq!(key.reveal(), format!("0x{}", KEY));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let key = PrivateKey::parse(&KEY.to_uppercase()).unwrap();
        assert_eq!(key.reveal(), format!("0x{}", KEY));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let bad = format!("zz{}", &KEY[2..]);
        assert!(matches!(
            PrivateKey::parse(&bad),
            Err(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            PrivateKey::parse("deadbeef"),
            Err(ConfigError::InvalidFormat { .. })
        ));
        assert!(matches!(
            PrivateKey::parse(""),
            Err(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_debug_and_display_are_redacted() {
        let key = PrivateKey::parse(KEY).unwrap();
        let debug = format!("{:?}", key);
        let display = format!("{}", key);
        assert!(!debug.contains(KEY));
        assert!(!display.contains(KEY));
        assert!(display.ends_with("beef"));
    }

    #[test]
    fn test_serialize_is_redacted() {
        let key = PrivateKey::parse(KEY).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert!(!json.contains(KEY));
        assert!(json.contains("0x****"));
    }
}
