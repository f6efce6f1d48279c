//! Serde helpers for preset names.
//!
//! Names are stored on the instrument as 16 Latin-1 bytes. Every byte maps to the Unicode code
//! point of the same value, so decoding never fails and encoding only fails for characters the
//! instrument cannot display.

use serde::{Deserialize, Deserializer};

use crate::bank::NAME_LEN;

pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encodes `name` into exactly [`NAME_LEN`] bytes, space padded. Characters outside Latin-1
/// become `?`, extra characters are dropped.
pub fn latin1_encode(name: &str) -> [u8; NAME_LEN] {
    let mut out = [b' '; NAME_LEN];
    for (slot, c) in out.iter_mut().zip(name.chars()) {
        *slot = u8::try_from(u32::from(c)).unwrap_or(b'?');
    }
    out
}

/// `#[serde(deserialize_with = "latin1_name")]`: accepts a name only if the instrument can
/// store it unchanged.
pub fn latin1_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = String::deserialize(deserializer)?;
    if let Some(c) = name.chars().find(|&c| u32::from(c) > 0xFF) {
        return Err(serde::de::Error::custom(format!("'{}' in \"{}\" has no Latin-1 encoding", c, name)));
    }
    if name.chars().count() > NAME_LEN {
        return Err(serde::de::Error::custom(format!("\"{}\" is longer than {} characters", name, NAME_LEN)));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct Named {
        #[serde(deserialize_with = "latin1_name")]
        name: String,
    }

    #[test]
    fn test_decode_keeps_high_bytes() {
        assert_eq!(latin1_decode(b"Caf\xe9 Piano"), "Café Piano");
    }

    #[test]
    fn test_encode_pads_and_replaces() {
        assert_eq!(&latin1_encode("Café"), b"Caf\xe9            ");
        assert_eq!(&latin1_encode("A\u{263A}"), b"A?              ");
        assert_eq!(&latin1_encode("ABCDEFGHIJKLMNOPQRS"), b"ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn test_name_field() {
        let ok: Named = serde_json::from_str(r#"{"name": "Café Piano      "}"#).unwrap();
        assert_eq!(ok.name, "Café Piano      ");
        assert!(serde_json::from_str::<Named>(r#"{"name": "☺"}"#).is_err());
        assert!(serde_json::from_str::<Named>(r#"{"name": "12345678901234567"}"#).is_err());
    }
}
