//! Musical key value type.
//!
//! A [`Key`] is a tonic (A–G, optional `b`/`#` accidental) followed by a
//! mode, e.g. `"G dorian"` or `"Bb major"`. Instances can only be built
//! through the validating [`Key::parse`] factory, so an invalid key is
//! unrepresentable once it crosses this boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Modes accepted after the tonic.
const VALID_MODES: [&str; 7] = [
    "major",
    "minor",
    "dorian",
    "phrygian",
    "lydian",
    "mixolydian",
    "locrian",
];

/// Error returned when a string does not parse as a musical key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid key format")]
pub struct InvalidKey;

/// A validated musical key, stored in its canonical `"tonic mode"` spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(String);

impl Key {
    /// Parse and validate a key string.
    ///
    /// Accepts exactly two space-separated parts: a tonic of one or two
    /// characters (`A`–`G`, optionally followed by `b` or `#`) and a mode
    /// from the seven diatonic modes.
    pub fn parse(value: &str) -> Result<Self, InvalidKey> {
        let mut parts = value.split(' ');
        let (tonic, mode) = match (parts.next(), parts.next(), parts.next()) {
            (Some(tonic), Some(mode), None) => (tonic, mode),
            _ => return Err(InvalidKey),
        };

        let mut tonic_chars = tonic.chars();
        match tonic_chars.next() {
            Some(c) if ('A'..='G').contains(&c) => {}
            _ => return Err(InvalidKey),
        }
        match tonic_chars.next() {
            None => {}
            Some('b') | Some('#') => {
                if tonic_chars.next().is_some() {
                    return Err(InvalidKey);
                }
            }
            Some(_) => return Err(InvalidKey),
        }

        if !VALID_MODES.contains(&mode) {
            return Err(InvalidKey);
        }

        Ok(Key(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Key {
    type Error = InvalidKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::parse(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> String {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_tonics_and_modes() {
        for value in ["A major", "G dorian", "C mixolydian", "F locrian"] {
            assert!(Key::parse(value).is_ok(), "{value} should parse");
        }
    }

    #[test]
    fn accepts_accidentals() {
        assert!(Key::parse("Gb minor").is_ok());
        assert!(Key::parse("F# lydian").is_ok());
    }

    #[test]
    fn rejects_invalid_tonic() {
        // H is not a tonic in this grammar.
        assert_eq!(Key::parse("H major"), Err(InvalidKey));
        assert_eq!(Key::parse("g major"), Err(InvalidKey));
    }

    #[test]
    fn rejects_malformed_accidental() {
        // Tonic longer than two characters.
        assert_eq!(Key::parse("G#x minor"), Err(InvalidKey));
        // Second character must be b or #.
        assert_eq!(Key::parse("Gm minor"), Err(InvalidKey));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert_eq!(Key::parse("G blues"), Err(InvalidKey));
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert_eq!(Key::parse("G"), Err(InvalidKey));
        assert_eq!(Key::parse("G dorian extra"), Err(InvalidKey));
        assert_eq!(Key::parse(""), Err(InvalidKey));
    }

    #[test]
    fn serde_round_trip() {
        let key: Key = serde_json::from_str("\"G dorian\"").unwrap();
        assert_eq!(key.as_str(), "G dorian");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"G dorian\"");

        let bad: Result<Key, _> = serde_json::from_str("\"H major\"");
        assert!(bad.is_err());
    }
}
