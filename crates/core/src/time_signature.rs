//! Time signature value type.
//!
//! A [`TimeSignature`] is two integers separated by a slash, e.g. `"4/4"`
//! or `"6/8"`. Like [`crate::key::Key`], instances only exist through the
//! validating factory.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not parse as a time signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time signature format")]
pub struct InvalidTimeSignature;

/// A validated `"N/M"` time signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSignature(String);

impl TimeSignature {
    /// Parse and validate a time signature string.
    ///
    /// Requires exactly two `/`-separated parts, both plain integers, and an
    /// overall length of 3–5 characters.
    pub fn parse(value: &str) -> Result<Self, InvalidTimeSignature> {
        if !(3..=5).contains(&value.len()) {
            return Err(InvalidTimeSignature);
        }

        let mut parts = value.split('/');
        let (beats, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(beats), Some(unit), None) => (beats, unit),
            _ => return Err(InvalidTimeSignature),
        };

        if beats.parse::<u32>().is_err() || unit.parse::<u32>().is_err() {
            return Err(InvalidTimeSignature);
        }

        Ok(TimeSignature(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = InvalidTimeSignature;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeSignature::parse(&value)
    }
}

impl From<TimeSignature> for String {
    fn from(ts: TimeSignature) -> String {
        ts.0
    }
}
