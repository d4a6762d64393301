//! The `Tune` entity and its validation rules.

use serde::{Deserialize, Serialize};

use crate::key::Key;
use crate::time_signature::TimeSignature;
use crate::types::{DbId, Timestamp};
use crate::validation::{all_unique, Validator};

/// Maximum title length in bytes.
const MAX_TITLE_BYTES: usize = 500;

/// Bounds on the number of styles per tune.
const MIN_STYLES: usize = 1;
const MAX_STYLES: usize = 5;

/// Bounds on the number of keys per tune.
const MIN_KEYS: usize = 1;
const MAX_KEYS: usize = 10;

/// A tune in the catalog.
///
/// `version` starts at 1 and is incremented by exactly 1 on every
/// successful update; it is the optimistic-concurrency token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tune {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub styles: Vec<String>,
    pub keys: Vec<Key>,
    pub time_signature: TimeSignature,
    pub structure: String,
    pub has_lyrics: bool,
    pub version: i32,
}

/// A candidate tune before storage has assigned id, creation timestamp,
/// and version.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTune {
    pub title: String,
    pub styles: Vec<String>,
    pub keys: Vec<Key>,
    pub time_signature: TimeSignature,
    pub structure: String,
    #[serde(default)]
    pub has_lyrics: bool,
}

impl NewTune {
    /// Run every field rule, recording all violations.
    pub fn validate(&self, v: &mut Validator) {
        validate_fields(
            v,
            &self.title,
            &self.styles,
            &self.keys,
            &self.structure,
        );
    }
}

impl Tune {
    /// Same rules as [`NewTune::validate`], applied before an update.
    pub fn validate(&self, v: &mut Validator) {
        validate_fields(v, &self.title, &self.styles, &self.keys, &self.structure);
    }
}

/// Shared field rules for insert and update candidates.
///
/// `time_signature` and the individual `keys` are already structurally valid
/// by construction; only counts, uniqueness, and plain-string rules remain.
fn validate_fields(
    v: &mut Validator,
    title: &str,
    styles: &[String],
    keys: &[Key],
    structure: &str,
) {
    v.check(!title.is_empty(), "title", "must be provided");
    v.check(
        title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(styles.len() >= MIN_STYLES, "styles", "must contain at least 1 style");
    v.check(
        styles.len() <= MAX_STYLES,
        "styles",
        "must not contain more than 5 styles",
    );
    v.check(all_unique(styles), "styles", "must not contain duplicate values");

    v.check(keys.len() >= MIN_KEYS, "keys", "must contain at least 1 key");
    v.check(keys.len() <= MAX_KEYS, "keys", "must not contain more than 10 keys");
    v.check(all_unique(keys), "keys", "must not contain duplicate values");

    v.check(!structure.is_empty(), "structure", "must be provided");
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::CoreError;

    use super::*;

    fn valid_candidate() -> NewTune {
        NewTune {
            title: "Red Haired Boy".to_string(),
            styles: vec!["Bluegrass".to_string(), "Old Time".to_string()],
            keys: vec![Key::parse("A major").unwrap()],
            time_signature: TimeSignature::parse("4/4").unwrap(),
            structure: "AABB".to_string(),
            has_lyrics: false,
        }
    }

    fn errors_of(candidate: &NewTune) -> crate::error::FieldErrors {
        let mut v = Validator::new();
        candidate.validate(&mut v);
        match v.into_result() {
            Ok(()) => Default::default(),
            Err(CoreError::Validation(fields)) => fields,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_tune_passes() {
        assert!(errors_of(&valid_candidate()).is_empty());
    }

    #[test]
    fn empty_title_and_structure_fail_together() {
        let mut candidate = valid_candidate();
        candidate.title = String::new();
        candidate.structure = String::new();

        let errors = errors_of(&candidate);
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("structure"));
    }

    #[test]
    fn title_over_500_bytes_fails() {
        let mut candidate = valid_candidate();
        candidate.title = "x".repeat(501);
        assert_eq!(
            errors_of(&candidate)["title"],
            "must not be more than 500 bytes long"
        );
    }

    #[test]
    fn style_count_bounds() {
        let mut candidate = valid_candidate();
        candidate.styles = vec![];
        assert!(errors_of(&candidate).contains_key("styles"));

        candidate.styles = (0..6).map(|i| format!("style-{i}")).collect();
        assert!(errors_of(&candidate).contains_key("styles"));
    }

    #[test]
    fn duplicate_styles_fail() {
        let mut candidate = valid_candidate();
        candidate.styles = vec!["Irish".to_string(), "Irish".to_string()];
        assert_eq!(
            errors_of(&candidate)["styles"],
            "must not contain duplicate values"
        );
    }

    #[test]
    fn key_count_bounds_and_duplicates() {
        let mut candidate = valid_candidate();
        candidate.keys = vec![];
        assert!(errors_of(&candidate).contains_key("keys"));

        let key = Key::parse("G dorian").unwrap();
        candidate.keys = vec![key.clone(), key];
        assert_eq!(
            errors_of(&candidate)["keys"],
            "must not contain duplicate values"
        );
    }

    #[test]
    fn validation_reports_every_field() {
        let mut candidate = valid_candidate();
        candidate.title = String::new();
        candidate.styles = vec![];
        candidate.keys = vec![];
        candidate.structure = String::new();

        let mut v = Validator::new();
        candidate.validate(&mut v);
        assert_matches!(v.into_result(), Err(CoreError::Validation(fields)) => {
            assert_eq!(fields.len(), 4);
        });
    }
}
