//! Field-error collecting validator.
//!
//! Handlers run every rule for an entity through one [`Validator`] so a 422
//! response reports all violated fields at once, not just the first.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{CoreError, FieldErrors};

/// Accumulates field-level validation failures.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no rule has failed so far.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure for `field` unless one is already recorded.
    ///
    /// The first message per field wins, matching the order rules are
    /// declared in.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record a failure for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Consume the validator: `Ok(())` when clean, otherwise
    /// [`CoreError::Validation`] carrying every recorded field.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.errors))
        }
    }
}

/// True when every element of `values` is distinct.
pub fn all_unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}
