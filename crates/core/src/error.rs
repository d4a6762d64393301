//! Domain-level error taxonomy.
//!
//! Every failure the core can produce is one of these variants. The API crate
//! maps them onto HTTP statuses; nothing below the HTTP boundary knows about
//! status codes.

use std::collections::BTreeMap;

/// Field name → human-readable message, as returned in 422 responses.
///
/// `BTreeMap` keeps the serialized order deterministic.
pub type FieldErrors = BTreeMap<String, String>;

/// Domain error for the tunebook core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// A conditional write matched zero rows: the record's version moved
    /// under the caller. The caller must re-fetch and retry.
    #[error("edit conflict")]
    EditConflict,

    /// One or more fields failed validation. Carries every violated field,
    /// not just the first.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// The client exceeded its request budget.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Missing, malformed, invalid, or expired credentials.
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed (covers "account not activated" and
    /// "missing permission").
    #[error("{0}")]
    Forbidden(String),

    /// A storage call exceeded its deadline.
    #[error("storage operation timed out")]
    Timeout,

    /// The storage layer failed in a way the caller cannot recover from.
    /// The message is for logs only and is never sent to clients.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CoreError {
    /// Build a validation error for a single field.
    pub fn validation_field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        CoreError::Validation(errors)
    }
}
