//! User entity model and the resolved request identity.

use serde::Serialize;
use sqlx::FromRow;
use tunebook_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub created_at: Timestamp,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub activated: bool,
}

/// The caller identity resolved from the `Authorization` header.
///
/// `Anonymous` is a sentinel for requests carrying no credential; it is
/// never persisted and holds no privileges.
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Known(User),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}
