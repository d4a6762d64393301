//! Shared primitive type aliases.

/// Database primary-key type (`BIGSERIAL` / `i64`).
pub type DbId = i64;

/// UTC timestamp type used across all entities.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
