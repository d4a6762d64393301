//! Well-known permission code constants.
//!
//! These must match the seed data in
//! `crates/db/migrations/20260301000004_create_permissions_tables.sql`.
//! A permission grants exactly the code it names; there is no hierarchy
//! or wildcard matching.

pub const PERMISSION_TUNES_READ: &str = "tunes:read";
pub const PERMISSION_TUNES_WRITE: &str = "tunes:write";
