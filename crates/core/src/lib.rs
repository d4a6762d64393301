//! Tunebook domain core.
//!
//! Pure domain types shared by the database and API crates: the error
//! taxonomy, validated value types ([`key::Key`], [`time_signature::TimeSignature`]),
//! the [`tune::Tune`] entity, listing filters/metadata, and permission codes.
//! No I/O happens here.

pub mod error;
pub mod filters;
pub mod key;
pub mod permissions;
pub mod time_signature;
pub mod tune;
pub mod types;
pub mod validation;
