//! Credential primitives: password hashing and opaque bearer tokens.

pub mod password;
pub mod token;
