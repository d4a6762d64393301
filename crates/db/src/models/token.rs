//! Bearer token model and scope constants.
//!
//! The plaintext value is returned to the client exactly once; only its
//! SHA-256 hex digest is stored, and every lookup is by digest.

use serde::Serialize;
use tunebook_core::types::{DbId, Timestamp};

/// Token scope: a login credential.
pub const SCOPE_AUTHENTICATION: &str = "authentication";
/// Token scope: proves ownership of a registered email address.
pub const SCOPE_ACTIVATION: &str = "activation";
/// Token scope: authorizes a password change.
pub const SCOPE_PASSWORD_RESET: &str = "password-reset";

/// A freshly issued token. Existing rows are never read back into this
/// shape -- the plaintext is gone once the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    /// The opaque value handed to the client.
    #[serde(rename = "token")]
    pub plaintext: String,
    #[serde(skip_serializing)]
    pub hash: String,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub expiry: Timestamp,
    #[serde(skip_serializing)]
    pub scope: &'static str,
}
