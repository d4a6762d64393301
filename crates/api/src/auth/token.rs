//! Opaque bearer token generation and hashing.
//!
//! Token plaintexts are random UUID v4 strings sent to the client exactly
//! once; only their SHA-256 hex digest is persisted, so a database leak
//! does not compromise active credentials. Every lookup is by digest.

use chrono::Utc;
use sha2::{Digest, Sha256};
use tunebook_core::types::DbId;
use tunebook_db::models::Token;
use uuid::Uuid;

/// Generate a new token for `user_id` with the given lifetime and scope.
///
/// The returned [`Token`] carries both the plaintext (for the response that
/// delivers it) and the hash (for storage).
pub fn generate_token(user_id: DbId, ttl: chrono::Duration, scope: &'static str) -> Token {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_token(&plaintext);
    Token {
        plaintext,
        hash,
        user_id,
        expiry: Utc::now() + ttl,
        scope,
    }
}

/// Compute the SHA-256 hex digest of a token plaintext.
///
/// Deterministic: used both when storing a new token and when looking up an
/// incoming bearer value.
pub fn hash_token(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use tunebook_db::models::token::SCOPE_AUTHENTICATION;

    use super::*;

    #[test]
    fn hash_is_stable_and_hex() {
        let token = generate_token(1, chrono::Duration::hours(24), SCOPE_AUTHENTICATION);

        // Re-hashing the same plaintext must produce the stored digest.
        assert_eq!(hash_token(&token.plaintext), token.hash);

        // SHA-256 hex is 64 characters.
        assert_eq!(token.hash.len(), 64);
        assert!(token.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique_and_expiry_is_future() {
        let a = generate_token(1, chrono::Duration::hours(24), SCOPE_AUTHENTICATION);
        let b = generate_token(1, chrono::Duration::hours(24), SCOPE_AUTHENTICATION);
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.hash, b.hash);
        assert!(a.expiry > Utc::now());
    }
}
