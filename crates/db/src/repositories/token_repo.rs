//! Repository for the `tokens` table.
//!
//! Only hashes are stored; the plaintext in the returned [`Token`] exists
//! for the single response that delivers it to the client.

use chrono::Utc;
use sqlx::PgPool;
use tunebook_core::error::CoreError;
use tunebook_core::types::DbId;

use crate::models::Token;
use crate::with_deadline;

/// Provides persistence for bearer tokens.
pub struct TokenRepo;

impl TokenRepo {
    /// Persist a freshly generated token.
    pub async fn insert(pool: &PgPool, token: &Token) -> Result<(), CoreError> {
        with_deadline(
            sqlx::query(
                "INSERT INTO tokens (hash, user_id, expiry, scope) VALUES ($1, $2, $3, $4)",
            )
            .bind(&token.hash)
            .bind(token.user_id)
            .bind(token.expiry)
            .bind(token.scope)
            .execute(pool),
        )
        .await?;
        Ok(())
    }

    /// Invalidate every token a user holds for one scope. Used after
    /// activation and password changes so stale credentials stop working.
    pub async fn delete_all_for_user(
        pool: &PgPool,
        scope: &str,
        user_id: DbId,
    ) -> Result<(), CoreError> {
        with_deadline(
            sqlx::query("DELETE FROM tokens WHERE scope = $1 AND user_id = $2")
                .bind(scope)
                .bind(user_id)
                .execute(pool),
        )
        .await?;
        Ok(())
    }

    /// Remove expired rows. Called opportunistically; expiry is enforced at
    /// lookup time regardless.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, CoreError> {
        let result = with_deadline(
            sqlx::query("DELETE FROM tokens WHERE expiry <= $1")
                .bind(Utc::now())
                .execute(pool),
        )
        .await?;
        Ok(result.rows_affected())
    }
}
