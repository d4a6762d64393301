//! Repository for the `users` table.

use sqlx::PgPool;
use tunebook_core::error::CoreError;
use tunebook_core::types::DbId;

use crate::models::User;
use crate::with_deadline;

/// Column list for `users` queries.
const COLUMNS: &str = "id, created_at, name, email, password_hash, activated";

/// Unique constraint on `users.email`, named in the migration.
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new, unactivated user.
    ///
    /// A duplicate email surfaces as a field-level validation error rather
    /// than a bare constraint violation.
    pub async fn insert(
        pool: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, CoreError> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, activated) \
             VALUES ($1, $2, $3, false) \
             RETURNING {COLUMNS}"
        );
        let result = with_deadline(
            sqlx::query_as::<_, User>(&query)
                .bind(name)
                .bind(email)
                .bind(password_hash)
                .fetch_one(pool),
        )
        .await;

        match result {
            Err(CoreError::StorageUnavailable(detail))
                if detail.contains(EMAIL_CONSTRAINT) =>
            {
                Err(CoreError::validation_field(
                    "email",
                    "a user with this email address already exists",
                ))
            }
            other => other,
        }
    }

    /// Fetch a user by email address.
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<User, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        with_deadline(
            sqlx::query_as::<_, User>(&query)
                .bind(email)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(CoreError::NotFound)
    }

    /// Resolve the user owning an unexpired token with the given hash and
    /// scope. A miss means the token is invalid, expired, or of the wrong
    /// scope; callers must not distinguish which.
    pub async fn get_for_token(
        pool: &PgPool,
        token_hash: &str,
        scope: &str,
    ) -> Result<Option<User>, CoreError> {
        let query = "SELECT users.id, users.created_at, users.name, users.email, \
                     users.password_hash, users.activated \
                     FROM users \
                     INNER JOIN tokens ON tokens.user_id = users.id \
                     WHERE tokens.hash = $1 AND tokens.scope = $2 AND tokens.expiry > now()";
        with_deadline(
            sqlx::query_as::<_, User>(query)
                .bind(token_hash)
                .bind(scope)
                .fetch_optional(pool),
        )
        .await
    }

    /// Mark a user account as activated. Updating a row that no longer
    /// exists is NotFound, not a silent success.
    pub async fn activate(pool: &PgPool, user_id: DbId) -> Result<(), CoreError> {
        let result = with_deadline(
            sqlx::query("UPDATE users SET activated = true WHERE id = $1")
                .bind(user_id)
                .execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }

    /// Replace a user's password hash.
    pub async fn update_password(
        pool: &PgPool,
        user_id: DbId,
        password_hash: &str,
    ) -> Result<(), CoreError> {
        let result = with_deadline(
            sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }
}
