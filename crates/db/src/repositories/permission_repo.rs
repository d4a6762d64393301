//! Repository for the permissions many-to-many relationship.

use sqlx::PgPool;
use tunebook_core::error::CoreError;
use tunebook_core::types::DbId;

use crate::with_deadline;

/// Read/grant access to per-user permission codes.
pub struct PermissionRepo;

impl PermissionRepo {
    /// All permission codes held by a user. Read-only from the gatekeeping
    /// layer's perspective.
    pub async fn get_all_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<String>, CoreError> {
        let rows: Vec<(String,)> = with_deadline(
            sqlx::query_as(
                "SELECT permissions.code FROM permissions \
                 INNER JOIN users_permissions ON users_permissions.permission_id = permissions.id \
                 WHERE users_permissions.user_id = $1",
            )
            .bind(user_id)
            .fetch_all(pool),
        )
        .await?;
        Ok(rows.into_iter().map(|(code,)| code).collect())
    }

    /// Grant the named permission codes to a user.
    pub async fn add_for_user(
        pool: &PgPool,
        user_id: DbId,
        codes: &[&str],
    ) -> Result<(), CoreError> {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        with_deadline(
            sqlx::query(
                "INSERT INTO users_permissions (user_id, permission_id) \
                 SELECT $1, permissions.id FROM permissions WHERE permissions.code = ANY($2)",
            )
            .bind(user_id)
            .bind(&codes)
            .execute(pool),
        )
        .await?;
        Ok(())
    }
}
