//! PostgreSQL persistence layer for the tunebook API.
//!
//! Pool construction, migrations, the uniform query deadline, and the
//! sqlx-error → domain-error mapping live here; the actual queries are in
//! [`repositories`].

pub mod models;
pub mod repositories;

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tunebook_core::error::CoreError;

/// Convenience alias so downstream crates do not name sqlx types directly.
pub type DbPool = PgPool;

/// Maximum number of pooled connections.
const MAX_CONNECTIONS: u32 = 25;

/// How long to wait for a free connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Uniform deadline applied to every query in this crate. A query that runs
/// longer fails with [`CoreError::Timeout`] instead of hanging its worker.
const QUERY_DEADLINE: Duration = Duration::from_secs(3);

/// Create the connection pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Run a query future under the uniform [`QUERY_DEADLINE`], mapping sqlx
/// failures into the domain taxonomy.
pub(crate) async fn with_deadline<T, F>(fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_DEADLINE, fut).await {
        Ok(result) => result.map_err(map_sqlx_error),
        Err(_) => Err(CoreError::Timeout),
    }
}

/// Map a sqlx error into the domain taxonomy.
///
/// `RowNotFound` becomes [`CoreError::NotFound`]; everything else is a
/// storage failure whose detail stays server-side.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::RowNotFound => CoreError::NotFound,
        other => {
            tracing::error!(error = %other, "database error");
            CoreError::StorageUnavailable(other.to_string())
        }
    }
}
