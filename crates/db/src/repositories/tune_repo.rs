//! Repository for the `tunes` table: the versioned resource store.
//!
//! Updates are conditional on the caller's version (`WHERE id = $n AND
//! version = $m`), which is the sole optimistic-concurrency enforcement
//! point. Listing builds a single query whose filter clauses are vacuous
//! when their input is empty, ordered by a safelisted column with `id` as
//! tie-break, with a windowed `COUNT(*) OVER()` so the total and the page
//! come from one execution.

use sqlx::PgPool;
use tunebook_core::error::CoreError;
use tunebook_core::filters::{Filters, Metadata};
use tunebook_core::tune::{NewTune, Tune};
use tunebook_core::types::DbId;

use crate::models::tune::{TuneListRow, TuneRow};
use crate::with_deadline;

/// Column list for `tunes` queries.
const COLUMNS: &str =
    "id, created_at, title, styles, keys, time_signature, structure, has_lyrics, version";

/// Provides CRUD and filtered listing over tunes.
pub struct TuneRepo;

impl TuneRepo {
    /// Insert a new tune. Storage assigns the id and creation timestamp;
    /// the version starts at 1.
    ///
    /// The candidate must already be validated; this only runs the write.
    pub async fn insert(pool: &PgPool, input: &NewTune) -> Result<Tune, CoreError> {
        let keys: Vec<String> = input.keys.iter().map(|k| k.as_str().to_string()).collect();

        let query = format!(
            "INSERT INTO tunes (title, styles, keys, time_signature, structure, has_lyrics) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = with_deadline(
            sqlx::query_as::<_, TuneRow>(&query)
                .bind(&input.title)
                .bind(&input.styles)
                .bind(&keys)
                .bind(input.time_signature.as_str())
                .bind(&input.structure)
                .bind(input.has_lyrics)
                .fetch_one(pool),
        )
        .await?;

        row.try_into()
    }

    /// Fetch a tune by id. Non-positive ids are rejected without a storage
    /// round trip.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Tune, CoreError> {
        if id < 1 {
            return Err(CoreError::NotFound);
        }

        let query = format!("SELECT {COLUMNS} FROM tunes WHERE id = $1");
        let row = with_deadline(
            sqlx::query_as::<_, TuneRow>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(CoreError::NotFound)?;

        row.try_into()
    }

    /// Conditionally update a tune, returning it with its new version.
    ///
    /// The write only applies when the stored version still equals
    /// `tune.version`; zero matched rows means the version moved under the
    /// caller and surfaces as [`CoreError::EditConflict`]. The store never
    /// silently overwrites.
    pub async fn update(pool: &PgPool, tune: &Tune) -> Result<Tune, CoreError> {
        let keys: Vec<String> = tune.keys.iter().map(|k| k.as_str().to_string()).collect();

        let query = format!(
            "UPDATE tunes \
             SET title = $1, styles = $2, keys = $3, time_signature = $4, \
                 structure = $5, has_lyrics = $6, version = version + 1 \
             WHERE id = $7 AND version = $8 \
             RETURNING {COLUMNS}"
        );
        let row = with_deadline(
            sqlx::query_as::<_, TuneRow>(&query)
                .bind(&tune.title)
                .bind(&tune.styles)
                .bind(&keys)
                .bind(tune.time_signature.as_str())
                .bind(&tune.structure)
                .bind(tune.has_lyrics)
                .bind(tune.id)
                .bind(tune.version)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(CoreError::EditConflict)?;

        row.try_into()
    }

    /// Delete a tune by id. Deleting a nonexistent id is NotFound, not a
    /// silent success.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), CoreError> {
        if id < 1 {
            return Err(CoreError::NotFound);
        }

        let result = with_deadline(
            sqlx::query("DELETE FROM tunes WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound);
        }
        Ok(())
    }

    /// List tunes matching `filters`, returning one page plus metadata.
    ///
    /// Each clause is written so an empty filter input matches everything:
    /// the full-text title match is vacuous for an empty query string, the
    /// `@>` containment checks are vacuous for empty arrays, the equality
    /// checks for empty strings, and the lyrics check for a NULL parameter.
    /// Only the ORDER BY column and direction are interpolated, and both
    /// come from the validated safelist.
    pub async fn list(
        pool: &PgPool,
        filters: &Filters,
    ) -> Result<(Vec<Tune>, Metadata), CoreError> {
        // The safelist check in Filters::validate runs before this, but no
        // query is built from an unvalidated sort value either way.
        let sort_column = filters
            .sort_column()
            .ok_or_else(|| CoreError::validation_field("sort", "invalid sort value"))?;
        let sort_direction = filters.sort_direction();

        let query = format!(
            "SELECT COUNT(*) OVER() AS total_records, {COLUMNS} \
             FROM tunes \
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
             AND (styles @> $2 OR $2 = '{{}}') \
             AND (keys @> $3 OR $3 = '{{}}') \
             AND (time_signature = $4 OR $4 = '') \
             AND (structure = $5 OR $5 = '') \
             AND ($6::boolean IS NULL OR has_lyrics = $6) \
             ORDER BY {sort_column} {sort_direction}, id ASC \
             LIMIT $7 OFFSET $8"
        );
        let rows = with_deadline(
            sqlx::query_as::<_, TuneListRow>(&query)
                .bind(&filters.title)
                .bind(&filters.styles)
                .bind(&filters.keys)
                .bind(&filters.time_signature)
                .bind(&filters.structure)
                .bind(filters.has_lyrics)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(pool),
        )
        .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        let tunes = rows
            .into_iter()
            .map(|row| row.tune.try_into())
            .collect::<Result<Vec<Tune>, _>>()?;

        let metadata = Metadata::calculate(total_records, filters.page, filters.page_size);
        Ok((tunes, metadata))
    }
}
