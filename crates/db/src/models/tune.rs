//! Row structs for the `tunes` table.
//!
//! Rows carry plain strings for keys and time signature; conversion back
//! into the validated value types happens in [`TryFrom`], so a corrupt row
//! surfaces as a storage error instead of leaking an invalid value.

use sqlx::FromRow;
use tunebook_core::error::CoreError;
use tunebook_core::key::Key;
use tunebook_core::time_signature::TimeSignature;
use tunebook_core::tune::Tune;
use tunebook_core::types::{DbId, Timestamp};

/// A row from the `tunes` table.
#[derive(Debug, Clone, FromRow)]
pub struct TuneRow {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub styles: Vec<String>,
    pub keys: Vec<String>,
    pub time_signature: String,
    pub structure: String,
    pub has_lyrics: bool,
    pub version: i32,
}

/// A `tunes` row joined with its windowed total count, used by listings.
#[derive(Debug, Clone, FromRow)]
pub struct TuneListRow {
    pub total_records: i64,
    #[sqlx(flatten)]
    pub tune: TuneRow,
}

impl TryFrom<TuneRow> for Tune {
    type Error = CoreError;

    fn try_from(row: TuneRow) -> Result<Self, Self::Error> {
        let keys = row
            .keys
            .into_iter()
            .map(|k| {
                Key::parse(&k).map_err(|_| {
                    CoreError::StorageUnavailable(format!(
                        "tune {} holds unparseable key {k:?}",
                        row.id
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let time_signature = TimeSignature::parse(&row.time_signature).map_err(|_| {
            CoreError::StorageUnavailable(format!(
                "tune {} holds unparseable time signature {:?}",
                row.id, row.time_signature
            ))
        })?;

        Ok(Tune {
            id: row.id,
            created_at: row.created_at,
            title: row.title,
            styles: row.styles,
            keys,
            time_signature,
            structure: row.structure,
            has_lyrics: row.has_lyrics,
            version: row.version,
        })
    }
}
