//! Handlers for the `/tunes` resource.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::Deserialize;
use tunebook_core::key::Key;
use tunebook_core::time_signature::TimeSignature;
use tunebook_core::tune::{NewTune, Tune};
use tunebook_core::types::DbId;
use tunebook_core::validation::Validator;
use tunebook_db::repositories::TuneRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::permissions::{RequireTunesRead, RequireTunesWrite};
use crate::query::ListTunesParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Partial update payload for `PATCH /v1/tunes/{id}`.
///
/// Every field is optional; an absent field leaves the stored value alone,
/// which is distinct from a field explicitly set to its zero value. None of
/// the tune's fields are nullable, so `Option` fully captures
/// present-vs-absent here.
#[derive(Debug, Deserialize)]
pub struct UpdateTuneRequest {
    pub title: Option<String>,
    pub styles: Option<Vec<String>>,
    pub keys: Option<Vec<Key>>,
    pub time_signature: Option<TimeSignature>,
    pub structure: Option<String>,
    pub has_lyrics: Option<bool>,
}

impl UpdateTuneRequest {
    /// Overwrite only the fields that were present in the payload.
    fn apply_to(self, tune: &mut Tune) {
        if let Some(title) = self.title {
            tune.title = title;
        }
        if let Some(styles) = self.styles {
            tune.styles = styles;
        }
        if let Some(keys) = self.keys {
            tune.keys = keys;
        }
        if let Some(time_signature) = self.time_signature {
            tune.time_signature = time_signature;
        }
        if let Some(structure) = self.structure {
            tune.structure = structure;
        }
        if let Some(has_lyrics) = self.has_lyrics {
            tune.has_lyrics = has_lyrics;
        }
    }
}

/// POST /v1/tunes
///
/// Validate the candidate (reporting every violated field), insert it, and
/// answer 201 with a Location header for the new resource.
pub async fn create_tune(
    RequireTunesWrite(_user): RequireTunesWrite,
    State(state): State<AppState>,
    Json(input): Json<NewTune>,
) -> AppResult<(StatusCode, HeaderMap, Json<DataResponse<Tune>>)> {
    let mut v = Validator::new();
    input.validate(&mut v);
    v.into_result()?;

    let tune = TuneRepo::insert(&state.pool, &input).await?;
    tracing::info!(tune_id = tune.id, title = %tune.title, "tune created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/v1/tunes/{}", tune.id)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(DataResponse { data: tune })))
}

/// GET /v1/tunes/{id}
pub async fn show_tune(
    RequireTunesRead(_user): RequireTunesRead,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tune>>> {
    let tune = TuneRepo::get(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tune }))
}

/// PATCH /v1/tunes/{id}
///
/// Read-modify-write under optimistic concurrency: fetch the current row,
/// apply the present fields, validate, and issue the conditional update.
/// A version that moved in between surfaces as 409; the caller re-fetches
/// and retries.
pub async fn update_tune(
    RequireTunesWrite(_user): RequireTunesWrite,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTuneRequest>,
) -> AppResult<Json<DataResponse<Tune>>> {
    let mut tune = TuneRepo::get(&state.pool, id).await?;
    input.apply_to(&mut tune);

    let mut v = Validator::new();
    tune.validate(&mut v);
    v.into_result()?;

    let updated = TuneRepo::update(&state.pool, &tune).await?;
    tracing::info!(tune_id = updated.id, version = updated.version, "tune updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /v1/tunes/{id}
pub async fn delete_tune(
    RequireTunesWrite(_user): RequireTunesWrite,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<&'static str>>> {
    TuneRepo::delete(&state.pool, id).await?;
    tracing::info!(tune_id = id, "tune deleted");

    Ok(Json(DataResponse {
        data: "tune successfully deleted",
    }))
}

/// GET /v1/tunes
///
/// Filtered, sorted, paginated listing. All filter parameters are optional;
/// an empty filter matches everything.
pub async fn list_tunes(
    RequireTunesRead(_user): RequireTunesRead,
    State(state): State<AppState>,
    Query(params): Query<ListTunesParams>,
) -> AppResult<Json<PageResponse<Tune>>> {
    let filters = params.into_filters()?;
    let (tunes, metadata) = TuneRepo::list(&state.pool, &filters).await?;

    Ok(Json(PageResponse {
        data: tunes,
        metadata,
    }))
}
