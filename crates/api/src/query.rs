//! Query-string parsing for tune listings.
//!
//! All parameters arrive as optional strings and are converted into a
//! validated [`Filters`] value; every offending parameter is reported in
//! one 422 response rather than failing on the first.

use serde::Deserialize;
use tunebook_core::error::CoreError;
use tunebook_core::filters::Filters;
use tunebook_core::validation::Validator;

/// Raw query parameters for `GET /v1/tunes`.
///
/// `styles` and `keys` are comma-separated sets; `sort` takes a column name
/// optionally prefixed with `-` for descending order; `has_lyrics` is
/// tri-state (absent / `true` / `false`).
#[derive(Debug, Default, Deserialize)]
pub struct ListTunesParams {
    pub title: Option<String>,
    pub styles: Option<String>,
    pub keys: Option<String>,
    pub time_signature: Option<String>,
    pub structure: Option<String>,
    pub has_lyrics: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

impl ListTunesParams {
    /// Convert into validated [`Filters`], collecting every bad parameter.
    pub fn into_filters(self) -> Result<Filters, CoreError> {
        let mut v = Validator::new();
        let mut filters = Filters::default();

        if let Some(title) = self.title {
            filters.title = title;
        }
        if let Some(styles) = self.styles {
            filters.styles = parse_csv(&styles);
        }
        if let Some(keys) = self.keys {
            filters.keys = parse_csv(&keys);
        }
        if let Some(time_signature) = self.time_signature {
            filters.time_signature = time_signature;
        }
        if let Some(structure) = self.structure {
            filters.structure = structure;
        }

        if let Some(raw) = self.has_lyrics {
            match raw.parse::<bool>() {
                Ok(flag) => filters.has_lyrics = Some(flag),
                Err(_) => v.add_error("has_lyrics", "must be true or false"),
            }
        }
        if let Some(raw) = self.page {
            match raw.parse::<i64>() {
                Ok(page) => filters.page = page,
                Err(_) => v.add_error("page", "must be an integer value"),
            }
        }
        if let Some(raw) = self.page_size {
            match raw.parse::<i64>() {
                Ok(page_size) => filters.page_size = page_size,
                Err(_) => v.add_error("page_size", "must be an integer value"),
            }
        }
        if let Some(sort) = self.sort {
            filters.sort = sort;
        }

        filters.validate(&mut v);
        v.into_result()?;
        Ok(filters)
    }
}

/// Split a comma-separated set, dropping empty segments.
fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
