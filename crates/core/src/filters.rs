//! Listing filters, sort safelist, and pagination metadata.

use serde::Serialize;

use crate::validation::Validator;

/// Upper bound on `page` to keep the OFFSET arithmetic sane.
const MAX_PAGE: i64 = 10_000_000;

/// Upper bound on `page_size`.
const MAX_PAGE_SIZE: i64 = 100;

/// Sort values accepted for tune listings. A leading `-` means descending.
/// Anything outside this list is rejected before any query is built, which
/// is what keeps the dynamic ORDER BY injection-proof.
pub const TUNE_SORT_SAFELIST: [&str; 8] = [
    "id",
    "title",
    "time_signature",
    "structure",
    "-id",
    "-title",
    "-time_signature",
    "-structure",
];

/// Request-scoped listing parameters for the tune catalog.
///
/// Empty strings and empty sets mean "match everything" for their clause;
/// `has_lyrics: None` means the flag is not filtered on.
#[derive(Debug, Clone)]
pub struct Filters {
    pub title: String,
    pub styles: Vec<String>,
    pub keys: Vec<String>,
    pub time_signature: String,
    pub structure: String,
    pub has_lyrics: Option<bool>,
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            title: String::new(),
            styles: Vec::new(),
            keys: Vec::new(),
            time_signature: String::new(),
            structure: String::new(),
            has_lyrics: None,
            page: 1,
            page_size: 20,
            sort: "id".to_string(),
        }
    }
}

impl Filters {
    /// Validate pagination bounds and the sort value against the safelist.
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(
            self.page <= MAX_PAGE,
            "page",
            "must be a maximum of 10 million",
        );
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(
            self.page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );
        v.check(
            TUNE_SORT_SAFELIST.contains(&self.sort.as_str()),
            "sort",
            "invalid sort value",
        );
    }

    /// The bare column name for the validated sort value, or `None` when the
    /// value is not safelisted. Callers must treat `None` as a rejection;
    /// the column name is interpolated into SQL.
    pub fn sort_column(&self) -> Option<&str> {
        if TUNE_SORT_SAFELIST.contains(&self.sort.as_str()) {
            Some(self.sort.trim_start_matches('-'))
        } else {
            None
        }
    }

    /// `DESC` when the sort value carries the `-` prefix, `ASC` otherwise.
    pub fn sort_direction(&self) -> &'static str {
        if self.sort.starts_with('-') {
            "DESC"
        } else {
            "ASC"
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Pagination summary for a listing response.
///
/// All fields are zero when the result set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_records: i64,
}

impl Metadata {
    /// Compute metadata from a windowed total count and the request's
    /// pagination parameters.
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records == 0 {
            return Metadata::default();
        }
        Metadata {
            current_page: page,
            page_size,
            total_pages: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::CoreError;

    use super::*;

    fn validation_errors(filters: &Filters) -> Result<(), CoreError> {
        let mut v = Validator::new();
        filters.validate(&mut v);
        v.into_result()
    }

    #[test]
    fn default_filters_are_valid() {
        assert!(validation_errors(&Filters::default()).is_ok());
    }

    #[test]
    fn rejects_sort_outside_safelist() {
        let mut filters = Filters::default();
        filters.sort = "; DROP TABLE tunes".to_string();

        assert_matches!(validation_errors(&filters), Err(CoreError::Validation(fields)) => {
            assert_eq!(fields["sort"], "invalid sort value");
        });
        assert_eq!(filters.sort_column(), None);

        filters.sort = "created_at".to_string();
        assert!(validation_errors(&filters).is_err());
        assert_eq!(filters.sort_column(), None);
    }

    #[test]
    fn sort_column_and_direction() {
        let mut filters = Filters::default();
        filters.sort = "-title".to_string();
        assert_eq!(filters.sort_column(), Some("title"));
        assert_eq!(filters.sort_direction(), "DESC");

        filters.sort = "id".to_string();
        assert_eq!(filters.sort_column(), Some("id"));
        assert_eq!(filters.sort_direction(), "ASC");
    }

    #[test]
    fn rejects_pagination_out_of_bounds() {
        let mut filters = Filters::default();
        filters.page = 0;
        filters.page_size = 101;

        assert_matches!(validation_errors(&filters), Err(CoreError::Validation(fields)) => {
            assert!(fields.contains_key("page"));
            assert!(fields.contains_key("page_size"));
        });
    }

    #[test]
    fn limit_and_offset() {
        let mut filters = Filters::default();
        filters.page = 3;
        filters.page_size = 25;
        assert_eq!(filters.limit(), 25);
        assert_eq!(filters.offset(), 50);
    }

    #[test]
    fn metadata_ceiling_division() {
        let meta = Metadata::calculate(101, 2, 25);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.page_size, 25);
        assert_eq!(meta.total_pages, 5);
        assert_eq!(meta.total_records, 101);
    }

    #[test]
    fn metadata_empty_result_is_all_zero() {
        assert_eq!(Metadata::calculate(0, 4, 25), Metadata::default());
    }
}
