//! Shared response envelope types.
//!
//! All successful responses use a `{ "data": ... }` envelope; listings add
//! a `"metadata"` pagination summary.

use serde::Serialize;
use tunebook_core::filters::Metadata;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Listing envelope: one page of results plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub metadata: Metadata,
}
