//! Query utilities for NetBox API
//!
//! Provides helpers for building list queries against `/api/{endpoint}/`.

use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use serde::Deserialize;
use tracing::warn;

/// Build the request path for a list endpoint, e.g. `/api/dcim/devices/?limit=1000`
pub fn list_path(http: &HttpClient, endpoint: &str, filters: &[(&str, &str)]) -> String {
    let mut url = format!("/api/{}/", endpoint.trim_matches('/'));

    if !filters.is_empty() {
        let query_string = http.build_query_string(filters);
        url = format!("{}?{}", url, query_string);
    }

    url
}

/// Query a single page of resources.
///
/// Exactly one request is made. When NetBox reports a `next` page the
/// remainder is not fetched; the caller sizes the page with a `limit` filter.
pub async fn query_page<T: for<'de> Deserialize<'de>>(
    http: &HttpClient,
    endpoint: &str,
    filters: &[(&str, &str)],
) -> Result<PaginatedResponse<T>, NetBoxError> {
    let url = list_path(http, endpoint, filters);
    let page: PaginatedResponse<T> = http.get(&url).await?;

    if page.next.is_some() {
        warn!(
            "{} returned {} of {} records; remaining pages are not fetched",
            endpoint,
            page.results.len(),
            page.count
        );
    }

    Ok(page)
}
